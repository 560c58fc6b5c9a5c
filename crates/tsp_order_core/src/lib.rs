//! Visiting order for a small set of stops from a pairwise travel-cost matrix.
//! Up to twelve stops are solved exactly by exhaustive search; larger inputs
//! get a nearest-neighbour tour refined by 2-opt. Stop 0 is always the start.

mod algo;
mod error;
mod io;
pub mod logging;
mod matrix;
mod solver;
mod tour;

pub(crate) use io::options;

pub use algo::{brute_force, nearest_neighbour, next_permutation, two_opt};
pub use error::{Error, Result};
pub use io::input::{SolverInput, parse_matrix};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output::write_order;
pub use matrix::CostMatrix;
pub use solver::{MAX_EXACT_STOPS, SolveConfig, Solution, Strategy, solve, solve_tsp};
pub use tour::{Tour, TourMetrics};
