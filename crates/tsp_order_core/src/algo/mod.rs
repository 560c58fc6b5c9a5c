//! Tour construction and improvement. Every routine anchors its tours at
//! stop 0.

mod exact;
mod greedy;
pub(crate) mod local_search;

pub use exact::{brute_force, next_permutation};
pub use greedy::nearest_neighbour;
pub use local_search::two_opt;
