use std::fmt;

use tsp_order_derive::KvDisplay;

use crate::{
    CostMatrix, Error, Result,
    algo::{brute_force, local_search, nearest_neighbour},
};

/// Largest stop count solved exhaustively. Brute force at this size walks
/// 11! (about 40M) orders.
pub const MAX_EXACT_STOPS: usize = 12;

/// Knobs for [`solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, KvDisplay)]
pub struct SolveConfig {
    /// Inputs with at most this many stops use brute force; larger ones use
    /// nearest-neighbour plus 2-opt. Capped at [`MAX_EXACT_STOPS`].
    pub exact_threshold: usize,
    /// Accepted for callers that pass it along. Every solver already starts
    /// at stop 0, so put the desired start first when building the matrix.
    pub fixed_start: bool,
    /// Return to the start: the first stop is appended to the order.
    pub round_trip: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            exact_threshold: MAX_EXACT_STOPS,
            fixed_start: false,
            round_trip: false,
        }
    }
}

impl SolveConfig {
    pub fn new(fixed_start: bool, round_trip: bool) -> Self {
        Self {
            fixed_start,
            round_trip,
            ..Self::default()
        }
    }

    pub fn with_exact_threshold(mut self, exact_threshold: usize) -> Self {
        self.exact_threshold = exact_threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.exact_threshold > MAX_EXACT_STOPS {
            return Err(Error::invalid_input(format!(
                "exact threshold {} exceeds the maximum of {MAX_EXACT_STOPS} stops",
                self.exact_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Fewer than two stops: the identity order.
    Trivial,
    /// Exhaustive search.
    Exact,
    /// Nearest-neighbour construction refined by 2-opt.
    Heuristic,
}

impl Strategy {
    pub fn select(n: usize, exact_threshold: usize) -> Self {
        if n < 2 {
            Self::Trivial
        } else if n <= exact_threshold {
            Self::Exact
        } else {
            Self::Heuristic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Exact => "exact",
            Self::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Stop indices in visiting order; the start repeats at the end for
    /// round trips.
    pub order: Vec<usize>,
    /// Cost of `order`, including the closing leg of a round trip.
    pub cost: f64,
    pub strategy: Strategy,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[tsp_order_derive::timer("solver")]
pub fn solve(matrix: &CostMatrix, config: SolveConfig) -> Result<Solution> {
    config.validate()?;

    let n = matrix.len();
    let strategy = Strategy::select(n, config.exact_threshold);
    log::debug!("solver: start n={n} strategy={strategy} {config}");
    if config.fixed_start {
        log::trace!("solver: fixed_start requested; stop 0 is the start in every strategy");
    }

    let mut order = match strategy {
        Strategy::Trivial => {
            return Ok(Solution {
                order: (0..n).collect(),
                cost: 0.0,
                strategy,
            });
        }
        Strategy::Exact => brute_force(matrix, config.fixed_start),
        Strategy::Heuristic => {
            let mut tour = nearest_neighbour(matrix, config.fixed_start);
            let seed_cost = matrix.path_cost(&tour);
            let stats = local_search::refine(&mut tour, matrix);
            log::debug!(
                "solver.heuristic: seed_cost={seed_cost} refined_cost={} passes={} moves={}",
                matrix.path_cost(&tour),
                stats.passes,
                stats.moves
            );
            tour
        }
    };

    if config.round_trip {
        order.push(order[0]);
    }

    let cost = matrix.path_cost(&order);
    log::info!(
        "solver: complete n={n} strategy={strategy} round_trip={} cost={cost}",
        config.round_trip
    );

    Ok(Solution {
        order,
        cost,
        strategy,
    })
}

/// Visiting order for the stops of `rows`, a square matrix of travel costs.
///
/// Up to [`MAX_EXACT_STOPS`] stops the order is optimal; above that it is a
/// 2-opt local optimum. The order starts at stop 0 and, with `round_trip`,
/// ends there too. Fewer than two stops yield `[0..n)` whatever the flags.
pub fn solve_tsp(rows: &[Vec<f64>], fixed_start: bool, round_trip: bool) -> Result<Vec<usize>> {
    let matrix = CostMatrix::from_rows(rows)?;
    let solution = solve(&matrix, SolveConfig::new(fixed_start, round_trip))?;
    Ok(solution.order)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{MAX_EXACT_STOPS, SolveConfig, Strategy, solve, solve_tsp};
    use crate::{CostMatrix, Error, algo::brute_force};

    fn matrix_4() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 4.0, 2.0],
            vec![1.0, 0.0, 3.0, 1.0],
            vec![4.0, 3.0, 0.0, 1.0],
            vec![2.0, 1.0, 1.0, 0.0],
        ]
    }

    fn unit_matrix(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect()
    }

    fn random_rows(rng: &mut StdRng, n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            0.0
                        } else {
                            rng.random_range(1.0..1_000.0)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn assert_permutation(order: &[usize], n: usize) {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn small_input_uses_brute_force_result() {
        let order = solve_tsp(&matrix_4(), false, false).expect("solve");
        assert_eq!(order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn round_trip_appends_start() {
        let order = solve_tsp(&matrix_4(), false, true).expect("solve");
        assert_eq!(order.len(), 5);
        assert_eq!(order.first(), order.last());
        assert_eq!(order, vec![0, 1, 3, 2, 0]);
    }

    #[test]
    fn two_stops_with_and_without_round_trip() {
        let rows = vec![vec![0.0, 5.0], vec![5.0, 0.0]];
        assert_eq!(solve_tsp(&rows, false, false).expect("solve"), vec![0, 1]);
        assert_eq!(solve_tsp(&rows, false, true).expect("solve"), vec![0, 1, 0]);
    }

    #[test]
    fn fewer_than_two_stops_ignore_flags() {
        for (fixed_start, round_trip) in [(false, false), (true, false), (false, true), (true, true)]
        {
            assert!(
                solve_tsp(&[], fixed_start, round_trip)
                    .expect("solve")
                    .is_empty()
            );
            assert_eq!(
                solve_tsp(&[vec![0.0]], fixed_start, round_trip).expect("solve"),
                vec![0]
            );
        }
    }

    #[test]
    fn fixed_start_does_not_change_order() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in [5, 14] {
            let rows = random_rows(&mut rng, n);
            assert_eq!(
                solve_tsp(&rows, true, false).expect("solve"),
                solve_tsp(&rows, false, false).expect("solve")
            );
        }
    }

    #[test]
    fn large_input_uses_heuristic() {
        let n = 15;
        let matrix = CostMatrix::new(unit_matrix(n)).expect("valid matrix");
        let solution = solve(&matrix, SolveConfig::default()).expect("solve");

        assert_eq!(solution.strategy, Strategy::Heuristic);
        assert_eq!(solution.order[0], 0);
        assert_permutation(&solution.order, n);
        assert_eq!(solution.cost, 14.0);
    }

    #[test]
    fn round_trip_interior_matches_open_order() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in [2, 6, 13, 30] {
            let rows = random_rows(&mut rng, n);
            let open = solve_tsp(&rows, false, false).expect("solve");
            let closed = solve_tsp(&rows, false, true).expect("solve");

            assert_eq!(closed.len(), n + 1);
            assert_eq!(closed[0], 0);
            assert_eq!(closed[n], 0);
            assert_eq!(&closed[..n], &open[..]);
        }
    }

    #[test]
    fn outputs_are_anchored_permutations_across_sizes() {
        let mut rng = StdRng::seed_from_u64(41);
        for n in 2..=24 {
            let rows = random_rows(&mut rng, n);
            let order = solve_tsp(&rows, false, false).expect("solve");
            assert_eq!(order[0], 0);
            assert_permutation(&order, n);
        }
    }

    #[test]
    fn strategy_boundary_sits_at_twelve_stops() {
        assert_eq!(Strategy::select(0, MAX_EXACT_STOPS), Strategy::Trivial);
        assert_eq!(Strategy::select(1, MAX_EXACT_STOPS), Strategy::Trivial);
        assert_eq!(Strategy::select(2, MAX_EXACT_STOPS), Strategy::Exact);
        assert_eq!(Strategy::select(12, MAX_EXACT_STOPS), Strategy::Exact);
        assert_eq!(Strategy::select(13, MAX_EXACT_STOPS), Strategy::Heuristic);
    }

    #[test]
    fn lower_exact_threshold_switches_to_heuristic() {
        let matrix = CostMatrix::new(matrix_4()).expect("valid matrix");
        let config = SolveConfig::default().with_exact_threshold(3);
        let solution = solve(&matrix, config).expect("solve");

        assert_eq!(solution.strategy, Strategy::Heuristic);
        assert_permutation(&solution.order, 4);
    }

    #[test]
    fn exact_threshold_above_maximum_is_rejected() {
        let matrix = CostMatrix::new(matrix_4()).expect("valid matrix");
        let config = SolveConfig::default().with_exact_threshold(MAX_EXACT_STOPS + 1);
        let err = solve(&matrix, config).expect_err("threshold too large");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn solution_cost_includes_closing_leg() {
        let matrix = CostMatrix::new(matrix_4()).expect("valid matrix");
        let open = solve(&matrix, SolveConfig::new(false, false)).expect("solve");
        let closed = solve(&matrix, SolveConfig::new(false, true)).expect("solve");

        assert_eq!(open.cost, 3.0);
        assert_eq!(closed.cost, 3.0 + 4.0);
        assert_eq!(closed.strategy, Strategy::Exact);
    }

    #[test]
    fn heuristic_matches_exact_on_easy_line() {
        // Stops on a line: visiting them in index order is optimal.
        let n = 13;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect();
        let matrix = CostMatrix::new(rows).expect("valid matrix");

        let heuristic = solve(&matrix, SolveConfig::default()).expect("solve");
        assert_eq!(heuristic.strategy, Strategy::Heuristic);
        assert_eq!(heuristic.order, (0..n).collect::<Vec<_>>());

        let small = CostMatrix::from_rows(&matrix_4()).expect("valid matrix");
        assert_eq!(
            solve(&small, SolveConfig::default())
                .expect("solve")
                .order,
            brute_force(&small, false)
        );
    }

    #[test]
    fn malformed_matrix_fails_fast() {
        let err = solve_tsp(&[vec![0.0, 1.0], vec![1.0]], false, false)
            .expect_err("ragged matrix should fail");
        assert!(matches!(err, Error::NonSquareMatrix { .. }));
    }
}
