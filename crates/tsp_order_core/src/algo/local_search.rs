use crate::{CostMatrix, Error, Result};

/// Below this many stops there is no segment to reverse without moving the
/// anchor.
const MIN_TOUR_SIZE_FOR_2OPT: usize = 3;
/// Relative slack on the windowed delta, which only pre-filters candidates.
/// Moves are accepted on a strictly lower full path cost.
const TWO_OPT_DELTA_SLACK: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TwoOptStats {
    pub(crate) passes: usize,
    pub(crate) moves: usize,
}

/// 2-opt local search over an open tour.
///
/// Checks that `order` only holds distinct stops of `matrix`, then refines a
/// copy until a full pass finds no improving reversal. Position 0 never
/// moves, so `_fixed_start` changes nothing. The result costs no more than
/// `order`.
pub fn two_opt(order: &[usize], matrix: &CostMatrix, _fixed_start: bool) -> Result<Vec<usize>> {
    matrix.check_indices(order)?;
    let mut seen = vec![false; matrix.len()];
    for &idx in order {
        if std::mem::replace(&mut seen[idx], true) {
            return Err(Error::invalid_input(format!(
                "stop {idx} appears more than once in tour"
            )));
        }
    }

    let mut tour = order.to_vec();
    refine(&mut tour, matrix);
    Ok(tour)
}

/// First-improvement 2-opt in place. Pairs `(i, j)` with `1 <= i < j < n`
/// are scanned in order and the segment `tour[i..=j]` is reversed as soon as
/// that strictly lowers the total path cost; the pass then carries on with
/// the updated tour. Stops after a pass without moves.
pub(crate) fn refine(tour: &mut [usize], matrix: &CostMatrix) -> TwoOptStats {
    let n = tour.len();
    let mut stats = TwoOptStats::default();
    if n < MIN_TOUR_SIZE_FOR_2OPT {
        log::debug!("two_opt: skip n={n} reason=insufficient_input");
        return stats;
    }

    let mut current = matrix.path_cost(tour);
    loop {
        stats.passes += 1;
        let mut pass_moves = 0usize;

        for i in 1..(n - 1) {
            for j in (i + 1)..n {
                let slack = TWO_OPT_DELTA_SLACK * current.max(1.0);
                if reversal_delta(tour, matrix, i, j) >= slack {
                    continue;
                }

                tour[i..=j].reverse();
                let candidate = matrix.path_cost(tour);
                if candidate < current {
                    current = candidate;
                    pass_moves += 1;
                } else {
                    tour[i..=j].reverse();
                }
            }
        }

        stats.moves += pass_moves;
        log::trace!("two_opt: pass={} moves={pass_moves}", stats.passes);

        if pass_moves == 0 {
            break;
        }
    }

    log::debug!(
        "two_opt: complete n={n} passes={} moves={} cost={}",
        stats.passes,
        stats.moves,
        current
    );
    stats
}

/// Cost change from reversing `tour[i..=j]`, with `1 <= i < j < n`.
///
/// Only legs touching the segment change: the leg entering it, the legs
/// inside it (which flip direction, so asymmetric costs matter) and the leg
/// leaving it when `j` is not the last position.
fn reversal_delta(tour: &[usize], matrix: &CostMatrix, i: usize, j: usize) -> f64 {
    let last = (j + 1).min(tour.len() - 1);
    let before: f64 = (i - 1..last)
        .map(|k| matrix.cost(tour[k], tour[k + 1]))
        .sum();

    let mut after = matrix.cost(tour[i - 1], tour[j]);
    after += (i..j).map(|k| matrix.cost(tour[k + 1], tour[k])).sum::<f64>();
    if j + 1 < tour.len() {
        after += matrix.cost(tour[i], tour[j + 1]);
    }

    after - before
}
