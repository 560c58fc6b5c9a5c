use crate::CostMatrix;

/// Exhaustive search over every order that starts at stop 0.
///
/// The remaining stops are enumerated in lexicographic order, one
/// permutation at a time, and the first order reaching the minimum cost is
/// kept. Runs in `O((n-1)! * n)`; callers gate this on the stop count.
/// Stop 0 is the start whether or not `_fixed_start` is set.
pub fn brute_force(matrix: &CostMatrix, _fixed_start: bool) -> Vec<usize> {
    let n = matrix.len();
    if n < 2 {
        return (0..n).collect();
    }

    let mut current: Vec<usize> = (0..n).collect();
    let mut best = current.clone();
    let mut best_cost = matrix.path_cost(&current);
    let mut evaluated = 1u64;

    while next_permutation(&mut current[1..]) {
        evaluated += 1;
        let cost = matrix.path_cost(&current);
        if cost < best_cost {
            best_cost = cost;
            best.copy_from_slice(&current);
        }
    }

    log::debug!("brute_force: complete n={n} evaluated={evaluated} best_cost={best_cost}");
    best
}

/// Rearranges `items` into the next lexicographically greater permutation.
/// Returns `false`, leaving `items` untouched, once the last permutation
/// (descending order) has been reached.
pub fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let pivot_value = items[pivot];
    let Some(offset) = items[pivot + 1..].iter().rposition(|&v| v > pivot_value) else {
        return false;
    };

    items.swap(pivot, pivot + 1 + offset);
    items[pivot + 1..].reverse();
    true
}
