use crate::CostMatrix;

/// Greedy tour from stop 0: always step to the cheapest unvisited stop.
/// Ties go to the lowest index so the result is reproducible. `O(n^2)`.
/// `_fixed_start` has no effect: the tour always leaves from stop 0.
pub fn nearest_neighbour(matrix: &CostMatrix, _fixed_start: bool) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut nearest: Option<(usize, f64)> = None;
        for (next, &seen) in visited.iter().enumerate() {
            if seen {
                continue;
            }
            let cost = matrix.cost(current, next);
            if nearest.is_none_or(|(_, best)| cost < best) {
                nearest = Some((next, cost));
            }
        }

        let Some((next, _)) = nearest else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    log::debug!(
        "nearest_neighbour: complete n={n} cost={}",
        matrix.path_cost(&order)
    );
    order
}
