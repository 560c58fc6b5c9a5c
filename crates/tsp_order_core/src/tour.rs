use std::fmt;

use crate::{CostMatrix, Error, Result};

/// A visiting order checked against the matrix it was solved on.
#[derive(Clone, Copy, Debug)]
pub struct Tour<'a> {
    matrix: &'a CostMatrix,
    order: &'a [usize],
}

impl<'a> Tour<'a> {
    pub fn new(matrix: &'a CostMatrix, order: &'a [usize]) -> Result<Self> {
        matrix.check_indices(order)?;
        Ok(Self { matrix, order })
    }

    pub fn order(&self) -> &[usize] {
        self.order
    }

    pub fn leg_costs(&self) -> Vec<f64> {
        self.order
            .windows(2)
            .map(|leg| self.matrix.cost(leg[0], leg[1]))
            .collect()
    }

    pub fn tour_metrics(&self) -> TourMetrics {
        let legs = self.leg_costs();
        if legs.is_empty() {
            return TourMetrics::default();
        }

        let total: f64 = legs.iter().sum();
        let longest = legs.iter().copied().fold(0.0_f64, f64::max);
        let average = total / legs.len() as f64;

        TourMetrics {
            legs,
            total,
            longest,
            average,
        }
    }

    /// Reorders the caller's stop records to follow this tour. `stops` must
    /// hold one record per matrix row, in row order.
    pub fn apply<T: Clone>(&self, stops: &[T]) -> Result<Vec<T>> {
        if stops.len() != self.matrix.len() {
            return Err(Error::invalid_input(format!(
                "expected {} stops to reorder, got {}",
                self.matrix.len(),
                stops.len()
            )));
        }
        Ok(self.order.iter().map(|&idx| stops[idx].clone()).collect())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub legs: Vec<f64>,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

impl fmt::Display for TourMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.legs.is_empty() {
            return write!(f, "legs=0");
        }
        write!(
            f,
            "legs={} total={} longest={} avg={}",
            self.legs.len(),
            fmt_cost(self.total),
            fmt_cost(self.longest),
            fmt_cost(self.average)
        )
    }
}

pub(crate) fn fmt_cost(value: f64) -> String {
    let mut buf = ryu::Buffer::new();
    buf.format(value).to_owned()
}

#[cfg(test)]
mod tests {
    use super::{Tour, fmt_cost};
    use crate::{CostMatrix, Error};

    fn matrix_4() -> CostMatrix {
        CostMatrix::new(vec![
            vec![0.0, 1.0, 4.0, 2.0],
            vec![1.0, 0.0, 3.0, 1.0],
            vec![4.0, 3.0, 0.0, 1.0],
            vec![2.0, 1.0, 1.0, 0.0],
        ])
        .expect("valid matrix")
    }

    #[test]
    fn tour_metrics_reports_legs_and_totals() {
        let m = matrix_4();
        let order = [0, 2, 3, 1];
        let metrics = Tour::new(&m, &order).expect("valid tour").tour_metrics();

        assert_eq!(metrics.legs, vec![4.0, 1.0, 1.0]);
        assert_eq!(metrics.total, 6.0);
        assert_eq!(metrics.longest, 4.0);
        assert_eq!(metrics.average, 2.0);
    }

    #[test]
    fn tour_metrics_of_single_stop_is_empty() {
        let m = matrix_4();
        let metrics = Tour::new(&m, &[2]).expect("valid tour").tour_metrics();
        assert!(metrics.legs.is_empty());
        assert_eq!(metrics.total, 0.0);
    }

    #[test]
    fn tour_metrics_display_as_log_fields() {
        let m = matrix_4();
        let metrics = Tour::new(&m, &[0, 2, 3, 1]).expect("valid tour").tour_metrics();
        assert_eq!(metrics.to_string(), "legs=3 total=6.0 longest=4.0 avg=2.0");

        let empty = Tour::new(&m, &[1]).expect("valid tour").tour_metrics();
        assert_eq!(empty.to_string(), "legs=0");
    }

    #[test]
    fn apply_reorders_stop_records() {
        let m = matrix_4();
        let stops = ["depot", "bakery", "library", "park"];
        let order = [0, 1, 3, 2, 0];

        let ordered = Tour::new(&m, &order)
            .expect("valid tour")
            .apply(&stops)
            .expect("reorder");

        assert_eq!(ordered, vec!["depot", "bakery", "park", "library", "depot"]);
    }

    #[test]
    fn apply_rejects_mismatched_stop_count() {
        let m = matrix_4();
        let order = [0, 1, 2, 3];
        let err = Tour::new(&m, &order)
            .expect("valid tour")
            .apply(&["a", "b"])
            .expect_err("stop count mismatch");
        assert!(err.to_string().contains("expected 4 stops"));
    }

    #[test]
    fn new_rejects_out_of_range_order() {
        let m = matrix_4();
        let err = Tour::new(&m, &[0, 9]).expect_err("index 9 is out of range");
        assert!(matches!(err, Error::IndexOutOfBounds { index: 9, len: 4 }));
    }

    #[test]
    fn fmt_cost_uses_shortest_representation() {
        assert_eq!(fmt_cost(3.0), "3.0");
        assert_eq!(fmt_cost(0.1), "0.1");
    }
}
