use crate::{Error, Result};

/// Square table of travel costs, `cost(i, j)` being the cost from stop `i`
/// to stop `j`. Costs need not be symmetric; the diagonal is never read by
/// the solvers.
///
/// Construction validates the input once (square, finite, non-negative) so
/// the solvers can index without further checks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);

        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::NonSquareMatrix {
                    row: row_idx,
                    expected: n,
                    found: row.len(),
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidCost {
                        row: row_idx,
                        col: col_idx,
                        value,
                    });
                }
                costs.push(value);
            }
        }

        Ok(Self { n, costs })
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.n && to < self.n {
            Some(self.costs[from * self.n + to])
        } else {
            None
        }
    }

    pub fn row(&self, from: usize) -> Option<&[f64]> {
        (from < self.n).then(|| &self.costs[from * self.n..(from + 1) * self.n])
    }

    /// Total cost of visiting `order` front to back. Open path: no closing
    /// leg back to the first stop is added. Orders shorter than two cost 0.
    pub fn route_cost(&self, order: &[usize]) -> Result<f64> {
        self.check_indices(order)?;
        Ok(self.path_cost(order))
    }

    /// Fails with [`Error::IndexOutOfBounds`] on the first index that is not
    /// a stop of this matrix.
    pub fn check_indices(&self, order: &[usize]) -> Result<()> {
        match order.iter().find(|&&idx| idx >= self.n) {
            Some(&index) => Err(Error::IndexOutOfBounds { index, len: self.n }),
            None => Ok(()),
        }
    }

    #[inline]
    pub(crate) fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.n + to]
    }

    pub(crate) fn path_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|leg| self.cost(leg[0], leg[1]))
            .sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl TryFrom<&[Vec<f64>]> for CostMatrix {
    type Error = Error;

    fn try_from(rows: &[Vec<f64>]) -> Result<Self> {
        Self::from_rows(rows)
    }
}
