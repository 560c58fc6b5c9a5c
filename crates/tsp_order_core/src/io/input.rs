use std::{fs, io::Read};

use tsp_order_derive::KvDisplay;

use crate::{CostMatrix, Error, Result, SolverOptions};

/// Cost matrix read for one CLI run, plus where it came from.
#[derive(Clone, Debug, KvDisplay)]
pub struct SolverInput {
    source: String,
    #[kv(name = "stops", len)]
    matrix: CostMatrix,
}

impl SolverInput {
    pub fn new(source: impl Into<String>, matrix: CostMatrix) -> Self {
        Self {
            source: source.into(),
            matrix,
        }
    }

    /// Reads the matrix from `--input`, or stdin when no path is set.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        match options.input_path() {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    Error::invalid_input(format!("failed to read {}: {e}", path.display()))
                })?;
                Ok(Self::new(path.display().to_string(), parse_matrix(&text)?))
            }
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(Self::new("stdin", parse_matrix(&text)?))
            }
        }
    }

    pub fn into_matrix(self) -> CostMatrix {
        self.matrix
    }
}

/// Parses one matrix row per non-empty line. Costs are separated by commas,
/// whitespace or both; lines starting with `#` are comments.
pub fn parse_matrix(input: &str) -> Result<CostMatrix> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line_idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .enumerate()
            .map(|(col_idx, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    Error::invalid_input(format!(
                        "Line {}, column {}: invalid cost: {tok}",
                        line_idx + 1,
                        col_idx + 1
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::invalid_input("No matrix rows provided."));
    }

    CostMatrix::new(rows)
}

#[cfg(test)]
mod tests {
    use super::{SolverInput, parse_matrix};
    use crate::{CostMatrix, Error};

    #[test]
    fn parse_matrix_accepts_commas_and_whitespace() {
        let m = parse_matrix("0, 1 4,2\n1 0 3 1\n4,3,0,1\n  2\t1  1 0  \n").expect("parse matrix");

        assert_eq!(m.len(), 4);
        assert_eq!(m.row(0), Some(&[0.0, 1.0, 4.0, 2.0][..]));
        assert_eq!(m.row(3), Some(&[2.0, 1.0, 1.0, 0.0][..]));
    }

    #[test]
    fn parse_matrix_skips_blank_and_comment_lines() {
        let m = parse_matrix("# seconds\n\n0 5\n# second row\n5 0\n\n").expect("parse matrix");
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(0, 1), Some(5.0));
    }

    #[test]
    fn parse_matrix_accepts_single_stop() {
        let m = parse_matrix("0").expect("parse matrix");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn parse_matrix_rejects_empty_input() {
        let err = parse_matrix(" \n# only a comment\n\t ").expect_err("empty input should fail");
        assert!(err.to_string().contains("No matrix rows provided."));
    }

    #[test]
    fn parse_matrix_reports_line_and_column_of_bad_token() {
        let err = parse_matrix("0 1\n1 x").expect_err("non-numeric cost should fail");
        assert!(err.to_string().contains("Line 2, column 2: invalid cost: x"));
    }

    #[test]
    fn parse_matrix_rejects_ragged_rows() {
        let err = parse_matrix("0 1 2\n1 0\n2 1 0").expect_err("ragged rows should fail");
        assert!(matches!(err, Error::NonSquareMatrix { row: 1, .. }));
    }

    #[test]
    fn parse_matrix_rejects_negative_costs() {
        let err = parse_matrix("0 -1\n1 0").expect_err("negative cost should fail");
        assert!(matches!(err, Error::InvalidCost { row: 0, col: 1, .. }));
    }

    #[test]
    fn display_reports_source_and_stop_count() {
        let matrix = CostMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).expect("valid matrix");
        let input = SolverInput::new("matrix.txt", matrix);
        assert_eq!(input.to_string(), "source=matrix.txt stops=2");
    }
}
