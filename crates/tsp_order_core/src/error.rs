use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("matrix is not square: row {row} has {found} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cost at [{row}][{col}]: {value} (costs must be finite and non-negative)")]
    InvalidCost { row: usize, col: usize, value: f64 },
    #[error("stop index {index} out of bounds for {len} stops")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
