//! Error types for table model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Grid has no rows or no columns")]
    EmptyGrid,

    #[error("Ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
