//! Error types for merge operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Invalid start address out of table bounds, row: {row}, column: {column} (table is {rows}x{columns})")]
    InvalidStartAddress {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Table model error: {0}")]
    Model(#[from] table_model::ModelError),
}

pub type Result<T> = std::result::Result<T, MergeError>;
