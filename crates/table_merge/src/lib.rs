//! Table Merge - Fitment, span splitting, and merge operations over table grids
//!
//! This crate implements pasting one table grid into another at an address,
//! and inserting whole rows or columns of one grid into another, while
//! keeping spans consistent and leaving locked columns untouched.

mod error;
mod generator;
pub mod fitment;
pub mod merge;
pub mod merging;
pub mod operations;

#[cfg(test)]
mod test_support;

pub use error::*;
pub use fitment::Delta;
pub use generator::*;
pub use merge::{
    get_locked_columns, get_valid_start_address, insert_cols, insert_rows, is_spanning, merge,
};
pub use operations::{paste_cells, paste_cols, paste_rows};
