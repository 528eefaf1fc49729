//! Table Model - Span-aware grid view of tables
//!
//! This crate provides the data model the table merge operations work on:
//! a dense rectangular grid of cell slots, the source table element tree it
//! is read from, the warehouse that resolves spans and locked columns, and
//! the rendering contract that collapses a grid back into table markup.

mod cell;
mod config;
mod error;
mod grid;
mod source;
pub mod render;
pub mod warehouse;

pub use cell::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use source::*;
pub use warehouse::{CellDetail, GridSize, Warehouse};
