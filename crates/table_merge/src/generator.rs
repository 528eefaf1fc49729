//! Cell fabrication capability supplied by callers

use table_model::{CellSlot, TableCell};

/// Creates cell elements on behalf of the grid operations.
///
/// The operations never build cell content themselves; every new element
/// comes from one of these methods.
pub trait Generator<C> {
    /// A filler cell, typically empty, modelled after `example`
    fn cell(&self, example: &CellSlot<C>) -> C;

    /// A copy of a foreign cell adapted for insertion into the host table
    fn replace(&self, cell: &C) -> C;

    /// A cell for a position no source cell covers
    fn gap(&self) -> C;
}

/// Generator for [`TableCell`] elements. Fillers and gaps are empty,
/// replacements keep the foreign content under a new identity. Pair it with
/// [`TableCell::same_cell`] as the comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCellGenerator;

impl Generator<TableCell> for TableCellGenerator {
    fn cell(&self, _example: &CellSlot<TableCell>) -> TableCell {
        TableCell::empty()
    }

    fn replace(&self, cell: &TableCell) -> TableCell {
        cell.duplicate()
    }

    fn gap(&self) -> TableCell {
        TableCell::empty()
    }
}
