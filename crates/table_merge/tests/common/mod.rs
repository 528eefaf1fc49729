//! Shared fixtures for the table operation integration tests

#![allow(dead_code)]

use table_model::{SourceCell, SourceRow, SourceTable, TableCell, TableConfig};

/// A table of single-slot body cells with the given locked columns
pub fn table(rows: &[&[&str]], locked_columns: &[usize]) -> SourceTable<TableCell> {
    let mut table = SourceTable::new(
        rows.iter()
            .map(|row| SourceRow::body(row.iter().map(|text| SourceCell::new(TableCell::new(*text))).collect()))
            .collect(),
    );
    table.set_locked_columns(locked_columns, &TableConfig::default());
    table
}

/// Content of every rendered cell, row by row
pub fn texts(table: &SourceTable<TableCell>) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell.element.content.clone()).collect())
        .collect()
}
