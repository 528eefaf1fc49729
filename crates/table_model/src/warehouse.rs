//! Warehouse - span-aware index over a source table
//!
//! Reading a table resolves every cell's `rowspan`/`colspan` into the dense
//! addresses it covers. Cells are placed left to right in the first free
//! column of their row, so positions claimed by a rowspan from above are
//! skipped. Overlapping spans never panic: the first cell to claim an address
//! keeps it.
//!
//! The warehouse also records which columns are locked, from the table's
//! locked column marker, and can turn itself into a dense [`Grid`].

use crate::{Address, CellSlot, Grid, GridRow, Result, RowSection, SourceTable, TableConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense size of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

/// A cell of the source table together with its resolved position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDetail<C> {
    pub element: C,
    /// Row of the cell's top-left slot
    pub row: usize,
    /// Column of the cell's top-left slot
    pub column: usize,
    pub rowspan: usize,
    pub colspan: usize,
    /// True when any column covered by the cell is locked
    pub is_locked: bool,
}

/// Span-resolved view of a table
#[derive(Debug, Clone)]
pub struct Warehouse<C> {
    size: GridSize,
    details: Vec<CellDetail<C>>,
    access: HashMap<Address, usize>,
    sections: Vec<RowSection>,
    locked_columns: Vec<usize>,
}

impl<C: Clone> Warehouse<C> {
    /// Build a warehouse with the default configuration
    pub fn from_table(table: &SourceTable<C>) -> Self {
        Self::from_table_with_config(table, &TableConfig::default())
    }

    /// Build a warehouse, reading spans and the locked column marker per `config`
    pub fn from_table_with_config(table: &SourceTable<C>, config: &TableConfig) -> Self {
        let row_count = table.rows.len();
        let sections: Vec<RowSection> = table.rows.iter().map(|row| row.section).collect();

        let mut details: Vec<CellDetail<C>> = Vec::new();
        let mut access: HashMap<Address, usize> = HashMap::new();
        let mut column_count = 0;

        for (row_index, row) in table.rows.iter().enumerate() {
            // Rowspans stop at the end of their section
            let section_end = sections[row_index..]
                .iter()
                .position(|&section| section != row.section)
                .map_or(row_count, |offset| row_index + offset);

            let mut column = 0;
            for cell in &row.cells {
                while access.contains_key(&Address::new(row_index, column)) {
                    column += 1;
                }

                let colspan = config.clamp_colspan(cell.colspan);
                let rowspan = config
                    .clamp_rowspan(cell.rowspan)
                    .min(section_end - row_index);
                let index = details.len();

                for r in row_index..row_index + rowspan {
                    for c in column..column + colspan {
                        access.entry(Address::new(r, c)).or_insert(index);
                    }
                }
                column_count = column_count.max(column + colspan);

                details.push(CellDetail {
                    element: cell.element.clone(),
                    row: row_index,
                    column,
                    rowspan,
                    colspan,
                    is_locked: false,
                });
                column += colspan;
            }
        }

        let locked_columns: Vec<usize> = table
            .locked_columns_with_config(config)
            .into_iter()
            .filter(|&column| {
                let valid = column < column_count;
                if !valid {
                    tracing::warn!(
                        "Ignoring locked column {} outside table of {} columns",
                        column,
                        column_count
                    );
                }
                valid
            })
            .collect();

        for detail in &mut details {
            let covered = detail.column..detail.column + detail.colspan;
            detail.is_locked = locked_columns.iter().any(|column| covered.contains(column));
        }

        tracing::trace!(
            rows = row_count,
            columns = column_count,
            locked = locked_columns.len(),
            "Built table warehouse"
        );

        Self {
            size: GridSize {
                rows: if column_count == 0 { 0 } else { row_count },
                columns: column_count,
            },
            details,
            access,
            sections,
            locked_columns,
        }
    }

    /// Convert to a dense grid. Addresses no cell covers are filled with
    /// cells from `gap`. Every slot of a locked column is marked locked.
    pub fn to_grid(&self, mut gap: impl FnMut() -> C) -> Result<Grid<C>> {
        let rows = (0..self.size.rows)
            .map(|row| {
                let cells = (0..self.size.columns)
                    .map(|column| {
                        let slot = match self.get_at(row, column) {
                            Some(detail) => CellSlot::existing(detail.element.clone()),
                            None => CellSlot::new_cell(gap()),
                        };
                        slot.locked(self.is_locked_column(column))
                    })
                    .collect();
                GridRow::with_section(cells, self.sections[row])
            })
            .collect();
        Grid::new(rows)
    }
}

impl<C> Warehouse<C> {
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Every cell of the table, in reading order
    pub fn details(&self) -> &[CellDetail<C>] {
        &self.details
    }

    /// The cell covering a dense address
    pub fn get_at(&self, row: usize, column: usize) -> Option<&CellDetail<C>> {
        self.access
            .get(&Address::new(row, column))
            .and_then(|&index| self.details.get(index))
    }

    /// Locked column indices, sorted, all within the table width
    pub fn locked_columns(&self) -> &[usize] {
        &self.locked_columns
    }

    pub fn is_locked_column(&self, column: usize) -> bool {
        self.locked_columns.binary_search(&column).is_ok()
    }

    /// Section of every row
    pub fn sections(&self) -> &[RowSection] {
        &self.sections
    }

    /// Cells matching `predicate`, in reading order
    pub fn filter_items<P>(&self, predicate: P) -> Vec<&CellDetail<C>>
    where
        P: Fn(&CellDetail<C>) -> bool,
    {
        self.details.iter().filter(|detail| predicate(detail)).collect()
    }
}

/// Keep the first detail seen for each column, sorted by column
pub fn unique_columns<'a, C, I>(details: I) -> Vec<&'a CellDetail<C>>
where
    I: IntoIterator<Item = &'a CellDetail<C>>,
{
    let mut unique: Vec<&CellDetail<C>> = Vec::new();
    for detail in details {
        if !unique.iter().any(|seen| seen.column == detail.column) {
            unique.push(detail);
        }
    }
    unique.sort_by_key(|detail| detail.column);
    unique
}
