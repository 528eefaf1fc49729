//! Grid row model - dense, span-resolved view of a table
//!
//! A [`Grid`] is an ordered list of [`GridRow`]s, each holding one
//! [`CellSlot`] per dense column position. Spans are not stored explicitly:
//! a cell that spans several positions appears as the same element in every
//! slot it covers, and identity is decided by a caller-supplied comparator.
//!
//! Invariants:
//! - every row has the same number of slots (the grid is rectangular)
//! - a grid has at least one row and one column

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Address
// =============================================================================

/// A position in a dense grid, independent of spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    pub row: usize,
    pub column: usize,
}

impl Address {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

// =============================================================================
// Row Section
// =============================================================================

/// Which table section a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSection {
    /// `<thead>`
    Header,
    /// `<tbody>`
    #[default]
    Body,
    /// `<tfoot>`
    Footer,
}

// =============================================================================
// Cell Slot
// =============================================================================

/// One dense position of a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSlot<C> {
    /// The cell element occupying this position
    pub element: C,
    /// True for content introduced by an operation (filler or pasted cells)
    pub is_new: bool,
    /// True when the slot lies in a locked column
    pub is_locked: bool,
}

impl<C> CellSlot<C> {
    /// A slot holding an existing cell
    pub fn existing(element: C) -> Self {
        Self {
            element,
            is_new: false,
            is_locked: false,
        }
    }

    /// A slot holding a cell created by an operation
    pub fn new_cell(element: C) -> Self {
        Self {
            element,
            is_new: true,
            is_locked: false,
        }
    }

    /// Mark the slot as lying in a locked column
    pub fn locked(mut self, is_locked: bool) -> Self {
        self.is_locked = is_locked;
        self
    }
}

// =============================================================================
// Grid Row
// =============================================================================

/// A row of cell slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow<C> {
    cells: Vec<CellSlot<C>>,
    /// Table section of the row
    pub section: RowSection,
    /// True for rows introduced by an operation
    pub is_new: bool,
}

impl<C> GridRow<C> {
    /// Create a body row
    pub fn new(cells: Vec<CellSlot<C>>) -> Self {
        Self {
            cells,
            section: RowSection::Body,
            is_new: false,
        }
    }

    /// Create a row in the given section
    pub fn with_section(cells: Vec<CellSlot<C>>, section: RowSection) -> Self {
        Self {
            cells,
            section,
            is_new: false,
        }
    }

    /// Number of slots in the row
    pub fn cell_length(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[CellSlot<C>] {
        &self.cells
    }

    /// Mutable access to the slots. Callers keep the owning grid rectangular.
    pub fn cells_mut(&mut self) -> &mut Vec<CellSlot<C>> {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<CellSlot<C>> {
        self.cells
    }

    pub fn get_cell(&self, column: usize) -> Option<&CellSlot<C>> {
        self.cells.get(column)
    }

    pub fn get_cell_element(&self, column: usize) -> Option<&C> {
        self.cells.get(column).map(|slot| &slot.element)
    }

    /// Overwrite the slot at `column`, returning the previous slot
    pub fn mutate_cell(&mut self, column: usize, slot: CellSlot<C>) -> Option<CellSlot<C>> {
        self.cells
            .get_mut(column)
            .map(|current| std::mem::replace(current, slot))
    }

    /// Replace every slot of the row, keeping section and flags.
    /// Returns the previous slots.
    pub fn set_cells(&mut self, cells: Vec<CellSlot<C>>) -> Vec<CellSlot<C>> {
        std::mem::replace(&mut self.cells, cells)
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Rows of a grid split by table section
#[derive(Debug, Clone, PartialEq)]
pub struct GridDetails<C> {
    pub header: Vec<GridRow<C>>,
    pub body: Vec<GridRow<C>>,
    pub footer: Vec<GridRow<C>>,
}

impl<C> GridDetails<C> {
    /// Reassemble the partitions in header, body, footer order
    pub fn into_rows(self) -> Vec<GridRow<C>> {
        let mut rows = self.header;
        rows.extend(self.body);
        rows.extend(self.footer);
        rows
    }
}

/// Dense rectangular matrix of cell slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<C> {
    rows: Vec<GridRow<C>>,
}

impl<C> Grid<C> {
    /// Create a grid, checking that it is non-empty and rectangular
    pub fn new(rows: Vec<GridRow<C>>) -> Result<Self> {
        let expected = rows.first().map(GridRow::cell_length).unwrap_or(0);
        if expected == 0 {
            return Err(ModelError::EmptyGrid);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(GridRow::cell_length)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(ModelError::RaggedGrid {
                row,
                expected,
                found,
            });
        }
        Ok(Self { rows })
    }

    /// Create a grid of existing body cells from a matrix of elements
    pub fn from_elements(elements: Vec<Vec<C>>) -> Result<Self> {
        Self::new(
            elements
                .into_iter()
                .map(|row| GridRow::new(row.into_iter().map(CellSlot::existing).collect()))
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(GridRow::cell_length).unwrap_or(0)
    }

    pub fn rows(&self) -> &[GridRow<C>] {
        &self.rows
    }

    /// Mutable access to the rows. Callers keep the grid rectangular.
    pub fn rows_mut(&mut self) -> &mut [GridRow<C>] {
        &mut self.rows
    }

    pub fn row(&self, index: usize) -> Option<&GridRow<C>> {
        self.rows.get(index)
    }

    pub fn into_rows(self) -> Vec<GridRow<C>> {
        self.rows
    }

    pub fn get_cell(&self, row: usize, column: usize) -> Option<&CellSlot<C>> {
        self.rows.get(row).and_then(|r| r.get_cell(column))
    }

    pub fn get_cell_element(&self, row: usize, column: usize) -> Option<&C> {
        self.get_cell(row, column).map(|slot| &slot.element)
    }

    /// Overwrite one slot, returning the previous one
    pub fn mutate_cell(&mut self, row: usize, column: usize, slot: CellSlot<C>) -> Option<CellSlot<C>> {
        self.rows
            .get_mut(row)
            .and_then(|r| r.mutate_cell(column, slot))
    }

    /// Append a row of the grid's width
    pub fn push_row(&mut self, row: GridRow<C>) {
        debug_assert_eq!(row.cell_length(), self.column_count());
        self.rows.push(row);
    }

    /// Whether every row has the same, non-zero length
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        width > 0 && self.rows.iter().all(|row| row.cell_length() == width)
    }

    /// Columns holding at least one locked slot, ascending
    pub fn locked_columns(&self) -> Vec<usize> {
        (0..self.column_count())
            .filter(|&column| {
                self.rows
                    .iter()
                    .any(|row| row.get_cell(column).is_some_and(|slot| slot.is_locked))
            })
            .collect()
    }

    /// Split the rows into header, body, and footer partitions
    pub fn extract_details(self) -> GridDetails<C> {
        partition(self.rows)
    }

    /// Splice `rows` in before row `index`.
    ///
    /// Rows stay grouped as header, body, footer. The inserted rows take the
    /// section of the partition they land in; an index on the boundary
    /// between header and body lands in the body.
    pub fn insert_rows(&mut self, index: usize, rows: Vec<GridRow<C>>) {
        debug_assert!(index <= self.rows.len());
        debug_assert!(rows.iter().all(|row| row.cell_length() == self.column_count()));

        let mut details = partition(std::mem::take(&mut self.rows));
        let header_len = details.header.len();
        let body_len = details.body.len();

        let (target, offset, section) = if index < header_len {
            (&mut details.header, index, RowSection::Header)
        } else if index <= header_len + body_len {
            (&mut details.body, index - header_len, RowSection::Body)
        } else {
            let offset = (index - header_len - body_len).min(details.footer.len());
            (&mut details.footer, offset, RowSection::Footer)
        };

        target.splice(
            offset..offset,
            rows.into_iter().map(|mut row| {
                row.section = section;
                row
            }),
        );
        self.rows = details.into_rows();
    }
}

fn partition<C>(rows: Vec<GridRow<C>>) -> GridDetails<C> {
    let mut details = GridDetails {
        header: Vec::new(),
        body: Vec::new(),
        footer: Vec::new(),
    };
    for row in rows {
        match row.section {
            RowSection::Header => details.header.push(row),
            RowSection::Body => details.body.push(row),
            RowSection::Footer => details.footer.push(row),
        }
    }
    details
}

impl<C: Clone> Grid<C> {
    /// Matrix of the elements in every slot
    pub fn elements(&self) -> Vec<Vec<C>> {
        self.rows
            .iter()
            .map(|row| row.cells().iter().map(|slot| slot.element.clone()).collect())
            .collect()
    }
}

impl<C> TryFrom<GridDetails<C>> for Grid<C> {
    type Error = ModelError;

    fn try_from(details: GridDetails<C>) -> Result<Self> {
        Self::new(details.into_rows())
    }
}
