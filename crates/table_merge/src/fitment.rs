//! Fitment - measure and pad grids so one fits into another
//!
//! A [`Delta`] counts how many rows and columns a grid still needs.
//! Positive values mean the grid must grow, zero or negative values mean it
//! already has enough room. [`tailor`] only ever grows a grid.

use crate::{Generator, MergeError, Result};
use table_model::{Address, CellSlot, Grid, GridRow};

/// Additional rows and columns a grid needs to reach a target size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub row_delta: isize,
    pub col_delta: isize,
}

impl Delta {
    pub fn new(row_delta: isize, col_delta: isize) -> Self {
        Self {
            row_delta,
            col_delta,
        }
    }

    /// Rows to append, never negative
    pub fn rows_needed(&self) -> usize {
        self.row_delta.max(0).unsigned_abs()
    }

    /// Columns to append, never negative
    pub fn cols_needed(&self) -> usize {
        self.col_delta.max(0).unsigned_abs()
    }

    /// Whether the grid already has enough room on both axes
    pub fn is_satisfied(&self) -> bool {
        self.row_delta <= 0 && self.col_delta <= 0
    }
}

fn signed(value: usize) -> Result<isize> {
    isize::try_from(value)
        .map_err(|_| MergeError::InvalidArgument(format!("grid dimension {value} is too large")))
}

/// How much `host` must grow for `foreign`, anchored at `start`, to fit.
///
/// Fails when `start` lies outside the host. A start column equal to the
/// host width is allowed and appends to the right edge.
pub fn measure<C>(start: Address, host: &Grid<C>, foreign: &Grid<C>) -> Result<Delta> {
    if start.row >= host.row_count() || start.column > host.column_count() {
        return Err(MergeError::InvalidStartAddress {
            row: start.row,
            column: start.column,
            rows: host.row_count(),
            columns: host.column_count(),
        });
    }

    let rows_remaining = signed(host.row_count() - start.row)?;
    let cols_remaining = signed(host.column_count() - start.column)?;
    let delta = Delta::new(
        signed(foreign.row_count())? - rows_remaining,
        signed(foreign.column_count())? - cols_remaining,
    );
    tracing::trace!(?start, ?delta, "Measured fitment");
    Ok(delta)
}

/// Columns `grid` needs to be as wide as `target`
pub fn measure_width<C>(grid: &Grid<C>, target: &Grid<C>) -> Delta {
    Delta::new(0, target.column_count() as isize - grid.column_count() as isize)
}

/// Rows `grid` needs to be as tall as `target`
pub fn measure_height<C>(grid: &Grid<C>, target: &Grid<C>) -> Delta {
    Delta::new(target.row_count() as isize - grid.row_count() as isize, 0)
}

/// Grow `grid` by `delta`.
///
/// Filler cells come from `generator.cell` and are marked new. Columns are
/// appended at the right, rows at the bottom; new rows copy the section of
/// the last row. Each index in `excluded_columns` then receives a locked
/// filler cell of its own, so that columns the caller keeps write-protected
/// line up with the host without foreign content landing in them. These
/// are in addition to `delta.col_delta`.
pub fn tailor<C, G>(mut grid: Grid<C>, delta: Delta, generator: &G, excluded_columns: &[usize]) -> Grid<C>
where
    G: Generator<C> + ?Sized,
{
    let cols = delta.cols_needed();
    if cols > 0 {
        for row in grid.rows_mut() {
            let cells = row.cells_mut();
            for _ in 0..cols {
                let Some(example) = cells.last() else { break };
                let filler = CellSlot::new_cell(generator.cell(example));
                cells.push(filler);
            }
        }
    }

    if !excluded_columns.is_empty() {
        let mut excluded = excluded_columns.to_vec();
        excluded.sort_unstable();
        excluded.dedup();
        for row in grid.rows_mut() {
            let cells = row.cells_mut();
            for &column in &excluded {
                let at = column.min(cells.len());
                let Some(example) = cells.get(at).or_else(|| cells.last()) else { break };
                let filler = CellSlot::new_cell(generator.cell(example)).locked(true);
                cells.insert(at, filler);
            }
        }
    }

    for _ in 0..delta.rows_needed() {
        let Some(last) = grid.rows().last() else { break };
        let cells = last
            .cells()
            .iter()
            .map(|example| CellSlot::new_cell(generator.cell(example)).locked(example.is_locked))
            .collect();
        let mut row = GridRow::with_section(cells, last.section);
        row.is_new = true;
        grid.push_row(row);
    }

    tracing::trace!(
        ?delta,
        excluded = excluded_columns.len(),
        rows = grid.row_count(),
        columns = grid.column_count(),
        "Tailored grid"
    );
    debug_assert!(grid.is_rectangular());
    grid
}
