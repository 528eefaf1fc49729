//! Table merge - paste a foreign grid into a host grid, or insert whole
//! rows or columns of it
//!
//! Every operation takes the host grid by value and returns the new grid.
//! Internally the host is rewritten in place: spans that a write would cut
//! are split first, then foreign cells overwrite host slots. Locked columns
//! of the host are never written to.

use crate::fitment::{self, Delta};
use crate::merging;
use crate::{Generator, Result};
use table_model::{Address, CellSlot, Grid};

/// Locked column indices of a grid, ascending. Empty for grids that were
/// not read from a table with locked columns.
pub fn get_locked_columns<C>(grid: &Grid<C>) -> Vec<usize> {
    grid.locked_columns()
}

/// Move a requested start address off locked columns.
///
/// The column shifts right to the nearest unlocked column within the grid.
/// When there is none, it falls back to the last column.
pub fn get_valid_start_address<C>(requested: Address, grid: &Grid<C>, locked_columns: &[usize]) -> Address {
    let width = grid.column_count();
    let column = (requested.column..width)
        .find(|column| !locked_columns.contains(column))
        .unwrap_or_else(|| width.saturating_sub(1));

    if column != requested.column {
        tracing::debug!(
            requested = requested.column,
            column,
            "Shifted start column off locked columns"
        );
    }
    Address {
        column,
        ..requested
    }
}

/// Whether the cell at `(row, column)` spans into one of its four neighbours.
///
/// Grids with a single row, or rows with a single cell, are treated as
/// having no spans.
pub fn is_spanning<C, F>(grid: &Grid<C>, row: usize, column: usize, comparator: F) -> bool
where
    F: Fn(&C, &C) -> bool,
{
    let Some(current_row) = grid.row(row) else {
        return false;
    };
    let Some(candidate) = current_row.get_cell_element(column) else {
        return false;
    };
    let matching = |other: Option<&C>| other.is_some_and(|other| comparator(candidate, other));

    grid.row_count() > 1
        && current_row.cell_length() > 1
        && ((column > 0 && matching(current_row.get_cell_element(column - 1)))
            || matching(current_row.get_cell_element(column + 1))
            || (row > 0 && matching(grid.get_cell_element(row - 1, column)))
            || matching(grid.get_cell_element(row + 1, column)))
}

/// Locked columns the foreign grid has to step over when laid out from
/// `start_column`: walking right, every unlocked column takes one foreign
/// column until all `width` are placed.
fn locked_within_footprint(locked_columns: &[usize], start_column: usize, width: usize) -> Vec<usize> {
    let mut within = Vec::new();
    let mut placed = 0;
    let mut column = start_column;
    while placed < width {
        if locked_columns.contains(&column) {
            within.push(column);
        } else {
            placed += 1;
        }
        column += 1;
    }
    within
}

/// Paste `foreign` into `host` with its top-left cell at `start_address`.
///
/// The start column is moved off locked columns first, and the host grows
/// as needed, including one extra column per locked column the pasted
/// cells step over. Fails only when the start row lies outside the host.
pub fn merge<C, G, F>(
    start_address: Address,
    host: Grid<C>,
    foreign: &Grid<C>,
    generator: &G,
    comparator: F,
) -> Result<Grid<C>>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    let locked_columns = get_locked_columns(&host);
    let start = get_valid_start_address(start_address, &host, &locked_columns);
    let footprint_locked = locked_within_footprint(&locked_columns, start.column, foreign.column_count());

    let measured = fitment::measure(start, &host, foreign)?;
    let delta = Delta {
        col_delta: measured.col_delta + footprint_locked.len() as isize,
        ..measured
    };
    tracing::debug!(?start, ?delta, locked = ?footprint_locked, "Merging grid");

    let mut grid = fitment::tailor(host, delta, generator, &[]);
    merge_tables(start, &mut grid, foreign, generator, &comparator, &footprint_locked);
    debug_assert!(grid.is_rectangular());
    Ok(grid)
}

fn merge_tables<C, G, F>(
    start: Address,
    grid: &mut Grid<C>,
    foreign: &Grid<C>,
    generator: &G,
    comparator: &F,
    locked_columns: &[usize],
) where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    let end_row = start.row + foreign.row_count();
    let end_col = start.column + foreign.column_count() + locked_columns.len();
    // One replacement per foreign cell and contiguous run: a foreign span
    // stays a span, but a locked column it straddles splits it in two
    let mut replacements: Vec<(C, usize, C)> = Vec::new();

    for r in start.row..end_row {
        let mut skipped = 0;
        for c in start.column..end_col {
            if locked_columns.contains(&c) {
                skipped += 1;
                continue;
            }

            if is_spanning(grid, r, c, comparator) {
                if let Some(target) = grid.get_cell_element(r, c).cloned() {
                    merging::unmerge(grid, &target, comparator, |slot| generator.cell(slot));
                }
            }

            let Some(source) = foreign.get_cell_element(r - start.row, c - start.column - skipped) else {
                continue;
            };
            let existing = replacements
                .iter()
                .find(|(original, run, _)| *run == skipped && comparator(original, source))
                .map(|(_, _, replacement)| replacement.clone());
            let replacement = match existing {
                Some(replacement) => replacement,
                None => {
                    let replacement = generator.replace(source);
                    replacements.push((source.clone(), skipped, replacement.clone()));
                    replacement
                }
            };
            grid.mutate_cell(r, c, CellSlot::new_cell(replacement));
        }
    }
}

/// Foreign content enters the host as new, unlocked cells
fn as_foreign<C>(mut grid: Grid<C>) -> Grid<C> {
    for row in grid.rows_mut() {
        row.is_new = true;
        for slot in row.cells_mut().iter_mut() {
            slot.is_new = true;
            slot.is_locked = false;
        }
    }
    grid
}

/// Insert every column of `foreign` into `host` before column `index`.
///
/// Spans crossing the insertion boundary are split first. Whichever grid is
/// shorter is padded with filler rows so the heights match.
pub fn insert_cols<C, G, F>(index: usize, host: Grid<C>, foreign: Grid<C>, generator: &G, comparator: F) -> Grid<C>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    debug_assert!(index <= host.column_count());
    let index = index.min(host.column_count());
    let mut host = host;
    merging::split_cols(&mut host, index, &comparator, |slot| generator.cell(slot));

    let foreign = as_foreign(foreign);
    let delta = fitment::measure_height(&foreign, &host);
    let fitted_new = fitment::tailor(foreign, delta, generator, &[]);

    let second_delta = fitment::measure_height(&host, &fitted_new);
    let mut fitted_old = fitment::tailor(host, second_delta, generator, &[]);

    for (row, new_row) in fitted_old.rows_mut().iter_mut().zip(fitted_new.into_rows()) {
        let mut cells = row.set_cells(Vec::new());
        let tail = cells.split_off(index);
        cells.extend(new_row.into_cells());
        cells.extend(tail);
        row.set_cells(cells);
    }

    tracing::debug!(
        index,
        rows = fitted_old.row_count(),
        columns = fitted_old.column_count(),
        "Inserted columns"
    );
    debug_assert!(fitted_old.is_rectangular());
    fitted_old
}

/// Insert every row of `foreign` into `host` before row `index`.
///
/// Spans crossing the insertion boundary are split first. The foreign rows
/// receive a locked filler cell at each locked host column, so the host's
/// locked columns count as width they already have; whichever grid is then
/// narrower is padded with filler columns. The inserted rows join the table
/// section they land in.
pub fn insert_rows<C, G, F>(index: usize, host: Grid<C>, foreign: Grid<C>, generator: &G, comparator: F) -> Grid<C>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    debug_assert!(index <= host.row_count());
    let index = index.min(host.row_count());
    let mut host = host;
    merging::split_rows(&mut host, index, &comparator, |slot| generator.cell(slot));

    let locked_columns = get_locked_columns(&host);
    let foreign = as_foreign(foreign);
    let measured = fitment::measure_width(&foreign, &host);
    let delta = Delta {
        col_delta: measured.col_delta - locked_columns.len() as isize,
        ..measured
    };
    let fitted_new = fitment::tailor(foreign, delta, generator, &locked_columns);

    // The foreign rows already carry cells for the locked columns
    let second_delta = fitment::measure_width(&host, &fitted_new);
    let mut fitted_old = fitment::tailor(host, second_delta, generator, &[]);

    fitted_old.insert_rows(index, fitted_new.into_rows());

    tracing::debug!(
        index,
        rows = fitted_old.row_count(),
        columns = fitted_old.column_count(),
        "Inserted rows"
    );
    debug_assert!(fitted_old.is_rectangular());
    fitted_old
}
