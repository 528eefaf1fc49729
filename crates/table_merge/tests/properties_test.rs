//! Property tests for the grid operations

use proptest::prelude::*;
use std::collections::HashMap;
use table_merge::fitment::{measure, tailor};
use table_merge::{insert_cols, insert_rows, merge, TableCellGenerator};
use table_model::{Address, CellId, Grid, SourceCell, SourceRow, SourceTable, TableCell, Warehouse};

/// Tile a `rows` x `columns` table with rectangular cells, taking the span of
/// each new cell from `spans` in turn, and read it through the warehouse
fn spanned_grid(rows: usize, columns: usize, spans: &[(usize, usize)]) -> Grid<TableCell> {
    let mut taken = vec![vec![false; columns]; rows];
    let mut source_rows: Vec<Vec<SourceCell<TableCell>>> = (0..rows).map(|_| Vec::new()).collect();
    let mut spans = spans.iter().cycle();

    for r in 0..rows {
        for c in 0..columns {
            if taken[r][c] {
                continue;
            }
            let (rowspan, colspan) = spans.next().copied().unwrap_or((1, 1));
            let colspan = (c..columns).take(colspan).take_while(|&col| !taken[r][col]).count();
            let rowspan = (r..rows)
                .take(rowspan)
                .take_while(|&row| (c..c + colspan).all(|col| !taken[row][col]))
                .count();
            for row in taken.iter_mut().skip(r).take(rowspan) {
                for slot in row.iter_mut().skip(c).take(colspan) {
                    *slot = true;
                }
            }
            source_rows[r].push(
                SourceCell::new(TableCell::new(format!("{r}:{c}")))
                    .with_rowspan(rowspan)
                    .with_colspan(colspan),
            );
        }
    }

    let table = SourceTable::new(source_rows.into_iter().map(SourceRow::body).collect());
    Warehouse::from_table(&table).to_grid(TableCell::empty).unwrap()
}

fn lock_columns(grid: &mut Grid<TableCell>, locked: &[usize]) {
    for row in grid.rows_mut() {
        for &column in locked {
            if let Some(slot) = row.cells_mut().get_mut(column) {
                slot.is_locked = true;
            }
        }
    }
}

/// Cells whose slots do not form a filled rectangle. Cells left only in
/// locked columns are host content that must stay as it was, so they are
/// not checked.
fn broken_spans(grid: &Grid<TableCell>) -> Vec<CellId> {
    let mut slots: HashMap<CellId, Vec<(usize, usize, bool)>> = HashMap::new();
    for (r, row) in grid.rows().iter().enumerate() {
        for (c, slot) in row.cells().iter().enumerate() {
            slots.entry(slot.element.id).or_default().push((r, c, slot.is_locked));
        }
    }

    slots
        .into_iter()
        .filter(|(_, positions)| positions.iter().any(|&(_, _, locked)| !locked))
        .filter(|(_, positions)| {
            let top = positions.iter().map(|p| p.0).min().unwrap_or(0);
            let bottom = positions.iter().map(|p| p.0).max().unwrap_or(0);
            let left = positions.iter().map(|p| p.1).min().unwrap_or(0);
            let right = positions.iter().map(|p| p.1).max().unwrap_or(0);
            (bottom - top + 1) * (right - left + 1) != positions.len()
        })
        .map(|(id, _)| id)
        .collect()
}

fn spans() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((1usize..4, 1usize..4), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn merge_leaves_every_cell_rectangular(
        rows in 2usize..6,
        columns in 2usize..6,
        host_spans in spans(),
        locks in prop::collection::vec(any::<bool>(), 6),
        foreign_rows in 1usize..4,
        foreign_columns in 1usize..4,
        foreign_spans in spans(),
        start_row in 0usize..6,
        start_column in 0usize..6,
    ) {
        let locked: Vec<usize> = (0..columns).filter(|&c| locks[c]).collect();
        let mut host = spanned_grid(rows, columns, &host_spans);
        lock_columns(&mut host, &locked);
        let before = host.clone();
        let foreign = spanned_grid(foreign_rows, foreign_columns, &foreign_spans);
        let start = Address::new(start_row.min(rows - 1), start_column.min(columns - 1));

        let merged = merge(start, host, &foreign, &TableCellGenerator, TableCell::same_cell).unwrap();

        prop_assert!(merged.is_rectangular());
        prop_assert!(merged.row_count() >= rows);
        prop_assert!(merged.column_count() >= columns);
        prop_assert!(broken_spans(&merged).is_empty());
        for r in 0..rows {
            for &column in &locked {
                prop_assert_eq!(merged.get_cell(r, column), before.get_cell(r, column));
            }
        }
        prop_assert_eq!(merged.locked_columns(), locked);
    }

    #[test]
    fn tailor_then_measure_is_satisfied(
        rows in 1usize..6,
        columns in 1usize..6,
        foreign_rows in 1usize..6,
        foreign_columns in 1usize..6,
        start_row in 0usize..6,
        start_column in 0usize..7,
    ) {
        let host = spanned_grid(rows, columns, &[]);
        let foreign = spanned_grid(foreign_rows, foreign_columns, &[]);
        let start = Address::new(start_row.min(rows - 1), start_column.min(columns));

        let delta = measure(start, &host, &foreign).unwrap();
        let tailored = tailor(host, delta, &TableCellGenerator, &[]);
        let remeasured = measure(start, &tailored, &foreign).unwrap();
        prop_assert!(remeasured.is_satisfied());
        prop_assert_eq!(tailored.row_count(), rows + delta.rows_needed());
        prop_assert_eq!(tailored.column_count(), columns + delta.cols_needed());
    }

    #[test]
    fn insert_cols_adds_every_foreign_column(
        rows in 1usize..6,
        columns in 1usize..6,
        host_spans in spans(),
        foreign_rows in 1usize..6,
        foreign_columns in 1usize..4,
        index in 0usize..7,
    ) {
        let host = spanned_grid(rows, columns, &host_spans);
        let foreign = spanned_grid(foreign_rows, foreign_columns, &[]);
        let first_foreign = foreign.get_cell_element(0, 0).cloned();
        let index = index.min(columns);

        let inserted = insert_cols(index, host, foreign, &TableCellGenerator, TableCell::same_cell);
        prop_assert!(inserted.is_rectangular());
        prop_assert_eq!(inserted.column_count(), columns + foreign_columns);
        prop_assert_eq!(inserted.row_count(), rows.max(foreign_rows));
        prop_assert_eq!(inserted.get_cell_element(0, index).cloned(), first_foreign);
        prop_assert!(broken_spans(&inserted).is_empty());
    }

    #[test]
    fn insert_rows_adds_every_foreign_row(
        rows in 2usize..6,
        columns in 2usize..6,
        host_spans in spans(),
        locks in prop::collection::vec(any::<bool>(), 6),
        foreign_rows in 1usize..4,
        foreign_columns in 1usize..6,
        index in 0usize..7,
    ) {
        let locked: Vec<usize> = (0..columns).filter(|&c| locks[c]).collect();
        let mut host = spanned_grid(rows, columns, &host_spans);
        lock_columns(&mut host, &locked);
        let foreign = spanned_grid(foreign_rows, foreign_columns, &[]);
        let index = index.min(rows);

        let inserted = insert_rows(index, host, foreign, &TableCellGenerator, TableCell::same_cell);
        prop_assert!(inserted.is_rectangular());
        prop_assert_eq!(inserted.row_count(), rows + foreign_rows);
        prop_assert_eq!(inserted.column_count(), columns.max(foreign_columns + locked.len()));
        for &column in &locked {
            prop_assert!(inserted.rows()[index].cells()[column].is_locked);
        }
    }
}
