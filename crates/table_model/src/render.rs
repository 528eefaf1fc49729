//! Rendering contract - turn a grid back into table markup
//!
//! Slots that repeat the same element (per the comparator) collapse back into
//! one cell with `colspan`/`rowspan`. Rows keep their section, and the locked
//! column marker is re-emitted from the grid's locked slots.

use crate::{Grid, SourceCell, SourceRow, SourceTable, TableConfig};

/// Render a grid into a source table using the default configuration
pub fn to_table<C, F>(grid: &Grid<C>, comparator: F) -> SourceTable<C>
where
    C: Clone,
    F: Fn(&C, &C) -> bool,
{
    to_table_with_config(grid, comparator, &TableConfig::default())
}

/// Render a grid into a source table
pub fn to_table_with_config<C, F>(grid: &Grid<C>, comparator: F, config: &TableConfig) -> SourceTable<C>
where
    C: Clone,
    F: Fn(&C, &C) -> bool,
{
    let row_count = grid.row_count();
    let column_count = grid.column_count();
    let mut visited = vec![vec![false; column_count]; row_count];
    let mut rows = Vec::with_capacity(row_count);

    for (r, grid_row) in grid.rows().iter().enumerate() {
        let mut cells = Vec::new();
        for c in 0..column_count {
            if visited[r][c] {
                continue;
            }
            let element = &grid_row.cells()[c].element;

            let colspan = 1 + (c + 1..column_count)
                .take_while(|&next| !visited[r][next] && comparator(element, &grid_row.cells()[next].element))
                .count();

            // Spans never leave their section
            let rowspan = 1 + (r + 1..row_count)
                .take_while(|&next| {
                    let below = &grid.rows()[next];
                    below.section == grid_row.section
                        && (c..c + colspan).all(|col| {
                            !visited[next][col] && comparator(element, &below.cells()[col].element)
                        })
                })
                .count();

            for row in visited.iter_mut().skip(r).take(rowspan) {
                for slot in row.iter_mut().skip(c).take(colspan) {
                    *slot = true;
                }
            }

            cells.push(SourceCell {
                element: element.clone(),
                rowspan,
                colspan,
            });
        }
        rows.push(SourceRow {
            section: grid_row.section,
            cells,
        });
    }

    let mut table = SourceTable::new(rows);
    table.set_locked_columns(&grid.locked_columns(), config);
    table
}
