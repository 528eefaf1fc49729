//! Table-level operations
//!
//! Each operation reads the host table and the fragment into grids through
//! the warehouse, runs the grid operation, and renders the result back into
//! a table. Holes in ragged tables are filled with `generator.gap()` cells.

use crate::{merge, Generator, Result};
use table_model::{render, Address, Grid, SourceTable, TableConfig, Warehouse};

fn read_grid<C, G>(table: &SourceTable<C>, generator: &G, config: &TableConfig) -> Result<Grid<C>>
where
    C: Clone,
    G: Generator<C> + ?Sized,
{
    let grid = Warehouse::from_table_with_config(table, config).to_grid(|| generator.gap())?;
    Ok(grid)
}

/// Paste the cells of `fragment` into `host` at `address`
pub fn paste_cells<C, G, F>(
    host: &SourceTable<C>,
    fragment: &SourceTable<C>,
    address: Address,
    generator: &G,
    comparator: F,
    config: &TableConfig,
) -> Result<SourceTable<C>>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    let host_grid = read_grid(host, generator, config)?;
    let fragment_grid = read_grid(fragment, generator, config)?;
    let merged = merge::merge(address, host_grid, &fragment_grid, generator, &comparator)?;
    Ok(render::to_table_with_config(&merged, &comparator, config))
}

/// Insert the columns of `fragment` into `host` before column `index`
pub fn paste_cols<C, G, F>(
    host: &SourceTable<C>,
    fragment: &SourceTable<C>,
    index: usize,
    generator: &G,
    comparator: F,
    config: &TableConfig,
) -> Result<SourceTable<C>>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    let host_grid = read_grid(host, generator, config)?;
    let fragment_grid = read_grid(fragment, generator, config)?;
    let inserted = merge::insert_cols(index, host_grid, fragment_grid, generator, &comparator);
    Ok(render::to_table_with_config(&inserted, &comparator, config))
}

/// Insert the rows of `fragment` into `host` before row `index`
pub fn paste_rows<C, G, F>(
    host: &SourceTable<C>,
    fragment: &SourceTable<C>,
    index: usize,
    generator: &G,
    comparator: F,
    config: &TableConfig,
) -> Result<SourceTable<C>>
where
    C: Clone,
    G: Generator<C> + ?Sized,
    F: Fn(&C, &C) -> bool,
{
    let host_grid = read_grid(host, generator, config)?;
    let fragment_grid = read_grid(fragment, generator, config)?;
    let inserted = merge::insert_rows(index, host_grid, fragment_grid, generator, &comparator);
    Ok(render::to_table_with_config(&inserted, &comparator, config))
}
