//! Source table - the element tree a table is read from and written back to
//!
//! This mirrors table markup: sections of rows, rows of cells with
//! `rowspan`/`colspan`, and a string attribute map on the table. Cell
//! content is opaque; only the element handle is carried.

use crate::{RowSection, TableConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cell as it appears in table markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCell<C> {
    pub element: C,
    pub rowspan: usize,
    pub colspan: usize,
}

impl<C> SourceCell<C> {
    /// A cell without spans
    pub fn new(element: C) -> Self {
        Self {
            element,
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Set the colspan
    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan;
        self
    }

    /// Set the rowspan
    pub fn with_rowspan(mut self, rowspan: usize) -> Self {
        self.rowspan = rowspan;
        self
    }
}

/// A row as it appears in table markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow<C> {
    pub section: RowSection,
    pub cells: Vec<SourceCell<C>>,
}

impl<C> SourceRow<C> {
    /// A body row
    pub fn body(cells: Vec<SourceCell<C>>) -> Self {
        Self {
            section: RowSection::Body,
            cells,
        }
    }

    /// A header row
    pub fn header(cells: Vec<SourceCell<C>>) -> Self {
        Self {
            section: RowSection::Header,
            cells,
        }
    }

    /// A footer row
    pub fn footer(cells: Vec<SourceCell<C>>) -> Self {
        Self {
            section: RowSection::Footer,
            cells,
        }
    }
}

/// A table as it appears in markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTable<C> {
    pub rows: Vec<SourceRow<C>>,
    /// Table attributes, e.g. the locked column marker
    pub attributes: BTreeMap<String, String>,
}

impl<C> SourceTable<C> {
    pub fn new(rows: Vec<SourceRow<C>>) -> Self {
        Self {
            rows,
            attributes: BTreeMap::new(),
        }
    }

    /// Read the locked column marker using the default attribute name
    pub fn locked_columns(&self) -> Vec<usize> {
        self.locked_columns_with_config(&TableConfig::default())
    }

    /// Read the locked column marker.
    ///
    /// Entries that are not column indices are ignored. The result is sorted
    /// and free of duplicates; range checking against the table width is left
    /// to the warehouse.
    pub fn locked_columns_with_config(&self, config: &TableConfig) -> Vec<usize> {
        let Some(raw) = self.attributes.get(&config.locked_columns_attribute) else {
            return Vec::new();
        };
        let mut columns: Vec<usize> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.parse::<usize>() {
                Ok(column) => Some(column),
                Err(_) => {
                    tracing::warn!("Ignoring malformed locked column entry: {:?}", entry);
                    None
                }
            })
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    /// Write the locked column marker, removing it when `columns` is empty
    pub fn set_locked_columns(&mut self, columns: &[usize], config: &TableConfig) {
        if columns.is_empty() {
            self.attributes.remove(&config.locked_columns_attribute);
        } else {
            let value = columns
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.attributes
                .insert(config.locked_columns_attribute.clone(), value);
        }
    }
}
