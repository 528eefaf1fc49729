//! Test doubles for cell elements, generators, and comparators

use crate::Generator;
use std::cell::Cell;
use table_model::{CellSlot, Grid};

/// Cell element identified by its label and a serial number.
/// Cells built from the same label share identity, so repeated labels form spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCell {
    pub label: String,
    pub serial: usize,
}

impl TestCell {
    pub fn named(label: &str) -> Self {
        Self {
            label: label.to_string(),
            serial: 0,
        }
    }
}

pub fn same(a: &TestCell, b: &TestCell) -> bool {
    a == b
}

/// Filler cells are labelled `?`; replacements keep the source label.
/// Every created cell gets a fresh serial.
#[derive(Debug, Default)]
pub struct TestGenerator {
    next: Cell<usize>,
}

impl TestGenerator {
    fn serial(&self) -> usize {
        let serial = self.next.get() + 1;
        self.next.set(serial);
        serial
    }
}

impl Generator<TestCell> for TestGenerator {
    fn cell(&self, _example: &CellSlot<TestCell>) -> TestCell {
        TestCell {
            label: "?".to_string(),
            serial: self.serial(),
        }
    }

    fn replace(&self, cell: &TestCell) -> TestCell {
        TestCell {
            label: cell.label.clone(),
            serial: self.serial(),
        }
    }

    fn gap(&self) -> TestCell {
        TestCell {
            label: "gap".to_string(),
            serial: self.serial(),
        }
    }
}

pub fn grid(rows: &[&[&str]]) -> Grid<TestCell> {
    Grid::from_elements(
        rows.iter()
            .map(|row| row.iter().map(|label| TestCell::named(label)).collect())
            .collect(),
    )
    .unwrap()
}

pub fn labels(grid: &Grid<TestCell>) -> Vec<Vec<String>> {
    grid.rows()
        .iter()
        .map(|row| row.cells().iter().map(|slot| slot.element.label.clone()).collect())
        .collect()
}
