//! Merging operations - split spanning cells so writes never leave partial spans
//!
//! Each function rewrites the grid in place. `substitution` fabricates the
//! replacement element for a slot; it receives the slot being replaced as an
//! example. Replaced slots are marked new and keep their locked flag.

use table_model::{CellSlot, Grid};

/// Break the span of `target` into independent cells.
///
/// Slots in locked columns are write-protected. When the span covers any of
/// them, those slots keep `target` and every other slot gets its own freshly
/// fabricated cell. Otherwise the first slot holding `target`, in reading
/// order, keeps it.
pub fn unmerge<C, F, S>(grid: &mut Grid<C>, target: &C, comparator: F, mut substitution: S)
where
    F: Fn(&C, &C) -> bool,
    S: FnMut(&CellSlot<C>) -> C,
{
    let covers_locked = grid
        .rows()
        .iter()
        .flat_map(|row| row.cells())
        .any(|slot| slot.is_locked && comparator(&slot.element, target));

    let mut keep_first = !covers_locked;
    let mut replaced = 0;
    for row in grid.rows_mut() {
        for slot in row.cells_mut().iter_mut() {
            if !comparator(&slot.element, target) || slot.is_locked {
                continue;
            }
            if keep_first {
                keep_first = false;
                continue;
            }
            let element = substitution(slot);
            *slot = CellSlot::new_cell(element);
            replaced += 1;
        }
    }
    tracing::trace!(replaced, covers_locked, "Unmerged spanning cell");
}

/// Make column `index` a clean boundary: any cell spanning across it is cut
/// in two. The part right of the boundary becomes one new cell shared by all
/// the slots it covered, so it keeps its rectangular shape.
///
/// Inserting at the first or last column never bisects a span, so those
/// indices leave the grid untouched.
pub fn split_cols<C, F, S>(grid: &mut Grid<C>, index: usize, comparator: F, mut substitution: S)
where
    C: Clone,
    F: Fn(&C, &C) -> bool,
    S: FnMut(&CellSlot<C>) -> C,
{
    if index == 0 || index >= grid.column_count() {
        return;
    }

    let boundary: Vec<C> = unique_elements(
        grid.rows()
            .iter()
            .filter_map(|row| row.get_cell_element(index - 1)),
        &comparator,
    );

    for cell in boundary {
        let mut replacement: Option<C> = None;
        for row in grid.rows_mut() {
            for slot in row.cells_mut().iter_mut().skip(index) {
                if comparator(&slot.element, &cell) {
                    let element = match &replacement {
                        Some(element) => element.clone(),
                        None => {
                            let element = substitution(slot);
                            replacement = Some(element.clone());
                            element
                        }
                    };
                    *slot = CellSlot::new_cell(element).locked(slot.is_locked);
                }
            }
        }
    }
}

/// Make row `index` a clean boundary: any cell spanning across it is cut in
/// two, the lower part becoming one new cell.
///
/// Inserting at the first or last row never bisects a span, so those
/// indices leave the grid untouched.
pub fn split_rows<C, F, S>(grid: &mut Grid<C>, index: usize, comparator: F, mut substitution: S)
where
    C: Clone,
    F: Fn(&C, &C) -> bool,
    S: FnMut(&CellSlot<C>) -> C,
{
    if index == 0 || index >= grid.row_count() {
        return;
    }

    let boundary: Vec<C> = match grid.row(index - 1) {
        Some(row) => unique_elements(row.cells().iter().map(|slot| &slot.element), &comparator),
        None => return,
    };

    for cell in boundary {
        let mut replacement: Option<C> = None;
        for row in grid.rows_mut().iter_mut().skip(index) {
            for slot in row.cells_mut().iter_mut() {
                if comparator(&slot.element, &cell) {
                    let element = match &replacement {
                        Some(element) => element.clone(),
                        None => {
                            let element = substitution(slot);
                            replacement = Some(element.clone());
                            element
                        }
                    };
                    *slot = CellSlot::new_cell(element).locked(slot.is_locked);
                }
            }
        }
    }
}

fn unique_elements<'a, C, F, I>(elements: I, comparator: &F) -> Vec<C>
where
    C: Clone + 'a,
    F: Fn(&C, &C) -> bool,
    I: IntoIterator<Item = &'a C>,
{
    let mut unique: Vec<C> = Vec::new();
    for element in elements {
        if !unique.iter().any(|seen| comparator(seen, element)) {
            unique.push(element.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grid, labels, same, TestCell, TestGenerator};
    use crate::Generator;

    #[test]
    fn test_unmerge_keeps_first_slot() {
        let generator = TestGenerator::default();
        let mut g = grid(&[&["A1", "A1", "C1"], &["A1", "A1", "C2"]]);
        unmerge(&mut g, &TestCell::named("A1"), same, |slot| generator.cell(slot));

        assert_eq!(
            labels(&g),
            vec![vec!["A1", "?", "C1"], vec!["?", "?", "C2"]]
        );
        assert!(!g.get_cell(0, 0).unwrap().is_new);
        assert!(g.get_cell(1, 1).unwrap().is_new);
        // Every replacement is an independent cell
        assert_ne!(g.get_cell_element(0, 1), g.get_cell_element(1, 0));
        assert_ne!(g.get_cell_element(1, 0), g.get_cell_element(1, 1));
    }

    #[test]
    fn test_unmerge_without_span_is_noop() {
        let generator = TestGenerator::default();
        let mut g = grid(&[&["A1", "B1"], &["A2", "B2"]]);
        let before = g.clone();
        unmerge(&mut g, &TestCell::named("B1"), same, |slot| generator.cell(slot));
        assert_eq!(g, before);
    }

    #[test]
    fn test_unmerge_span_over_locked_column_keeps_only_locked_slots() {
        let generator = TestGenerator::default();
        let mut g = grid(&[&["A", "A", "C1"], &["A", "A", "C2"]]);
        for row in g.rows_mut() {
            row.cells_mut()[1].is_locked = true;
        }
        unmerge(&mut g, &TestCell::named("A"), same, |slot| generator.cell(slot));

        assert_eq!(labels(&g), vec![vec!["?", "A", "C1"], vec!["?", "A", "C2"]]);
        assert_ne!(g.get_cell_element(0, 0), g.get_cell_element(1, 0));
        assert!(!g.get_cell(0, 1).unwrap().is_new);
    }

    #[test]
    fn test_unmerge_leaves_locked_slots() {
        let generator = TestGenerator::default();
        let mut g = grid(&[&["A1", "A1"], &["A1", "A1"]]);
        for row in g.rows_mut() {
            row.cells_mut()[0].is_locked = true;
        }
        unmerge(&mut g, &TestCell::named("A1"), same, |slot| generator.cell(slot));
        assert_eq!(labels(&g), vec![vec!["A1", "?"], vec!["A1", "?"]]);
        assert!(!g.get_cell(1, 0).unwrap().is_new);
    }

    #[test]
    fn test_split_cols_cuts_spans_at_boundary() {
        let generator = TestGenerator::default();
        let mut g = grid(&[
            &["A1", "A1", "A1"],
            &["A2", "B2", "B2"],
            &["A2", "B2", "B2"],
        ]);
        split_cols(&mut g, 1, same, |slot| generator.cell(slot));

        assert_eq!(labels(&g)[0], vec!["A1", "?", "?"]);
        // Right part of the colspan stays a single cell
        assert_eq!(g.get_cell_element(0, 1), g.get_cell_element(0, 2));
        assert_ne!(g.get_cell_element(0, 0), g.get_cell_element(0, 1));
        // Spans not crossing the boundary are untouched
        assert_eq!(labels(&g)[1], vec!["A2", "B2", "B2"]);
        assert_eq!(g.get_cell_element(1, 0), g.get_cell_element(2, 0));
    }

    #[test]
    fn test_split_cols_at_edges_is_noop() {
        let generator = TestGenerator::default();
        let mut g = grid(&[&["A1", "A1"]]);
        let before = g.clone();
        split_cols(&mut g, 0, same, |slot| generator.cell(slot));
        split_cols(&mut g, 2, same, |slot| generator.cell(slot));
        assert_eq!(g, before);
    }

    #[test]
    fn test_split_rows_cuts_rowspans() {
        let generator = TestGenerator::default();
        let mut g = grid(&[
            &["A1", "B1"],
            &["A1", "B2"],
            &["A1", "B3"],
        ]);
        split_rows(&mut g, 1, same, |slot| generator.cell(slot));

        assert_eq!(
            labels(&g),
            vec![vec!["A1", "B1"], vec!["?", "B2"], vec!["?", "B3"]]
        );
        // Lower part stays one cell spanning two rows
        assert_eq!(g.get_cell_element(1, 0), g.get_cell_element(2, 0));
        assert!(g.get_cell(1, 0).unwrap().is_new);
    }
}
