//! Default cell element: an identity shared by every slot a cell covers,
//! plus its text content

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(Uuid);

impl CellId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

/// A table cell. Grid slots covered by one spanning cell hold clones with
/// the same [`CellId`]; compare them with [`TableCell::same_cell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub id: CellId,
    pub content: String,
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: CellId::new(),
            content: content.into(),
        }
    }

    /// A cell with no content
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// The same content under a fresh identity
    pub fn duplicate(&self) -> Self {
        Self::new(self.content.clone())
    }

    /// Whether two elements are slots of the same cell
    pub fn same_cell(a: &TableCell, b: &TableCell) -> bool {
        a.id == b.id
    }
}
