//! Table reading configuration

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Attribute holding the comma-separated list of locked column indices
pub const LOCKED_COLUMNS_ATTRIBUTE: &str = "data-snooker-locked-cols";

/// Largest colspan honoured when reading a table
pub const MAX_COLSPAN: usize = 1000;

/// Largest rowspan honoured when reading a table
pub const MAX_ROWSPAN: usize = 65534;

/// Settings used when converting tables to and from grids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Name of the table attribute listing locked columns
    pub locked_columns_attribute: String,
    /// Upper bound applied to colspan values
    pub max_colspan: usize,
    /// Upper bound applied to rowspan values
    pub max_rowspan: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            locked_columns_attribute: LOCKED_COLUMNS_ATTRIBUTE.to_string(),
            max_colspan: MAX_COLSPAN,
            max_rowspan: MAX_ROWSPAN,
        }
    }
}

impl TableConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used
    pub fn validate(&self) -> Result<()> {
        if self.locked_columns_attribute.trim().is_empty() {
            return Err(ModelError::InvalidConfig(
                "locked_columns_attribute must not be empty".to_string(),
            ));
        }
        if self.max_colspan == 0 || self.max_rowspan == 0 {
            return Err(ModelError::InvalidConfig(
                "span limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp a colspan read from a table into `1..=max_colspan`
    pub fn clamp_colspan(&self, colspan: usize) -> usize {
        colspan.clamp(1, self.max_colspan.max(1))
    }

    /// Clamp a rowspan read from a table into `1..=max_rowspan`
    pub fn clamp_rowspan(&self, rowspan: usize) -> usize {
        rowspan.clamp(1, self.max_rowspan.max(1))
    }
}
