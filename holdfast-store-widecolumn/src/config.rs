//! Store configuration.

use serde::{Deserialize, Serialize};

/// Settings for a [`WideColumnStateStore`](crate::WideColumnStateStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The table holding one row per actor. The table's partition key
    /// must be the `actor_id` attribute (see [`crate::schema`]).
    pub table_name: String,
}

impl StoreConfig {
    /// Configuration addressing the given table.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: "states_store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_name() {
        assert_eq!(StoreConfig::default().table_name, "states_store");
    }
}
