//! The backend client contract and an in-process implementation.

use crate::attribute::{AttributeValue, Item};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors from the backend client.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed table does not exist.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The item or key is missing the table's partition-key attribute.
    #[error("item for table {table} is missing key attribute {attribute}")]
    MissingKeyAttribute {
        /// The addressed table.
        table: String,
        /// The partition-key attribute the table expects.
        attribute: String,
    },

    /// Network or backend-side failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A wide-column key-value backend.
///
/// Two data operations, both addressing a single row by partition key:
/// an upsert that fully replaces the row, and a point lookup. `list_tables`
/// exists for liveness checks. Implementations must be safe to share
/// across tasks; the store holds one client for its whole lifetime.
#[async_trait]
pub trait WideColumnClient: Send + Sync {
    /// Insert or fully replace the row sharing `item`'s partition key.
    async fn put_item(&self, table: &str, item: Item) -> Result<(), ClientError>;

    /// Look up a single row. `key` carries the partition-key attribute.
    /// Returns `Ok(None)` if no row matches.
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, ClientError>;

    /// List table names. A cheap round trip to verify the backend is up.
    async fn list_tables(&self) -> Result<Vec<String>, ClientError>;
}

struct Table {
    key_attribute: String,
    rows: HashMap<AttributeValue, Item>,
}

/// In-process wide-column backend.
///
/// Tables are created explicitly with a partition-key attribute, rows
/// live in a `HashMap` behind a `RwLock`. Used by the test suites and
/// handy for local development; it has the same upsert/point-lookup
/// semantics a hosted wide-column service offers.
pub struct MemoryClient {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryClient {
    /// Create a client with no tables.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a table keyed by the given partition-key attribute.
    /// Recreating an existing table drops its rows.
    pub async fn create_table(&self, name: impl Into<String>, key_attribute: impl Into<String>) {
        let mut tables = self.tables.write().await;
        tables.insert(
            name.into(),
            Table {
                key_attribute: key_attribute.into(),
                rows: HashMap::new(),
            },
        );
    }

    /// Number of rows in a table, if it exists.
    pub async fn row_count(&self, table: &str) -> Option<usize> {
        let tables = self.tables.read().await;
        tables.get(table).map(|t| t.rows.len())
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

fn key_of(table: &str, key_attribute: &str, item: &Item) -> Result<AttributeValue, ClientError> {
    item.get(key_attribute)
        .cloned()
        .ok_or_else(|| ClientError::MissingKeyAttribute {
            table: table.to_string(),
            attribute: key_attribute.to_string(),
        })
}

#[async_trait]
impl WideColumnClient for MemoryClient {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), ClientError> {
        let mut tables = self.tables.write().await;
        let entry = tables
            .get_mut(table)
            .ok_or_else(|| ClientError::TableNotFound(table.to_string()))?;
        let key = key_of(table, &entry.key_attribute, &item)?;
        entry.rows.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, ClientError> {
        let tables = self.tables.read().await;
        let entry = tables
            .get(table)
            .ok_or_else(|| ClientError::TableNotFound(table.to_string()))?;
        let key = key_of(table, &entry.key_attribute, &key)?;
        Ok(entry.rows.get(&key).cloned())
    }

    async fn list_tables(&self) -> Result<Vec<String>, ClientError> {
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}
