#![deny(missing_docs)]
//! In-memory implementation of holdfast's DurableStateStore trait.
//!
//! Uses a `HashMap` behind a `RwLock` for concurrent access, keyed by
//! actor id. Records are stored as-is, no serialization. Suitable for
//! testing, prototyping, and single-process use cases where persistence
//! across restarts is not required.

use async_trait::async_trait;
use holdfast_protocol::error::StateError;
use holdfast_protocol::id::ActorId;
use holdfast_protocol::record::DurableStateRecord;
use holdfast_protocol::store::DurableStateStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory durable-state store backed by a `HashMap` behind a `RwLock`.
pub struct MemoryStateStore {
    records: RwLock<HashMap<ActorId, DurableStateRecord>>,
}

impl MemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of actors with a persisted record.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no actor has a persisted record.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableStateStore for MemoryStateStore {
    async fn write_state(&self, record: DurableStateRecord) -> Result<(), StateError> {
        let mut records = self.records.write().await;
        records.insert(record.actor_id.clone(), record);
        Ok(())
    }

    async fn latest_state(
        &self,
        actor_id: &ActorId,
    ) -> Result<Option<DurableStateRecord>, StateError> {
        let records = self.records.read().await;
        Ok(records.get(actor_id).cloned())
    }

    async fn ping(&self) -> Result<(), StateError> {
        Ok(())
    }
}
