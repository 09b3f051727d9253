//! The wide-column durable-state store.

use crate::client::WideColumnClient;
use crate::config::StoreConfig;
use crate::schema;
use async_trait::async_trait;
use holdfast_protocol::error::StateError;
use holdfast_protocol::id::ActorId;
use holdfast_protocol::payload::PayloadRegistry;
use holdfast_protocol::record::DurableStateRecord;
use holdfast_protocol::store::DurableStateStore;
use std::sync::Arc;

/// Durable-state store over a wide-column key-value backend.
///
/// Owns its backend client as a shared handle for the store's whole
/// lifetime; nothing is re-acquired per call. The store itself holds no
/// mutable state and no cache, so every read goes to the backend and any
/// number of callers can use it concurrently. Backend errors are wrapped
/// with context and surfaced to the caller; nothing is retried here.
pub struct WideColumnStateStore {
    client: Arc<dyn WideColumnClient>,
    config: StoreConfig,
    registry: Arc<PayloadRegistry>,
}

impl WideColumnStateStore {
    /// Build a store over an established client, using the default table
    /// name.
    ///
    /// The registry must already contain every payload type that can
    /// appear in storage; reads resolve against it.
    pub fn new(client: Arc<dyn WideColumnClient>, registry: Arc<PayloadRegistry>) -> Self {
        Self::with_config(client, StoreConfig::default(), registry)
    }

    /// Build a store with explicit configuration.
    pub fn with_config(
        client: Arc<dyn WideColumnClient>,
        config: StoreConfig,
        registry: Arc<PayloadRegistry>,
    ) -> Self {
        Self {
            client,
            config,
            registry,
        }
    }

    /// The table this store addresses.
    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }
}

#[async_trait]
impl DurableStateStore for WideColumnStateStore {
    async fn write_state(&self, record: DurableStateRecord) -> Result<(), StateError> {
        let item = schema::record_to_item(&record)?;
        tracing::debug!(
            actor_id = %record.actor_id,
            version = record.version_number,
            table = %self.config.table_name,
            "upserting state"
        );
        self.client
            .put_item(&self.config.table_name, item)
            .await
            .map_err(|e| StateError::Backend(format!("failed to upsert state: {e}")))
    }

    async fn latest_state(
        &self,
        actor_id: &ActorId,
    ) -> Result<Option<DurableStateRecord>, StateError> {
        let key = schema::key_for(actor_id);
        tracing::debug!(
            actor_id = %actor_id,
            table = %self.config.table_name,
            "fetching latest state"
        );
        let item = self
            .client
            .get_item(&self.config.table_name, key)
            .await
            .map_err(|e| StateError::Backend(format!("failed to fetch the latest state: {e}")))?;

        match item {
            None => Ok(None),
            Some(item) => schema::item_to_record(actor_id, &item, &self.registry).map(Some),
        }
    }

    async fn ping(&self) -> Result<(), StateError> {
        self.client
            .list_tables()
            .await
            .map(|_| ())
            .map_err(|e| StateError::Connection(format!("unable to reach the backend: {e}")))
    }

    async fn disconnect(&self) -> Result<(), StateError> {
        // The client is stateless from the store's point of view;
        // there is no session to release.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_implements_durable_state_store() {
        fn _assert_store<T: DurableStateStore>() {}
        _assert_store::<WideColumnStateStore>();
    }

    #[test]
    fn store_is_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<WideColumnStateStore>();
    }
}
