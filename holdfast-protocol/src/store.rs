//! The store protocol: how an actor's latest state snapshot persists.

use crate::error::StateError;
use crate::id::ActorId;
use crate::record::DurableStateRecord;
use async_trait::async_trait;

/// A durable-state store keeps the latest snapshot per actor.
///
/// Implementations:
/// - `MemoryStateStore`: HashMap (testing, ephemeral)
/// - `WideColumnStateStore`: wide-column key-value table
///
/// The trait is deliberately minimal: upsert, point lookup, liveness,
/// teardown. There is no delete (the runtime owns record lifecycle), no
/// history (only the latest snapshot is kept), and no version check on
/// write (optimistic concurrency belongs to the runtime, not the store).
///
/// Establishing a connection is a constructor on each implementation,
/// which owns its backend client as a shared handle for the store's whole
/// lifetime. Every operation is one self-contained round trip: safe to
/// issue concurrently, cancelled by dropping the future, idempotent on
/// the write path (re-applying the same record yields the same stored
/// state) and side-effect free on the read path.
#[async_trait]
pub trait DurableStateStore: Send + Sync {
    /// Persist the latest state snapshot for an actor.
    ///
    /// An upsert: any previous record for the same actor id is fully
    /// replaced, not merged.
    async fn write_state(&self, record: DurableStateRecord) -> Result<(), StateError>;

    /// Fetch the latest snapshot for an actor.
    ///
    /// Returns `Ok(None)` if the actor has no persisted state yet.
    async fn latest_state(
        &self,
        actor_id: &ActorId,
    ) -> Result<Option<DurableStateRecord>, StateError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), StateError>;

    /// Release backend resources.
    ///
    /// Default is a no-op; stateless backends have nothing to release.
    async fn disconnect(&self) -> Result<(), StateError> {
        Ok(())
    }
}
