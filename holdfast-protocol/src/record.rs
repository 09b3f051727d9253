//! The unit of persistence: one actor's latest state snapshot.

use crate::id::ActorId;
use crate::payload::Envelope;
use serde::{Deserialize, Serialize};

/// The latest state snapshot of one actor.
///
/// At most one record exists per [`ActorId`] at any time. Every write
/// replaces the previous record wholesale; there is no history and no
/// merge. The record is created on first write and never deleted by a
/// store (deletion, if needed, is the runtime's business).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurableStateRecord {
    /// Partition key. Uniquely identifies the actor's state stream.
    pub actor_id: ActorId,

    /// Monotonically increasing counter supplied by the caller. Stores
    /// pass it through; they do not compare it against the stored record
    /// (no optimistic-concurrency check at this layer).
    pub version_number: u64,

    /// The state value, packed into an envelope so heterogeneous payload
    /// types can share one table.
    pub payload: Envelope,

    /// Wall-clock or logical time of the snapshot.
    pub timestamp: i64,

    /// Shard the actor lives on. Passed through untouched; sharding
    /// logic lives in the runtime.
    pub shard_number: u64,
}
