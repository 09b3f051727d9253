//! # holdfast-protocol
//!
//! Protocol traits and shared types for holdfast, a durable-state
//! persistence layer for actor runtimes. The runtime hands a store the
//! latest state snapshot of an actor; the store keeps exactly one record
//! per actor and returns it on demand.
//!
//! | Piece | Type | What it does |
//! |-------|------|--------------|
//! | Store protocol | [`DurableStateStore`] | Write/fetch the latest snapshot per actor |
//! | Record | [`DurableStateRecord`] | The unit of persistence |
//! | Envelope | [`Envelope`] | Container for an arbitrarily typed payload |
//! | Registry | [`PayloadRegistry`] | Resolves stored bytes back to typed values by name |
//!
//! ## Design principle
//!
//! The store trait is operation-defined, not mechanism-defined.
//! [`DurableStateStore::write_state`] means "make this the actor's latest
//! snapshot", whatever the backend: an in-memory map, a wide-column table,
//! or something that does not exist yet. Implementations are swappable
//! because the trait says nothing about wire formats or clients.
//!
//! ## Dependency notes
//!
//! Payload bytes are produced and consumed with `serde_json`. JSON is the
//! interchange format used across this workspace; the registry's decode
//! functions are registered per type, so a backend-specific binary format
//! can be introduced without changing the protocol.

#![deny(missing_docs)]

pub mod error;
pub mod id;
pub mod payload;
pub mod record;
pub mod store;

// Re-exports for convenience
pub use error::{PayloadError, StateError};
pub use id::ActorId;
pub use payload::{Envelope, PayloadRegistry, TypeNamed};
pub use record::DurableStateRecord;
pub use store::DurableStateStore;
