#![deny(missing_docs)]
//! # holdfast — umbrella crate
//!
//! Provides a single import surface for holdfast's durable-state
//! persistence layer. Re-exports the protocol crate and the store
//! backends behind feature flags, plus a `prelude` for the happy path.

#[cfg(feature = "core")]
pub use holdfast_protocol;
#[cfg(feature = "store-memory")]
pub use holdfast_store_memory;
#[cfg(feature = "store-widecolumn")]
pub use holdfast_store_widecolumn;

/// Happy-path imports for wiring a store into an actor runtime.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use holdfast_protocol::{
        ActorId, DurableStateRecord, DurableStateStore, Envelope, PayloadError, PayloadRegistry,
        StateError, TypeNamed,
    };

    #[cfg(feature = "store-memory")]
    pub use holdfast_store_memory::MemoryStateStore;

    #[cfg(feature = "store-widecolumn")]
    pub use holdfast_store_widecolumn::{
        MemoryClient, StoreConfig, WideColumnClient, WideColumnStateStore,
    };
}
