#![deny(missing_docs)]
//! Wide-column key-value implementation of holdfast's DurableStateStore
//! trait.
//!
//! Each actor's latest snapshot is one row in a wide-column table, keyed
//! by actor id. The row is a flat mapping of attribute name to typed
//! attribute value (string, number, or binary); the payload travels as a
//! binary blob next to the type name that resolves its decoder at read
//! time.
//!
//! The backend itself sits behind the [`WideColumnClient`] trait: upsert
//! by key, point lookup by key, list tables. [`MemoryClient`] implements
//! it in-process for tests and local development; a networked client for
//! a hosted wide-column service implements the same trait outside this
//! crate.
//!
//! ```no_run
//! use std::sync::Arc;
//! use holdfast_protocol::PayloadRegistry;
//! use holdfast_store_widecolumn::{MemoryClient, WideColumnStateStore};
//!
//! # async fn demo() {
//! let client = Arc::new(MemoryClient::new());
//! client.create_table("states_store", "actor_id").await;
//!
//! let registry = Arc::new(PayloadRegistry::with_envelope());
//! let store = WideColumnStateStore::new(client, registry);
//! # }
//! ```

pub mod attribute;
pub mod client;
pub mod config;
pub mod schema;
pub mod store;

pub use attribute::{AttributeValue, Item};
pub use client::{ClientError, MemoryClient, WideColumnClient};
pub use config::StoreConfig;
pub use store::WideColumnStateStore;
