//! Error types for the store and payload protocols.

use thiserror::Error;

/// Durable-state store errors.
///
/// Absence of a record is NOT an error: [`latest_state`] returns
/// `Ok(None)` for an actor that was never written, so callers can tell
/// "no state yet" apart from a technical failure.
///
/// [`latest_state`]: crate::store::DurableStateStore::latest_state
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError {
    /// Establishing or verifying the backend connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A backend call (upsert or lookup) failed. Wrapped with context and
    /// surfaced verbatim; never retried internally. Retry policy, if any,
    /// belongs to the caller.
    #[error("backend error: {0}")]
    Backend(String),

    /// A stored record could not be decoded: a missing attribute, an
    /// attribute of the wrong kind, or an unparsable numeric field.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Payload resolution failed on read.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload envelope and registry errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PayloadError {
    /// No decoder is registered under the stored type name. The embedding
    /// application must register every payload type before the first read.
    #[error("no decoder registered for type: {0}")]
    UnknownType(String),

    /// Serializing a payload value failed.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The stored bytes do not parse as the resolved type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The resolved value is not a state envelope. The store only accepts
    /// envelope-shaped payloads; anything else is surfaced here rather
    /// than returned degraded.
    #[error("decoded value for {0} is not a state envelope")]
    NotEnvelope(String),

    /// The envelope holds a different inner type than the one requested.
    #[error("envelope holds {actual}, expected {expected}")]
    TypeMismatch {
        /// The type name the caller asked to unpack.
        expected: String,
        /// The type name recorded in the envelope.
        actual: String,
    },
}
