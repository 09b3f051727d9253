//! Typed identifier for an actor's persisted state stream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one actor's persisted state stream. The partition key of
/// every store backend: one record per `ActorId`, overwritten on each
/// write.
///
/// Just a string underneath. No UUID enforcement, no format requirement;
/// the protocol does not care what your ids look like.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl ActorId {
    /// Create a new id from anything that converts to String.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
