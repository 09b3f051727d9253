//! Payload envelope and the type registry that resolves stored bytes
//! back into typed values.
//!
//! A stored payload is a pair of (type name, bytes). The name is the key
//! into a [`PayloadRegistry`], which maps fully qualified type names to
//! decode functions. This is what lets heterogeneous payload types share
//! a single table without a schema per type, at the cost of a closed
//! world: every type that can appear in storage must be registered before
//! the first read.

use crate::error::PayloadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;

/// A payload type with a stable, fully qualified name.
///
/// The name travels with the serialized bytes and selects the decoder at
/// read time, so it must be unique across the application and must not
/// change while records referencing it exist.
pub trait TypeNamed {
    /// Fully qualified type name, e.g. `"holdfast.Envelope"`.
    const TYPE_NAME: &'static str;
}

/// Container for an arbitrarily typed payload value.
///
/// Holds the inner value's type name next to its serialized bytes, like a
/// tagged union over every registered payload type. Stores persist
/// envelopes, not raw values; callers [`pack`](Envelope::pack) a value in
/// before writing and [`unpack`](Envelope::unpack) it after reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    type_name: String,
    data: Vec<u8>,
}

impl TypeNamed for Envelope {
    const TYPE_NAME: &'static str = "holdfast.Envelope";
}

impl Envelope {
    /// Pack a typed value into an envelope.
    pub fn pack<T>(value: &T) -> Result<Self, PayloadError>
    where
        T: TypeNamed + Serialize,
    {
        let data = serde_json::to_vec(value).map_err(|e| PayloadError::Encode(e.to_string()))?;
        Ok(Self {
            type_name: T::TYPE_NAME.to_string(),
            data,
        })
    }

    /// Unpack the inner value, checking the recorded type name first.
    ///
    /// Asking for a type other than the one packed is a
    /// [`PayloadError::TypeMismatch`], not a decode attempt.
    pub fn unpack<T>(&self) -> Result<T, PayloadError>
    where
        T: TypeNamed + DeserializeOwned,
    {
        if self.type_name != T::TYPE_NAME {
            return Err(PayloadError::TypeMismatch {
                expected: T::TYPE_NAME.to_string(),
                actual: self.type_name.clone(),
            });
        }
        serde_json::from_slice(&self.data).map_err(|e| PayloadError::Decode(e.to_string()))
    }

    /// Type name of the inner value.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Serialized bytes of the inner value.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A monomorphized decode function: bytes in, type-erased value out.
type DecodeFn = fn(&[u8]) -> Result<Box<dyn Any + Send>, PayloadError>;

fn decode_erased<T>(bytes: &[u8]) -> Result<Box<dyn Any + Send>, PayloadError>
where
    T: DeserializeOwned + Send + 'static,
{
    let value: T =
        serde_json::from_slice(bytes).map_err(|e| PayloadError::Decode(e.to_string()))?;
    Ok(Box::new(value))
}

/// Maps fully qualified type names to decode functions.
///
/// Built once at startup by the embedding application and shared with
/// every store (typically behind an `Arc`). Resolution failure is a
/// first-class error variant, never a panic: an unregistered name is
/// [`PayloadError::UnknownType`], bytes that do not parse are
/// [`PayloadError::Decode`], and a decoded value that is not an
/// [`Envelope`] is [`PayloadError::NotEnvelope`].
#[derive(Default)]
pub struct PayloadRegistry {
    decoders: HashMap<String, DecodeFn>,
}

impl PayloadRegistry {
    /// Create an empty registry.
    ///
    /// Note that stores resolve through [`Envelope`]'s own registration,
    /// so an empty registry fails every read; most applications want
    /// [`PayloadRegistry::with_envelope`] as the starting point.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Create a registry with [`Envelope`] pre-registered.
    pub fn with_envelope() -> Self {
        let mut registry = Self::new();
        registry.register::<Envelope>();
        registry
    }

    /// Register a payload type under its [`TypeNamed::TYPE_NAME`].
    /// Re-registering a name replaces the previous decoder.
    pub fn register<T>(&mut self)
    where
        T: TypeNamed + DeserializeOwned + Send + 'static,
    {
        self.decoders
            .insert(T::TYPE_NAME.to_string(), decode_erased::<T>);
    }

    /// Builder-style [`register`](PayloadRegistry::register).
    pub fn with_type<T>(mut self) -> Self
    where
        T: TypeNamed + DeserializeOwned + Send + 'static,
    {
        self.register::<T>();
        self
    }

    /// Whether a decoder is registered under the given name.
    pub fn contains(&self, type_name: &str) -> bool {
        self.decoders.contains_key(type_name)
    }

    /// Resolve stored bytes back into an envelope.
    ///
    /// Looks up the decoder for `type_name`, decodes the bytes with it,
    /// and requires the result to be an [`Envelope`]. Each failure mode
    /// maps to its own [`PayloadError`] variant so callers can tell an
    /// unregistered type from malformed bytes.
    pub fn resolve(&self, type_name: &str, bytes: &[u8]) -> Result<Envelope, PayloadError> {
        let decode = self
            .decoders
            .get(type_name)
            .ok_or_else(|| PayloadError::UnknownType(type_name.to_string()))?;
        let value = decode(bytes)?;
        match value.downcast::<Envelope>() {
            Ok(envelope) => Ok(*envelope),
            Err(_) => Err(PayloadError::NotEnvelope(type_name.to_string())),
        }
    }
}

impl std::fmt::Debug for PayloadRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PayloadRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        balance: i64,
    }

    impl TypeNamed for Account {
        const TYPE_NAME: &'static str = "holdfast.test.Account";
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let account = Account { balance: 100 };
        let envelope = Envelope::pack(&account).unwrap();
        assert_eq!(envelope.type_name(), "holdfast.test.Account");
        let unpacked: Account = envelope.unpack().unwrap();
        assert_eq!(unpacked, account);
    }

    #[test]
    fn unpack_wrong_type_is_mismatch() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Counter {
            count: u32,
        }
        impl TypeNamed for Counter {
            const TYPE_NAME: &'static str = "holdfast.test.Counter";
        }

        let envelope = Envelope::pack(&Account { balance: 1 }).unwrap();
        let err = envelope.unpack::<Counter>().unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { .. }));
        assert!(err.to_string().contains("holdfast.test.Account"));
    }

    #[test]
    fn resolve_roundtrip() {
        let registry = PayloadRegistry::with_envelope();
        let envelope = Envelope::pack(&Account { balance: 42 }).unwrap();
        let bytes = serde_json::to_vec(&envelope).unwrap();

        let resolved = registry.resolve(Envelope::TYPE_NAME, &bytes).unwrap();
        assert_eq!(resolved, envelope);
        assert_eq!(resolved.unpack::<Account>().unwrap().balance, 42);
    }

    #[test]
    fn resolve_unknown_type() {
        let registry = PayloadRegistry::with_envelope();
        let err = registry.resolve("no.such.Type", b"{}").unwrap_err();
        assert!(matches!(err, PayloadError::UnknownType(_)));
    }

    #[test]
    fn resolve_malformed_bytes() {
        let registry = PayloadRegistry::with_envelope();
        let err = registry
            .resolve(Envelope::TYPE_NAME, b"not json at all")
            .unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }

    #[test]
    fn resolve_non_envelope_type() {
        // A registered type that decodes fine but is not an envelope.
        let registry = PayloadRegistry::with_envelope().with_type::<Account>();
        let bytes = serde_json::to_vec(&Account { balance: 7 }).unwrap();
        let err = registry.resolve(Account::TYPE_NAME, &bytes).unwrap_err();
        assert!(matches!(err, PayloadError::NotEnvelope(_)));
    }

    #[test]
    fn reregistering_replaces_decoder() {
        let mut registry = PayloadRegistry::new();
        registry.register::<Envelope>();
        registry.register::<Envelope>();
        assert!(registry.contains(Envelope::TYPE_NAME));
    }
}
