//! JSON codec for a single blob type.
//!
//! Blobs are stored as JSON text, which keeps cached rows human-readable and
//! easy to inspect with any SQLite client.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{CodecError, Result};

/// Stored form of an absent value.
pub const ABSENT: &str = "null";

/// Encodes and decodes one concrete type to and from a JSON string.
pub struct JsonCodec<T> {
    type_name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a codec. `type_name` is only used in errors and logs.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            _marker: PhantomData,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Encodes a value to its stored string.
    pub fn encode(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| CodecError::EncodeFailed {
            type_name: self.type_name,
            reason: e.to_string(),
        })
    }

    /// Encodes an optional value; `None` is stored as [`ABSENT`].
    pub fn encode_opt(&self, value: Option<&T>) -> Result<String> {
        match value {
            Some(value) => self.encode(value),
            None => Ok(ABSENT.to_string()),
        }
    }

    /// Decodes a stored string, reporting why malformed input was rejected.
    ///
    /// [`ABSENT`] decodes to `Ok(None)`.
    pub fn try_decode(&self, raw: &str) -> Result<Option<T>> {
        serde_json::from_str::<Option<T>>(raw).map_err(|e| CodecError::DecodeFailed {
            type_name: self.type_name,
            reason: e.to_string(),
        })
    }

    /// Decodes a stored string. Malformed or mismatched input yields `None`.
    pub fn decode(&self, raw: &str) -> Option<T> {
        match self.try_decode(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(type_name = self.type_name, error = %err, "Discarding malformed blob");
                None
            }
        }
    }

    /// Decodes a nullable column. SQL `NULL` and [`ABSENT`] both yield `None`.
    pub fn decode_opt(&self, raw: Option<&str>) -> Option<T> {
        raw.and_then(|raw| self.decode(raw))
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            _marker: PhantomData,
        }
    }
}
