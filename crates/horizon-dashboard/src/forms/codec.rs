//! Conversion between a field's serialized value and its item list.
//!
//! The containing form stores list fields as a single string. An
//! [`ItemCodec`] decodes that string into typed items and encodes the next
//! list back. [`JsonListCodec`] is the encoding used by the dashboard forms:
//! a compact JSON array, object keys kept in insertion order.
//!
//! ```
//! use horizon_dashboard::forms::{ItemCodec, JsonListCodec};
//! use serde_json::Value;
//!
//! let codec = JsonListCodec::<Value>::new();
//! assert!(!codec.has_items("[]").unwrap());
//!
//! let items = codec.decode(r#"[{"value":"s3","label":"Amazon S3"}]"#).unwrap();
//! assert_eq!(codec.encode(&items).unwrap(), r#"[{"value":"s3","label":"Amazon S3"}]"#);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Encodes and decodes the serialized value of a list field.
pub trait ItemCodec<T>: Send + Sync {
    /// Parse a serialized value. Malformed input is an error; there is no
    /// fallback list.
    fn decode(&self, value: &str) -> Result<Vec<T>>;

    /// Produce the canonical serialized form of `items`.
    fn encode(&self, items: &[T]) -> Result<String>;

    /// Returns `true` if `value` decodes to a non-empty list.
    fn has_items(&self, value: &str) -> Result<bool> {
        Ok(!self.decode(value)?.is_empty())
    }

    /// The serialized form of an empty list.
    fn empty_value(&self) -> Result<String> {
        self.encode(&[])
    }
}

/// JSON array codec for any serde item type.
pub struct JsonListCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListCodec<T> {
    /// Create a new JSON list codec.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonListCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonListCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonListCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonListCodec")
            .field("item", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> ItemCodec<T> for JsonListCodec<T> {
    fn decode(&self, value: &str) -> Result<Vec<T>> {
        serde_json::from_str(value).map_err(Error::decode)
    }

    fn encode(&self, items: &[T]) -> Result<String> {
        serde_json::to_string(items).map_err(Error::encode)
    }

    fn has_items(&self, value: &str) -> Result<bool> {
        // Avoid materializing typed items just to count them.
        let raw: Vec<serde::de::IgnoredAny> =
            serde_json::from_str(value).map_err(Error::decode)?;
        Ok(!raw.is_empty())
    }
}
