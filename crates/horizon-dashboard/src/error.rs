//! Error types for the dashboard components.

use std::path::PathBuf;

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the dashboard components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The serialized field value could not be decoded into an item list.
    #[error("Failed to decode field value: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// An item list could not be encoded into a field value.
    #[error("Failed to encode field value: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// A committed edit or removal targeted a position that no longer exists.
    #[error("Item index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("Invalid {format} configuration: {message}")]
    Config {
        format: &'static str,
        message: String,
    },
}

impl Error {
    /// Create a decode error.
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// Create an encode error.
    pub fn encode(source: serde_json::Error) -> Self {
        Self::Encode { source }
    }

    /// Create an index error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(format: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            format,
            message: message.into(),
        }
    }
}
