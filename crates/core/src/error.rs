//! Error types for surrogate serialization
//!
//! Every failure names the phase it happened in and the live type involved.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for surrogate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of a round trip in which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Live value -> proxy -> bytes
    Encode,
    /// Bytes -> proxy -> live value
    Decode,
    /// Durable byte sink/source access
    Resource,
}

/// Error types for surrogate serialization
#[derive(Debug, Error)]
pub enum Error {
    /// Bytes describe the live type itself instead of its serialization proxy
    #[error("Proxy required: {type_name} can only be decoded from its serialization proxy")]
    ProxyRequired {
        /// Live type whose direct decoding was attempted
        type_name: String,
    },

    /// A value or its proxy could not be encoded
    #[error("Encoding failed for {type_name}: {detail}")]
    EncodingFailure {
        /// Live type being encoded
        type_name: String,
        /// Human-readable cause
        detail: String,
    },

    /// Bytes do not hold a valid proxy, or the proxy was rejected on reconstruction
    #[error("Decoding failed for {type_name}: {detail}")]
    DecodingFailure {
        /// Live type being decoded
        type_name: String,
        /// Human-readable cause
        detail: String,
    },

    /// The durable byte sink/source could not be opened, written or read
    #[error("Resource failure: cannot {operation} {location}: {source}")]
    ResourceFailure {
        /// Attempted operation ("open", "write", "read", ...)
        operation: &'static str,
        /// Where the bytes live
        location: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Direct decode of a live type was attempted.
    pub fn proxy_required(type_name: impl Into<String>) -> Self {
        Error::ProxyRequired {
            type_name: type_name.into(),
        }
    }

    /// Encoding of `type_name` failed.
    pub fn encoding(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::EncodingFailure {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }

    /// Decoding of `type_name` failed.
    pub fn decoding(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::DecodingFailure {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }

    /// Durable storage access failed.
    pub fn resource(operation: &'static str, location: impl Into<String>, source: io::Error) -> Self {
        Error::ResourceFailure {
            operation,
            location: location.into(),
            source,
        }
    }

    /// Phase in which this error occurred
    pub fn phase(&self) -> Phase {
        match self {
            Error::EncodingFailure { .. } => Phase::Encode,
            Error::ProxyRequired { .. } | Error::DecodingFailure { .. } => Phase::Decode,
            Error::ResourceFailure { .. } => Phase::Resource,
        }
    }

    /// Live type involved, if the error is tied to one
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Error::ProxyRequired { type_name }
            | Error::EncodingFailure { type_name, .. }
            | Error::DecodingFailure { type_name, .. } => Some(type_name),
            Error::ResourceFailure { .. } => None,
        }
    }
}
