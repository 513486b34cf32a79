//! Proxy codec
//!
//! Turns a live value into a framed, checksummed proxy and back. The live
//! value's own layout never reaches the bytes: encode always substitutes the
//! proxy, and decode always produces the proxy first, then resolves it
//! through [`SerializationProxy::from_proxy`].

mod frame;

pub use frame::{encode_frame, Frame, FrameError, FrameShape, FORMAT_VERSION, FRAME_MAGIC};

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::proxy::{replace_with_proxy, resolve_proxy, SerializationProxy};
use bincode::Options;
use tracing::debug;

/// Encodes and decodes live values through their proxies.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec with the given settings.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Active settings
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `value` as a proxy frame.
    ///
    /// # Errors
    ///
    /// `EncodingFailure` if the proxy cannot be built or serialized, or
    /// exceeds `max_payload_len`.
    pub fn encode<T: SerializationProxy>(&self, value: &T) -> Result<Vec<u8>> {
        let proxy = replace_with_proxy(value)?;

        let payload = self.payload_options().serialize(&proxy).map_err(|e| match *e {
            bincode::ErrorKind::SizeLimit => Error::encoding(
                T::TYPE_NAME,
                format!(
                    "proxy exceeds payload limit of {} bytes",
                    self.config.max_payload_len
                ),
            ),
            ref other => Error::encoding(T::TYPE_NAME, other.to_string()),
        })?;

        let bytes = encode_frame(FrameShape::Proxy, T::TYPE_NAME, T::PROXY_VERSION, &payload)
            .map_err(|e| Error::encoding(T::TYPE_NAME, e.to_string()))?;

        debug!(
            target: "surrogate::codec",
            type_name = T::TYPE_NAME,
            proxy_version = T::PROXY_VERSION,
            bytes = bytes.len(),
            "Encoded proxy frame"
        );
        Ok(bytes)
    }

    /// Decode a proxy frame into a live `T`.
    ///
    /// # Errors
    ///
    /// - `ProxyRequired` if the frame carries a live layout
    /// - `DecodingFailure` if the frame is malformed, belongs to another
    ///   type or proxy version, or the proxy is rejected by `T`'s constructors
    pub fn decode<T: SerializationProxy>(&self, bytes: &[u8]) -> Result<T> {
        let frame = Frame::parse(
            bytes,
            self.config.max_payload_len,
            self.config.verify_checksum,
        )
        .map_err(|e| Error::decoding(T::TYPE_NAME, e.to_string()))?;

        if frame.shape == FrameShape::Live {
            return Err(Error::proxy_required(frame.type_name));
        }
        if frame.type_name != T::TYPE_NAME {
            return Err(Error::decoding(
                T::TYPE_NAME,
                format!("frame holds a proxy of {}", frame.type_name),
            ));
        }
        if frame.proxy_version != T::PROXY_VERSION {
            return Err(Error::decoding(
                T::TYPE_NAME,
                format!(
                    "unsupported proxy version {} (expected {})",
                    frame.proxy_version,
                    T::PROXY_VERSION
                ),
            ));
        }

        let proxy: T::Proxy = self
            .payload_options()
            .deserialize(frame.payload)
            .map_err(|e| Error::decoding(T::TYPE_NAME, e.to_string()))?;

        debug!(
            target: "surrogate::codec",
            type_name = T::TYPE_NAME,
            bytes = bytes.len(),
            "Decoded proxy frame"
        );
        resolve_proxy::<T>(proxy)
    }

    fn payload_options(&self) -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(self.config.max_payload_len as u64)
            .reject_trailing_bytes()
    }
}

/// Encode with the default [`Codec`].
pub fn encode<T: SerializationProxy>(value: &T) -> Result<Vec<u8>> {
    Codec::default().encode(value)
}

/// Decode with the default [`Codec`].
pub fn decode<T: SerializationProxy>(bytes: &[u8]) -> Result<T> {
    Codec::default().decode(bytes)
}
