//! Codec configuration
//!
//! There is no user-facing configuration surface; this struct exists so
//! embedders can tighten limits for untrusted input.

use serde::{Deserialize, Serialize};

/// Default upper bound on a frame payload (16 MiB).
pub const DEFAULT_MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

/// Settings applied by [`Codec`](crate::codec::Codec) to every frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Largest payload accepted on decode and produced on encode.
    #[serde(default = "default_max_payload_len")]
    pub max_payload_len: u32,
    /// Verify the frame CRC32 on decode.
    #[serde(default = "default_verify_checksum")]
    pub verify_checksum: bool,
}

fn default_max_payload_len() -> u32 {
    DEFAULT_MAX_PAYLOAD_LEN
}

fn default_verify_checksum() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_len: default_max_payload_len(),
            verify_checksum: default_verify_checksum(),
        }
    }
}

impl CodecConfig {
    /// Override the payload limit.
    pub fn with_max_payload_len(mut self, max_payload_len: u32) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    /// Enable or disable checksum verification.
    pub fn with_verify_checksum(mut self, verify_checksum: bool) -> Self {
        self.verify_checksum = verify_checksum;
        self
    }
}
