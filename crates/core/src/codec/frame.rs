//! Proxy frame layout
//!
//! ```text
//! [magic: "SRGT"][format: u8][shape: u8][proxy_version: u16]
//! [name_len: u16][type_name: utf8][payload_len: u32][payload][crc32: u32]
//! ```
//!
//! - **shape**: 1 = Proxy, 2 = Live. Only proxy frames are ever written.
//! - **type_name**: stable name of the live type the frame belongs to
//! - **payload**: bincode-serialized proxy
//! - **crc32**: over every byte after the magic and before the checksum
//!
//! All integers are little-endian.

use crc32fast::Hasher;
use thiserror::Error;

/// Leading bytes of every frame
pub const FRAME_MAGIC: [u8; 4] = *b"SRGT";

/// Current frame layout version
pub const FORMAT_VERSION: u8 = 1;

// magic(4) + format(1) + shape(1) + proxy_version(2) + name_len(2)
const FIXED_HEADER_LEN: usize = 10;
const PAYLOAD_LEN_SIZE: usize = 4;
const CRC_SIZE: usize = 4;

/// What a frame's payload claims to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameShape {
    /// The serialization proxy of the named type
    Proxy = 1,
    /// The named live type's own layout. Never a legal decode target.
    Live = 2,
}

impl FrameShape {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(FrameShape::Proxy),
            2 => Some(FrameShape::Live),
            _ => None,
        }
    }
}

/// Structural problems with a frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Buffer ends before the frame does
    #[error("truncated frame: have {have} bytes, need {needed}")]
    Truncated {
        /// Bytes available
        have: usize,
        /// Bytes required
        needed: usize,
    },

    /// Buffer does not start with [`FRAME_MAGIC`]
    #[error("bad magic bytes {0:02x?}")]
    BadMagic([u8; 4]),

    /// Frame layout version is not understood
    #[error("unsupported frame format {0}")]
    UnsupportedFormat(u8),

    /// Shape byte is neither proxy nor live
    #[error("unknown frame shape {0}")]
    UnknownShape(u8),

    /// Type name does not fit the u16 length field
    #[error("type name of {0} bytes is too long")]
    NameTooLong(usize),

    /// Type name is not UTF-8
    #[error("type name is not valid UTF-8")]
    InvalidName,

    /// Payload exceeds the configured limit
    #[error("payload of {len} bytes exceeds limit of {max}")]
    PayloadTooLarge {
        /// Declared or actual payload length
        len: u64,
        /// Configured limit
        max: u32,
    },

    /// Stored checksum does not match the frame content
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// CRC read from the frame
        stored: u32,
        /// CRC computed over the frame
        computed: u32,
    },

    /// Bytes remain after the checksum
    #[error("{0} trailing bytes after frame")]
    TrailingBytes(usize),
}

/// A parsed frame borrowing from the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// What the payload claims to be
    pub shape: FrameShape,
    /// Proxy schema version
    pub proxy_version: u16,
    /// Live type name
    pub type_name: &'a str,
    /// Serialized payload
    pub payload: &'a [u8],
}

/// Build a frame around an already-serialized payload.
pub fn encode_frame(
    shape: FrameShape,
    type_name: &str,
    proxy_version: u16,
    payload: &[u8],
) -> Result<Vec<u8>, FrameError> {
    let name_len =
        u16::try_from(type_name.len()).map_err(|_| FrameError::NameTooLong(type_name.len()))?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        len: payload.len() as u64,
        max: u32::MAX,
    })?;

    let total = FIXED_HEADER_LEN + type_name.len() + PAYLOAD_LEN_SIZE + payload.len() + CRC_SIZE;
    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&FRAME_MAGIC);
    buf.push(FORMAT_VERSION);
    buf.push(shape as u8);
    buf.extend_from_slice(&proxy_version.to_le_bytes());
    buf.extend_from_slice(&name_len.to_le_bytes());
    buf.extend_from_slice(type_name.as_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(payload);

    let crc = checksum(&buf[FRAME_MAGIC.len()..]);
    buf.extend_from_slice(&crc.to_le_bytes());
    Ok(buf)
}

impl<'a> Frame<'a> {
    /// Parse and validate a complete frame.
    ///
    /// The buffer must hold exactly one frame.
    pub fn parse(
        buf: &'a [u8],
        max_payload_len: u32,
        verify_checksum: bool,
    ) -> Result<Frame<'a>, FrameError> {
        let mut pos = 0;

        let magic = take(buf, &mut pos, FRAME_MAGIC.len())?;
        if magic != FRAME_MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(magic);
            return Err(FrameError::BadMagic(found));
        }

        let format = take(buf, &mut pos, 1)?[0];
        if format != FORMAT_VERSION {
            return Err(FrameError::UnsupportedFormat(format));
        }

        let shape_byte = take(buf, &mut pos, 1)?[0];
        let shape = FrameShape::from_byte(shape_byte).ok_or(FrameError::UnknownShape(shape_byte))?;
        let proxy_version = read_u16(buf, &mut pos)?;

        let name_len = read_u16(buf, &mut pos)? as usize;
        let name_bytes = take(buf, &mut pos, name_len)?;
        let type_name = std::str::from_utf8(name_bytes).map_err(|_| FrameError::InvalidName)?;

        let payload_len = read_u32(buf, &mut pos)?;
        // Checked before slicing so a forged length never drives allocation
        if payload_len > max_payload_len {
            return Err(FrameError::PayloadTooLarge {
                len: payload_len as u64,
                max: max_payload_len,
            });
        }
        let payload = take(buf, &mut pos, payload_len as usize)?;

        let crc_start = pos;
        let stored = read_u32(buf, &mut pos)?;
        if pos != buf.len() {
            return Err(FrameError::TrailingBytes(buf.len() - pos));
        }

        if verify_checksum {
            let computed = checksum(&buf[FRAME_MAGIC.len()..crc_start]);
            if stored != computed {
                return Err(FrameError::ChecksumMismatch { stored, computed });
            }
        }

        Ok(Frame {
            shape,
            proxy_version,
            type_name,
            payload,
        })
    }
}

fn checksum(bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], FrameError> {
    let end = pos.checked_add(len).filter(|end| *end <= buf.len()).ok_or(
        FrameError::Truncated {
            have: buf.len(),
            needed: pos.saturating_add(len),
        },
    )?;
    let slice = &buf[*pos..end];
    *pos = end;
    Ok(slice)
}

fn read_u16(buf: &[u8], pos: &mut usize) -> Result<u16, FrameError> {
    let bytes = take(buf, pos, 2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, FrameError> {
    let bytes = take(buf, pos, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
