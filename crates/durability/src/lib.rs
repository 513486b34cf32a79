//! Durable storage for proxy frames
//!
//! This crate provides:
//! - ByteStore: scoped write/read of a single byte blob
//! - FileStore / MemoryStore: file-backed and in-memory stores
//! - round_trip: encode, persist, reload and decode a value

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod round_trip;
pub mod store;

pub use round_trip::round_trip;
pub use store::{ByteStore, FileStore, MemoryStore};
