//! Core types and traits for surrogate serialization
//!
//! This crate defines the pieces every persisted type builds on:
//! - SerializationProxy: the two-phase replace/resolve contract
//! - Codec: framed, versioned, checksummed proxy encoding
//! - CodecConfig: limits applied to every frame
//! - Error: error taxonomy shared by all crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod error;
pub mod proxy;

pub use codec::{decode, encode, Codec, Frame, FrameError, FrameShape};
pub use config::CodecConfig;
pub use error::{Error, Phase, Result};
pub use proxy::{replace_with_proxy, resolve_proxy, SerializationProxy};
