//! Surrogate - serialization through minimal proxies
//!
//! A live value never writes its own fields. It is replaced by a small,
//! versioned proxy on encode, and rebuilt from that proxy through its
//! regular constructors on decode.
//!
//! # Quick Start
//!
//! ```
//! use surrogate::{decode, encode, ComplexNumber};
//!
//! let n = ComplexNumber::from_coordinates(3.0, 4.0);
//! let bytes = encode(&n)?;
//! let back: ComplexNumber = decode(&bytes)?;
//! assert_eq!(back.magnitude(), 5.0);
//! # Ok::<(), surrogate::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `surrogate-core`: the proxy contract, framed codec and errors
//! - `surrogate-primitives`: `ComplexNumber` and `InstanceCache`
//! - `surrogate-durability`: byte stores and the round-trip harness

pub use surrogate_core::*;
pub use surrogate_durability::{round_trip, ByteStore, FileStore, MemoryStore};
pub use surrogate_primitives::*;
