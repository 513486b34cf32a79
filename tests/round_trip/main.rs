//! End-to-end round trips through the public API
//!
//! ## Test Categories
//!
//! 1. **Complex numbers** - coordinate identity, polar reconstruction, derived-field independence
//! 2. **Instance cache** - eligibility filtering and overwrite semantics
//! 3. **Direct decode** - live layouts are always rejected
//! 4. **Protocol trace** - replacement is observable in the logs
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test round_trip
//! ```

mod common;

mod complex_number;
mod direct_decode;
mod instance_cache;
mod protocol_trace;
