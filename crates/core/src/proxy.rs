//! The serialization proxy contract
//!
//! A live type never writes its own fields. On encode it is replaced by a
//! minimal proxy; on decode the proxy rebuilds the live value through the
//! same constructors ordinary code uses, so derived state is recomputed and
//! no invariant can be skipped by crafted input.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// A live type that is persisted only through its proxy.
pub trait SerializationProxy: Sized + fmt::Display {
    /// Stable name written into every frame. Must never change once data exists.
    const TYPE_NAME: &'static str;

    /// Version of the proxy schema. Bump when `Proxy` changes shape.
    const PROXY_VERSION: u16 = 1;

    /// The minimal durable form
    type Proxy: Serialize + DeserializeOwned + fmt::Display;

    /// Build the proxy. Must not change `self`.
    ///
    /// Fails with `EncodingFailure` when part of the value has no durable form.
    fn to_proxy(&self) -> Result<Self::Proxy>;

    /// Rebuild a live value from a decoded proxy.
    ///
    /// Implementations must go through the type's regular constructors.
    fn from_proxy(proxy: Self::Proxy) -> Result<Self>;
}

/// Substitute `live` with its proxy, tracing the replacement.
pub fn replace_with_proxy<T: SerializationProxy>(live: &T) -> Result<T::Proxy> {
    let proxy = live.to_proxy()?;
    info!(
        target: "surrogate::proxy",
        live = %live,
        proxy = %proxy,
        "replacing value with proxy on serialization"
    );
    Ok(proxy)
}

/// Resolve a decoded proxy back into its live value, tracing the replacement.
pub fn resolve_proxy<T: SerializationProxy>(proxy: T::Proxy) -> Result<T> {
    let shown = proxy.to_string();
    let live = T::from_proxy(proxy)?;
    info!(
        target: "surrogate::proxy",
        proxy = %shown,
        live = %live,
        "replacing proxy with {} on deserialization",
        T::TYPE_NAME
    );
    Ok(live)
}
