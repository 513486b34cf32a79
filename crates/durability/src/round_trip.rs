//! Encode → persist → reload → decode

use crate::store::ByteStore;
use surrogate_core::{Codec, Result, SerializationProxy};
use tracing::info;

/// Push `value` through `store` and return what comes back.
///
/// Nothing is retried. The first failure, in whichever phase, is returned.
pub fn round_trip<T: SerializationProxy>(
    value: &T,
    store: &dyn ByteStore,
    codec: &Codec,
) -> Result<T> {
    let bytes = codec.encode(value)?;
    store.write_bytes(&bytes)?;
    info!(
        target: "surrogate::store",
        type_name = T::TYPE_NAME,
        bytes = bytes.len(),
        location = %store.location(),
        "serialized"
    );

    let bytes = store.read_bytes()?;
    let decoded = codec.decode::<T>(&bytes)?;
    info!(
        target: "surrogate::store",
        type_name = T::TYPE_NAME,
        bytes = bytes.len(),
        location = %store.location(),
        "deserialized"
    );
    Ok(decoded)
}
