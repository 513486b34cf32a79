//! What may live in an [`InstanceCache`](super::InstanceCache), and what may
//! leave it.
//!
//! Any `Cacheable` type can be stored. Only types that opt into
//! [`Persistable`] survive encoding; the rest are dropped without error.
//! A persisted value carries its type tag and its own serde payload, so
//! restoring goes back to exactly the type that was written.

use super::registry::register_persistable;
use super::CACHE_TYPE_NAME;
use crate::complex::ComplexNumber;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use surrogate_core::{Error, Result};

/// A value that can be stored in an instance cache.
///
/// Types that are not persistable implement this with an empty body.
pub trait Cacheable: Any + Send + Sync + fmt::Display {
    /// The persistence capability, if this type has it.
    fn as_persistable(&self) -> Option<&dyn ErasedPersistable> {
        None
    }
}

/// Capability of being written as part of an instance cache proxy.
///
/// Implement with [`persistable!`](crate::persistable), which also wires
/// up [`Cacheable::as_persistable`].
pub trait Persistable: Cacheable + Serialize + DeserializeOwned {
    /// Stable tag written with every value. Unique per type, never changed
    /// once data exists.
    const TYPE_TAG: &'static str;
}

/// Object-safe view of [`Persistable`], used on type-erased cache values.
pub trait ErasedPersistable: Send + Sync {
    /// Tag of the concrete type
    fn type_tag(&self) -> &'static str;

    /// The durable form of this value.
    ///
    /// Registers the concrete type on first use.
    fn to_persisted(&self) -> Result<PersistedValue>;
}

impl<T: Persistable> ErasedPersistable for T {
    fn type_tag(&self) -> &'static str {
        T::TYPE_TAG
    }

    fn to_persisted(&self) -> Result<PersistedValue> {
        register_persistable::<T>().map_err(|e| Error::encoding(CACHE_TYPE_NAME, e.to_string()))?;
        let payload = payload_options()
            .serialize(self)
            .map_err(|e| Error::encoding(CACHE_TYPE_NAME, format!("{}: {}", T::TYPE_TAG, e)))?;
        Ok(PersistedValue {
            type_tag: T::TYPE_TAG.to_string(),
            payload,
        })
    }
}

/// One persisted cache value: the type tag and the value's payload.
///
/// Cache keys are never stored; the tag selects the restoring type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedValue {
    type_tag: String,
    payload: Vec<u8>,
}

impl PersistedValue {
    /// Assemble from a tag and an already encoded payload.
    pub fn from_parts(type_tag: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            type_tag: type_tag.into(),
            payload,
        }
    }

    /// Tag of the type this value restores to
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Encoded value
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Display for PersistedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.type_tag, self.payload.len())
    }
}

/// bincode settings for value payloads. The enclosing frame bounds the size.
pub(crate) fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Make types persistable under the given tags.
///
/// Each type must implement `Display`, `Serialize` and `Deserialize`.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use std::fmt;
///
/// #[derive(Serialize, Deserialize)]
/// struct Celsius(f64);
///
/// impl fmt::Display for Celsius {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}C", self.0)
///     }
/// }
///
/// surrogate_primitives::persistable!(Celsius => "Celsius");
/// ```
#[macro_export]
macro_rules! persistable {
    ($($ty:ty => $tag:expr),* $(,)?) => {
        $(
            impl $crate::instance_cache::Cacheable for $ty {
                fn as_persistable(
                    &self,
                ) -> ::std::option::Option<&dyn $crate::instance_cache::ErasedPersistable> {
                    ::std::option::Option::Some(self)
                }
            }

            impl $crate::instance_cache::Persistable for $ty {
                const TYPE_TAG: &'static str = $tag;
            }
        )*
    };
}

persistable! {
    String => "String",
    bool => "bool",
    i32 => "i32",
    i64 => "i64",
    u64 => "u64",
    f64 => "f64",
    ComplexNumber => "ComplexNumber",
}
