//! Value types persisted through serialization proxies
//!
//! - [`ComplexNumber`]: keeps a derived polar form in memory, persists
//!   coordinates only
//! - [`InstanceCache`]: one instance per type, persists only the
//!   [`Persistable`] ones

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complex;
pub mod instance_cache;

pub use complex::{ComplexNumber, ComplexNumberProxy};
pub use instance_cache::{
    is_registered, register_persistable, CacheEntry, Cacheable, ErasedPersistable, InstanceCache,
    InstanceCacheProxy, Persistable, PersistedValue, RegistryError,
};
