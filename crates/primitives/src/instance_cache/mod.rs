//! Heterogeneous cache holding at most one instance per type
//!
//! # Design
//!
//! - DashMap keyed by `TypeId`: sharded, safe for concurrent put/get
//! - Each slot is keyed by the exact type of its value, so typed reads are
//!   checked downcasts that cannot fail for well-formed entries
//! - Persisted through [`InstanceCacheProxy`]: a flat list of the
//!   persistable values only. Keys are re-derived on decode.
//!
//! Encoding is deliberately lossy. Instances whose type is not
//! [`Persistable`] are dropped silently. Persistable values are written
//! with their type tag and restored through the [`registry`].

mod eligibility;
pub mod registry;

pub use eligibility::{Cacheable, ErasedPersistable, Persistable, PersistedValue};
pub use registry::{is_registered, register_persistable, RegistryError};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use surrogate_core::{Result, SerializationProxy};
use tracing::debug;

pub(crate) const CACHE_TYPE_NAME: &str = "InstanceCache";

/// A type-erased cache value together with its type identity
#[derive(Clone)]
pub struct CacheEntry {
    type_id: TypeId,
    type_name: &'static str,
    instance: Arc<dyn Any + Send + Sync>,
    view: Arc<dyn Cacheable>,
}

impl CacheEntry {
    /// Wrap `instance`, keyed by its own type.
    pub fn new<T: Cacheable>(instance: T) -> Self {
        let instance = Arc::new(instance);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name(std::any::type_name::<T>()),
            instance: instance.clone(),
            view: instance,
        }
    }

    /// Unqualified name of the value's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The stored value
    pub fn value(&self) -> &dyn Cacheable {
        self.view.as_ref()
    }

    /// Whether this value survives encoding
    pub fn is_persistable(&self) -> bool {
        self.view.as_persistable().is_some()
    }

    /// Typed access. `None` if the value is not a `T`.
    pub fn downcast<T: Cacheable>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().ok()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("type_name", &self.type_name)
            .field("value", &format_args!("{}", self.view))
            .finish()
    }
}

impl fmt::Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.type_name, self.view)
    }
}

/// Strip the module path, keeping generic arguments.
fn short_type_name(full: &'static str) -> &'static str {
    let generics_at = full.find('<').unwrap_or(full.len());
    let start = full[..generics_at].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}

/// A heterogeneous container caching one instance per type
#[derive(Default)]
pub struct InstanceCache {
    entries: DashMap<TypeId, CacheEntry>,
}

impl InstanceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache from a batch of entries. The last entry per type wins.
    pub fn from_entries<I: IntoIterator<Item = CacheEntry>>(entries: I) -> Self {
        entries.into_iter().collect()
    }

    /// Store `instance` under its type, returning the previous occupant.
    pub fn put<T: Cacheable>(&self, instance: T) -> Option<Arc<T>> {
        self.entries
            .insert(TypeId::of::<T>(), CacheEntry::new(instance))
            .and_then(|previous| previous.downcast::<T>())
    }

    /// Store a type-erased entry, returning the previous occupant of its slot.
    pub fn put_entry(&self, entry: CacheEntry) -> Option<CacheEntry> {
        self.entries.insert(entry.type_id, entry)
    }

    /// The cached instance of type `T`, if any
    pub fn get<T: Cacheable>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast::<T>())
    }

    /// Whether an instance of type `T` is cached
    pub fn contains_key<T: Cacheable>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of all cached types, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        self.sorted_entries().iter().map(CacheEntry::type_name).collect()
    }

    /// Snapshot of all entries, ordered by type name
    fn sorted_entries(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self
            .entries
            .iter()
            .map(|slot| slot.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.type_name);
        entries
    }
}

impl FromIterator<CacheEntry> for InstanceCache {
    fn from_iter<I: IntoIterator<Item = CacheEntry>>(iter: I) -> Self {
        let cache = InstanceCache::new();
        for entry in iter {
            cache.put_entry(entry);
        }
        cache
    }
}

impl fmt::Display for InstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.sorted_entries();
        write!(f, "InstanceCache [{} items: ", entries.len())?;
        write_list(f, &entries)?;
        f.write_str("]")
    }
}

impl fmt::Debug for InstanceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceCache")
            .field("entries", &self.sorted_entries())
            .finish()
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Persisted form of [`InstanceCache`]: persistable values only, no keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceCacheProxy {
    /// Values in type-name order
    pub instances: Vec<PersistedValue>,
}

impl fmt::Display for InstanceCacheProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceCache.Proxy [{} items: ", self.instances.len())?;
        write_list(f, &self.instances)?;
        f.write_str("]")
    }
}

impl SerializationProxy for InstanceCache {
    const TYPE_NAME: &'static str = CACHE_TYPE_NAME;
    type Proxy = InstanceCacheProxy;

    fn to_proxy(&self) -> Result<InstanceCacheProxy> {
        let mut instances = Vec::with_capacity(self.len());
        for entry in self.sorted_entries() {
            match entry.value().as_persistable() {
                Some(persistable) => instances.push(persistable.to_persisted()?),
                None => debug!(
                    target: "surrogate::cache",
                    type_name = entry.type_name(),
                    "Dropping non-persistable instance"
                ),
            }
        }
        Ok(InstanceCacheProxy { instances })
    }

    fn from_proxy(proxy: InstanceCacheProxy) -> Result<Self> {
        proxy.instances.iter().map(registry::restore_entry).collect()
    }
}
