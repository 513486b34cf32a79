//! Process-wide registry of persistable types, keyed by type tag
//!
//! Decoding an instance cache needs to turn a tag back into a concrete type.
//! Each [`Persistable`] type registers a restore function under its
//! `TYPE_TAG`. The built-in types are registered up front; other types are
//! registered on first encode, or explicitly with [`register_persistable`]
//! before decoding data written by another process.

use super::eligibility::{payload_options, Persistable, PersistedValue};
use super::{CacheEntry, CACHE_TYPE_NAME};
use crate::complex::ComplexNumber;
use bincode::Options;
use parking_lot::RwLock;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use surrogate_core::{Error, Result};
use thiserror::Error as ThisError;
use tracing::debug;

/// Registration failures
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RegistryError {
    /// The tag already belongs to a different type
    #[error("type tag {tag:?} is registered to {registered}, cannot register {rejected}")]
    TagConflict {
        /// The contested tag
        tag: &'static str,
        /// Type holding the tag
        registered: &'static str,
        /// Type that was refused
        rejected: &'static str,
    },
}

type RestoreFn = fn(&[u8]) -> Result<CacheEntry>;

#[derive(Clone, Copy)]
struct Registration {
    type_id: TypeId,
    type_name: &'static str,
    restore: RestoreFn,
}

impl Registration {
    fn of<T: Persistable>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            restore: restore::<T>,
        }
    }
}

fn restore<T: Persistable>(payload: &[u8]) -> Result<CacheEntry> {
    let value: T = payload_options().deserialize(payload).map_err(|e| {
        Error::decoding(
            CACHE_TYPE_NAME,
            format!("cannot restore {}: {}", T::TYPE_TAG, e),
        )
    })?;
    Ok(CacheEntry::new(value))
}

static REGISTRY: once_cell::sync::Lazy<RwLock<HashMap<&'static str, Registration>>> =
    once_cell::sync::Lazy::new(|| {
        let mut registry = HashMap::new();
        seed::<String>(&mut registry);
        seed::<bool>(&mut registry);
        seed::<i32>(&mut registry);
        seed::<i64>(&mut registry);
        seed::<u64>(&mut registry);
        seed::<f64>(&mut registry);
        seed::<ComplexNumber>(&mut registry);
        RwLock::new(registry)
    });

fn seed<T: Persistable>(registry: &mut HashMap<&'static str, Registration>) {
    registry.insert(T::TYPE_TAG, Registration::of::<T>());
}

/// Register `T` so caches holding it can be decoded.
///
/// Registering the same type twice is a no-op.
///
/// # Errors
///
/// [`RegistryError::TagConflict`] if `T::TYPE_TAG` already belongs to another type.
pub fn register_persistable<T: Persistable>() -> std::result::Result<(), RegistryError> {
    if let Some(existing) = REGISTRY.read().get(T::TYPE_TAG) {
        return check_owner::<T>(existing);
    }

    let mut registry = REGISTRY.write();
    if let Some(existing) = registry.get(T::TYPE_TAG) {
        return check_owner::<T>(existing);
    }
    registry.insert(T::TYPE_TAG, Registration::of::<T>());
    debug!(
        target: "surrogate::cache",
        tag = T::TYPE_TAG,
        type_name = type_name::<T>(),
        "Registered persistable type"
    );
    Ok(())
}

fn check_owner<T: Persistable>(existing: &Registration) -> std::result::Result<(), RegistryError> {
    if existing.type_id == TypeId::of::<T>() {
        Ok(())
    } else {
        Err(RegistryError::TagConflict {
            tag: T::TYPE_TAG,
            registered: existing.type_name,
            rejected: type_name::<T>(),
        })
    }
}

/// Whether a type is registered under `tag`
pub fn is_registered(tag: &str) -> bool {
    REGISTRY.read().contains_key(tag)
}

/// Rebuild the live value behind `value` through its registered type.
pub(crate) fn restore_entry(value: &PersistedValue) -> Result<CacheEntry> {
    // Copy the fn pointer out so the lock is not held while decoding
    let restore = REGISTRY
        .read()
        .get(value.type_tag())
        .map(|registration| registration.restore);

    match restore {
        Some(restore) => restore(value.payload()),
        None => Err(Error::decoding(
            CACHE_TYPE_NAME,
            format!("no persistable type registered under tag {:?}", value.type_tag()),
        )),
    }
}
