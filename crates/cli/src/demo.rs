//! The fixed demonstration sequence.

use anyhow::{Context, Result};
use rand::Rng;
use std::fmt;
use surrogate_core::{Codec, SerializationProxy};
use surrogate_durability::{round_trip, FileStore};
use surrogate_primitives::{Cacheable, ComplexNumber, InstanceCache};
use tempfile::TempDir;

/// Name of the transient file inside the scratch directory.
const SERIALIZED_FILE: &str = "_serialized";

/// A string wrapper that deliberately does not opt into persistence.
struct NotSerializableString(String);

impl fmt::Display for NotSerializableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Cacheable for NotSerializableString {}

/// Runs every round trip through one scratch file.
pub struct Demo {
    // Removed with its contents on drop
    _scratch: TempDir,
    store: FileStore,
    codec: Codec,
}

impl Demo {
    pub fn new() -> Result<Self> {
        let scratch = TempDir::new().context("creating scratch directory")?;
        let store = FileStore::new(scratch.path().join(SERIALIZED_FILE));
        Ok(Self {
            _scratch: scratch,
            store,
            codec: Codec::default(),
        })
    }

    pub fn run(&self) -> Result<()> {
        self.serialize_complex_numbers()?;
        self.serialize_instance_cache()
    }

    fn serialize_complex_numbers(&self) -> Result<()> {
        let one = ComplexNumber::from_coordinates(1.0, 0.0);
        self.show_round_trip(&one)?;
        println!();

        let random = ComplexNumber::from_coordinates(random_coordinate(), random_coordinate());
        self.show_round_trip(&random)?;
        println!();
        Ok(())
    }

    fn serialize_instance_cache(&self) -> Result<()> {
        let cache = InstanceCache::new();
        cache.put("a string".to_string());
        cache.put(0i32);
        cache.put(NotSerializableString("not serializable!".to_string()));
        self.show_round_trip(&cache)
    }

    fn show_round_trip<T: SerializationProxy>(&self, value: &T) -> Result<()> {
        println!("instance to serialize: {}", value);
        let deserialized = round_trip(value, &self.store, &self.codec)
            .with_context(|| format!("round trip of {} failed", value))?;
        println!("deserialized instance: {}", deserialized);
        Ok(())
    }
}

/// Uniform in [-10, 10].
fn random_coordinate() -> f64 {
    rand::thread_rng().gen_range(-10.0..=10.0)
}
