//! Shared helpers for round-trip tests

use serde::{Deserialize, Serialize};
use std::fmt;
use surrogate::{persistable, round_trip, Cacheable, Codec, FileStore, SerializationProxy};
use tempfile::TempDir;

/// Round trip through a file in a fresh temp dir
pub fn through_file<T: SerializationProxy>(value: &T) -> T {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("_serialized"));
    round_trip(value, &store, &Codec::default()).unwrap()
}

/// Asserts the polar form matches the coordinates
pub fn assert_consistent(n: &surrogate::ComplexNumber) {
    let magnitude = (n.real().powi(2) + n.imaginary().powi(2)).sqrt();
    let angle = n.imaginary().atan2(n.real());
    assert!(
        (n.magnitude() - magnitude).abs() <= 1e-9 * magnitude.max(1.0),
        "{} has inconsistent magnitude",
        n
    );
    assert!((n.angle() - angle).abs() <= 1e-9, "{} has inconsistent angle", n);
}

/// Text wrapper without the persistence capability
#[derive(Debug, PartialEq)]
pub struct NotSerializableString(pub String);

impl fmt::Display for NotSerializableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Cacheable for NotSerializableString {}

/// Flag without the persistence capability
#[derive(Debug, PartialEq)]
pub struct Transient(pub bool);

impl fmt::Display for Transient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Cacheable for Transient {}

/// Counter without the persistence capability
#[derive(Debug, PartialEq)]
pub struct Ephemeral(pub u32);

impl fmt::Display for Ephemeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Cacheable for Ephemeral {}

/// Reading that persists with the same layout as a bare `f64`
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Celsius(pub f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}C", self.0)
    }
}

persistable!(Celsius => "Celsius");
