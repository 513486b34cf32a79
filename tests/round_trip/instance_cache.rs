//! Instance cache round trips

use crate::common::{through_file, Celsius, Ephemeral, NotSerializableString, Transient};
use proptest::prelude::*;
use surrogate::{CacheEntry, ComplexNumber, InstanceCache};

#[test]
fn demo_cache_keeps_string_and_integer() {
    let cache = InstanceCache::new();
    cache.put("a string".to_string());
    cache.put(0i32);
    cache.put(NotSerializableString("x".to_string()));

    let back = through_file(&cache);
    assert_eq!(back.len(), 2);
    assert_eq!(back.type_names(), vec!["String", "i32"]);
    assert_eq!(back.get::<String>().as_deref().map(String::as_str), Some("a string"));
    assert_eq!(back.get::<i32>().as_deref(), Some(&0));
    assert!(!back.contains_key::<NotSerializableString>());
}

#[test]
fn user_type_keeps_its_own_slot() {
    let cache = InstanceCache::new();
    cache.put(Celsius(21.5));
    cache.put(3.0f64);

    let back = through_file(&cache);
    assert_eq!(back.type_names(), vec!["Celsius", "f64"]);
    assert_eq!(back.get::<Celsius>().as_deref(), Some(&Celsius(21.5)));
    assert_eq!(back.get::<f64>().as_deref(), Some(&3.0));
}

#[test]
fn overwrite_returns_previous() {
    let cache = InstanceCache::new();
    cache.put(5i32);
    let previous = cache.put(7i32);
    assert_eq!(previous.as_deref(), Some(&5));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get::<i32>().as_deref(), Some(&7));
}

#[test]
fn empty_cache_round_trips() {
    let back = through_file(&InstanceCache::new());
    assert!(back.is_empty());
}

fn eligible_entries() -> Vec<CacheEntry> {
    vec![
        CacheEntry::new("text".to_string()),
        CacheEntry::new(true),
        CacheEntry::new(-1i32),
        CacheEntry::new(-2i64),
        CacheEntry::new(3u64),
        CacheEntry::new(0.5f64),
        CacheEntry::new(Celsius(0.5)),
        CacheEntry::new(ComplexNumber::from_coordinates(1.0, -1.0)),
    ]
}

fn ineligible_entries() -> Vec<CacheEntry> {
    vec![
        CacheEntry::new(NotSerializableString("n".to_string())),
        CacheEntry::new(Transient(true)),
        CacheEntry::new(Ephemeral(4)),
    ]
}

proptest! {
    #[test]
    fn filter_keeps_exactly_the_eligible(
        keep_eligible in proptest::collection::vec(any::<bool>(), 8),
        keep_ineligible in proptest::collection::vec(any::<bool>(), 3),
    ) {
        let eligible: Vec<CacheEntry> = eligible_entries()
            .into_iter()
            .zip(&keep_eligible)
            .filter(|(_, keep)| **keep)
            .map(|(entry, _)| entry)
            .collect();
        let ineligible: Vec<CacheEntry> = ineligible_entries()
            .into_iter()
            .zip(&keep_ineligible)
            .filter(|(_, keep)| **keep)
            .map(|(entry, _)| entry)
            .collect();

        prop_assert!(eligible.iter().all(CacheEntry::is_persistable));
        prop_assert!(!ineligible.iter().any(CacheEntry::is_persistable));

        let mut expected: Vec<&'static str> = eligible.iter().map(CacheEntry::type_name).collect();
        expected.sort();

        let cache = InstanceCache::from_entries(eligible.iter().chain(&ineligible).cloned());
        prop_assert_eq!(cache.len(), eligible.len() + ineligible.len());

        let back = through_file(&cache);
        prop_assert_eq!(back.type_names(), expected);
        prop_assert_eq!(back.contains_key::<NotSerializableString>(), false);
        prop_assert_eq!(back.contains_key::<Transient>(), false);
        prop_assert_eq!(back.contains_key::<Ephemeral>(), false);

        // Every survivor renders as it did before the round trip
        for entry in &eligible {
            let original = entry.to_string();
            prop_assert!(back.to_string().contains(&original), "{} missing", original);
        }
    }
}
