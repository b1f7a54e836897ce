mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use common::Car;
use quickcheck::quickcheck;
use specular::{
    ErrorKind, Model, ModelError,
    cache::{ModelCache, ModelId, OptimizeReport},
    config::CacheConfig,
    engine::ModelFactory,
};

fn counting(counter: &Arc<AtomicUsize>, value: u32) -> impl Fn() -> specular::ModelResult<u32> + Send + Sync + 'static {
    let counter = counter.clone();
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }
}

#[test]
fn test_first_insert_wins() {
    fn prop(entries: Vec<(u8, u32)>) -> bool {
        let cache = ModelCache::<u8>::default();
        let mut first = HashMap::new();

        for (key, value) in &entries {
            let existed = first.contains_key(key);
            first.entry(*key).or_insert(*value);

            if cache.cache(*key, *value) != existed {
                return false;
            }
        }

        cache.len() == first.len()
            && first
                .iter()
                .all(|(key, value)| cache.get::<u32>(key).is_ok_and(|v| *v == *value))
    }

    quickcheck(prop as fn(Vec<(u8, u32)>) -> bool);
}

#[test]
fn test_get_or_insert_is_idempotent() {
    fn prop(key: String, first: u32, second: u32) -> bool {
        let cache = ModelCache::<String>::default();

        let a = cache.get_or_insert(key.clone(), first).unwrap();
        let b = cache.get_or_insert(key.clone(), second).unwrap();

        *a == first && *b == first && Arc::ptr_eq(&a, &b) && cache.len() == 1
    }

    quickcheck(prop as fn(String, u32, u32) -> bool);
}

#[test]
fn test_lookup_errors() {
    let cache = ModelCache::<&'static str>::default();
    cache.cache("count", 3u32);

    let error = cache.get::<u32>(&"missing").unwrap_err();
    assert!(matches!(error, ModelError::ModelNotFound(_)));

    let error = cache.get::<String>(&"count").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_lazy_entries_build_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let cache = ModelCache::<&'static str>::default();

    assert!(!cache.cache_lazy("answer", counting(&builds, 42)));
    assert_eq!(cache.is_built(&"answer"), Some(false));

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(*cache.get::<u32>(&"answer").unwrap(), 42);
            });
        }
    });

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(cache.is_built(&"answer"), Some(true));
}

#[test]
fn test_failed_builds_are_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let cache = ModelCache::<&'static str>::default();

    let counter = attempts.clone();
    cache.cache_lazy("flaky", move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ModelError::Contract("not yet".into()))
        } else {
            Ok(5u32)
        }
    });

    assert!(cache.get::<u32>(&"flaky").is_err());
    assert_eq!(*cache.get::<u32>(&"flaky").unwrap(), 5);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_optimize_without_tracking_does_nothing() {
    let cache = ModelCache::<u8>::new(CacheConfig::builder().removal_threshold(Some(5)).build());
    cache.cache(1, 1u32);

    assert_eq!(cache.optimize(), OptimizeReport::default());
    assert!(cache.contains(&1));
}

#[test]
fn test_optimize_culls_and_removes() {
    let builds = Arc::new(AtomicUsize::new(0));
    let cache = ModelCache::<&'static str>::new(CacheConfig::usage_aware(2));

    cache.cache_lazy("hot", counting(&builds, 1));
    cache.cache_lazy("cold", counting(&builds, 2));
    cache.cache("value", 3u32);
    cache.cache("unused", 4u32);

    for _ in 0..3 {
        cache.get::<u32>(&"hot").unwrap();
    }
    cache.get::<u32>(&"cold").unwrap();
    cache.get::<u32>(&"value").unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 2);

    let report = cache.optimize();
    assert_eq!(report.culled, 1);
    assert_eq!(report.removed, 2);
    assert_eq!(cache.keys(), vec!["hot", "cold"]);

    // Culled entries start over: unbuilt and with no hits
    assert_eq!(cache.is_built(&"cold"), Some(false));
    assert_eq!(cache.usage(&"cold"), Some(0));
    assert_eq!(cache.usage(&"hot"), Some(3));

    assert_eq!(*cache.get::<u32>(&"cold").unwrap(), 2);
    assert_eq!(builds.load(Ordering::SeqCst), 3);
}

#[test]
fn test_optimize_sorts_by_usage() {
    let cache = ModelCache::<u8>::new(CacheConfig::builder().track_usage(true).build());
    cache.cache(1, 1u32);
    cache.cache(2, 2u32);

    cache.get::<u32>(&2).unwrap();

    let report = cache.optimize();
    assert!(report.sorted);
    assert_eq!(cache.keys(), vec![2, 1]);

    // Already in order
    assert!(!cache.optimize().sorted);
}

#[test]
fn test_hit_threshold_triggers_optimize() {
    let config = CacheConfig::builder()
        .track_usage(true)
        .removal_threshold(Some(1))
        .optimization_hit_threshold(Some(3))
        .build();
    let cache = ModelCache::<u8>::new(config);
    cache.cache(1, 1u32);
    cache.cache(2, 2u32);

    cache.get::<u32>(&2).unwrap();
    cache.get::<u32>(&2).unwrap();
    assert!(cache.contains(&1));

    cache.get::<u32>(&2).unwrap();
    assert!(!cache.contains(&1));
}

#[test]
fn test_copy_keeps_existing_entries() {
    let source = ModelCache::<u8>::default();
    source.cache(1, 10u32);
    source.cache(2, 20u32);

    let target = ModelCache::<u8>::default();
    target.cache(1, 99u32);

    assert_eq!(source.copy_to(&target), 1);
    assert_eq!(*target.get::<u32>(&1).unwrap(), 99);
    assert_eq!(*target.get::<u32>(&2).unwrap(), 20);
}

#[test]
fn test_copies_count_usage_separately() {
    let builds = Arc::new(AtomicUsize::new(0));
    let source = ModelCache::<u8>::new(CacheConfig::usage_aware(1));
    source.cache_lazy(1, counting(&builds, 7));

    let target = ModelCache::<u8>::new(CacheConfig::usage_aware(1));
    assert_eq!(source.copy_to(&target), 1);

    for _ in 0..5 {
        assert_eq!(*target.get::<u32>(&1).unwrap(), 7);
    }

    assert_eq!(target.usage(&1), Some(5));
    assert_eq!(source.usage(&1), Some(0));
    assert_eq!(source.is_built(&1), Some(false));

    // The cold source entry is culled without touching the copy
    assert_eq!(source.optimize().culled, 0);
    assert_eq!(target.is_built(&1), Some(true));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_remove_and_clear() {
    let cache = ModelCache::<u8>::default();
    cache.cache(1, 1u32);
    cache.cache(2, 2u32);

    assert!(cache.remove(&1));
    assert!(!cache.remove(&1));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_models_are_built_once_per_identity() {
    let factory = Arc::new(common::factory());
    let cache = ModelCache::<ModelId>::default();

    let first = cache.get_or_build::<Car, String, String, String>(&factory).unwrap();
    let second = cache.get_or_build::<Car, String, String, String>(&factory).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let uncased = cache
        .get_or_build::<Car, specular::Uncased, String, String>(&factory)
        .unwrap();
    assert_eq!(uncased.len(), first.len());
    assert_eq!(cache.len(), 2);

    let id = ModelId::of::<Car, String, String, String>();
    assert_eq!(id.target_name(), std::any::type_name::<Car>());
    let cached: Arc<Model<Car, String>> = cache.get(&id).unwrap();
    assert!(Arc::ptr_eq(&cached, &first));
}

#[test]
fn test_failed_extraction_is_not_cached_as_a_model() {
    let factory = Arc::new(ModelFactory::new(common::registry()));
    let cache = ModelCache::<ModelId>::default();

    assert!(cache
        .get_or_build::<common::Broken, String, String, String>(&factory)
        .is_err());
    assert_eq!(
        cache.is_built(&ModelId::of::<common::Broken, String, String, String>()),
        Some(false)
    );
}
