use super::*;

use std::time::Duration;

use crate::foundation::error::TessellaError;

#[derive(Default)]
struct CountingMeasurer {
    begun: Vec<(ContentId, String)>,
}

impl RatioMeasurer for CountingMeasurer {
    fn begin(&mut self, id: &ContentId, url: &str) {
        self.begun.push((id.clone(), url.to_owned()));
    }
}

fn id(n: usize) -> ContentId {
    ContentId::new(format!("content-{n}"))
}

#[test]
fn get_hits_and_misses() {
    let mut cache = AspectRatioCache::new();
    let now = Instant::now();
    assert_eq!(cache.get_at(&id(0), now), None);

    cache.set_at(&id(0), 1.5, now);
    assert_eq!(cache.get_at(&id(0), now), Some(1.5));
    assert_eq!(cache.len(), 1);
}

#[test]
fn entries_expire_after_ttl_and_are_removed() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();
    cache.set_at(&id(0), 1.5, t0);

    // Exactly at the TTL the entry is still fresh.
    assert_eq!(cache.get_at(&id(0), t0 + CACHE_TTL), Some(1.5));

    cache.set_at(&id(1), 2.0, t0);
    assert_eq!(
        cache.get_at(&id(1), t0 + CACHE_TTL + Duration::from_millis(1)),
        None
    );
    assert!(!cache.contains(&id(1)));
}

#[test]
fn reads_refresh_recency() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();
    cache.set_at(&id(0), 1.5, t0);

    let t1 = t0 + Duration::from_secs(10 * 60);
    assert_eq!(cache.get_at(&id(0), t1), Some(1.5));

    // Ten more minutes is within the TTL of the refreshed read, not of the insert.
    let t2 = t1 + Duration::from_secs(10 * 60);
    assert_eq!(cache.get_at(&id(0), t2), Some(1.5));
}

#[test]
fn capacity_is_bounded_and_evicts_the_least_accessed() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();
    for n in 0..CACHE_MAX_SIZE {
        cache.set_at(&id(n), 1.0, t0 + Duration::from_millis(n as u64));
    }
    assert_eq!(cache.len(), CACHE_MAX_SIZE);

    // Touch everything except one entry, which becomes the eviction victim.
    let victim = id(123);
    let t1 = t0 + Duration::from_secs(1);
    for n in 0..CACHE_MAX_SIZE {
        if id(n) != victim {
            cache.get_at(&id(n), t1);
        }
    }

    cache.set_at(&id(CACHE_MAX_SIZE), 2.0, t1);
    assert_eq!(cache.len(), CACHE_MAX_SIZE);
    assert!(!cache.contains(&victim));
    assert!(cache.contains(&id(CACHE_MAX_SIZE)));
}

#[test]
fn eviction_ties_break_by_oldest_timestamp() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();
    // No reads at all: every access count is zero, so the oldest insert goes first.
    for n in 0..CACHE_MAX_SIZE {
        cache.set_at(&id(n), 1.0, t0 + Duration::from_millis(n as u64));
    }
    cache.set_at(&id(CACHE_MAX_SIZE), 2.0, t0 + Duration::from_secs(1));
    assert!(!cache.contains(&id(0)));
    assert_eq!(cache.len(), CACHE_MAX_SIZE);
}

#[test]
fn concurrent_ensure_calls_collapse_into_one_fetch() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    let now = Instant::now();
    let content = ContentId::new("42");

    for _ in 0..2 {
        cache.ensure_at(
            &content,
            || Some("https://img.example/42".to_owned()),
            || None,
            &mut measurer,
            now,
        );
    }

    assert_eq!(measurer.begun.len(), 1);
    assert_eq!(cache.in_flight_len(), 1);
}

#[test]
fn ensure_prefers_the_metadata_ratio() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    let now = Instant::now();
    let content = id(0);

    cache.ensure_at(
        &content,
        || Some("https://img.example/0".to_owned()),
        || Some(4.0 / 3.0),
        &mut measurer,
        now,
    );

    assert!(measurer.begun.is_empty());
    assert_eq!(cache.in_flight_len(), 0);
    assert_eq!(cache.get_at(&content, now), Some(4.0 / 3.0));
}

#[test]
fn ensure_is_a_noop_for_cached_ids() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    let now = Instant::now();
    let content = id(0);
    cache.set_at(&content, 1.0, now);

    cache.ensure_at(
        &content,
        || panic!("url getter must not run for cached ids"),
        || panic!("metadata getter must not run for cached ids"),
        &mut measurer,
        now,
    );
    assert!(measurer.begun.is_empty());
}

#[test]
fn ensure_without_url_or_metadata_does_nothing() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    cache.ensure_at(&id(0), || None, || None, &mut measurer, Instant::now());
    assert!(measurer.begun.is_empty());
    assert_eq!(cache.in_flight_len(), 0);
}

#[test]
fn successful_measurement_lands_in_the_cache() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    let now = Instant::now();
    let content = id(0);

    cache.ensure_at(
        &content,
        || Some("https://img.example/0".to_owned()),
        || None,
        &mut measurer,
        now,
    );
    cache.complete_measurement_at(&content, Ok(1.25), now);

    assert_eq!(cache.in_flight_len(), 0);
    assert_eq!(cache.get_at(&content, now), Some(1.25));
}

#[test]
fn failed_measurement_leaves_the_id_unresolved() {
    let mut cache = AspectRatioCache::new();
    let mut measurer = CountingMeasurer::default();
    let now = Instant::now();
    let content = id(0);

    cache.ensure_at(
        &content,
        || Some("https://img.example/0".to_owned()),
        || None,
        &mut measurer,
        now,
    );
    cache.complete_measurement_at(&content, Err(TessellaError::measure("decode failed")), now);

    assert_eq!(cache.in_flight_len(), 0);
    assert_eq!(cache.get_at(&content, now), None);

    // A later pass may try again.
    cache.ensure_at(
        &content,
        || Some("https://img.example/0".to_owned()),
        || None,
        &mut measurer,
        now,
    );
    assert_eq!(measurer.begun.len(), 2);
}

#[test]
fn invalid_ratios_are_dropped() {
    let mut cache = AspectRatioCache::new();
    let now = Instant::now();
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        cache.set_at(&id(0), bad, now);
    }
    assert!(cache.is_empty());
}

#[test]
fn version_bumps_once_per_mutating_call() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();

    let v0 = cache.version();
    cache.set_at(&id(0), 1.0, t0);
    assert_eq!(cache.version(), v0 + 1);

    // A plain hit refreshes metadata without bumping the version.
    cache.get_at(&id(0), t0);
    assert_eq!(cache.version(), v0 + 1);

    // Expiry-on-read removes the entry: one bump.
    cache.get_at(&id(0), t0 + CACHE_TTL + Duration::from_millis(1));
    assert_eq!(cache.version(), v0 + 2);
}

#[test]
fn eviction_plus_insert_is_a_single_version_bump() {
    let mut cache = AspectRatioCache::new();
    let t0 = Instant::now();
    for n in 0..CACHE_MAX_SIZE {
        cache.set_at(&id(n), 1.0, t0 + Duration::from_millis(n as u64));
    }
    let v = cache.version();
    cache.set_at(&id(CACHE_MAX_SIZE), 1.0, t0 + Duration::from_secs(1));
    assert_eq!(cache.version(), v + 1);
}
