use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::canvas::model::ContentId;
use crate::foundation::error::TessellaResult;
use crate::ratio::measure::RatioMeasurer;

/// Maximum number of entries the cache holds.
pub const CACHE_MAX_SIZE: usize = 500;

/// Age past which an entry is treated as absent.
pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Clone, Copy, Debug)]
struct CacheEntry {
    ratio: f64,
    timestamp: Instant,
    access_count: u64,
}

/// Bounded, time-limited store of measured/known intrinsic aspect ratios per content id.
///
/// Eviction at capacity is an LRU/LFU hybrid: the entry with the lowest access count goes
/// first, ties broken by oldest timestamp. Reads refresh both recency and frequency. A
/// monotonically increasing version counter, bumped at most once per mutating call, lets
/// dependents treat the cache as observable without reacting to every individual mutation.
///
/// Mutation from multiple call sites is last-writer-wins, which is safe because re-measuring
/// the same content id is idempotent.
#[derive(Debug, Default)]
pub struct AspectRatioCache {
    entries: HashMap<ContentId, CacheEntry>,
    in_flight: HashSet<ContentId>,
    version: u64,
}

impl AspectRatioCache {
    /// Construct an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached ratio for `id`, or `None`.
    ///
    /// An entry older than [`CACHE_TTL`] is deleted and reported absent. A hit increments the
    /// entry's access count and refreshes its timestamp.
    pub fn get(&mut self, id: &ContentId) -> Option<f64> {
        self.get_at(id, Instant::now())
    }

    /// [`Self::get`] with an injected clock.
    pub fn get_at(&mut self, id: &ContentId, now: Instant) -> Option<f64> {
        let entry = self.entries.get_mut(id)?;
        if now.duration_since(entry.timestamp) <= CACHE_TTL {
            entry.access_count += 1;
            entry.timestamp = now;
            return Some(entry.ratio);
        }
        self.entries.remove(id);
        self.bump();
        None
    }

    /// Insert or overwrite the ratio for `id`.
    ///
    /// Non-finite or non-positive ratios are dropped. At capacity the lowest-access-count
    /// entry (oldest timestamp on ties) is evicted first. One version bump per call, even
    /// when it both evicts and inserts.
    pub fn set(&mut self, id: &ContentId, ratio: f64) {
        self.set_at(id, ratio, Instant::now());
    }

    /// [`Self::set`] with an injected clock.
    pub fn set_at(&mut self, id: &ContentId, ratio: f64, now: Instant) {
        if !ratio.is_finite() || ratio <= 0.0 {
            tracing::debug!(id = id.as_str(), ratio, "dropping invalid aspect ratio");
            return;
        }

        if !self.entries.contains_key(id) && self.entries.len() >= CACHE_MAX_SIZE {
            let victim = self
                .entries
                .iter()
                .min_by(|(_, a), (_, b)| {
                    a.access_count
                        .cmp(&b.access_count)
                        .then(a.timestamp.cmp(&b.timestamp))
                })
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                tracing::debug!(id = victim.as_str(), "evicting aspect-ratio entry");
                self.entries.remove(&victim);
            }
        }

        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.ratio = ratio;
                entry.timestamp = now;
            }
            None => {
                self.entries.insert(
                    id.clone(),
                    CacheEntry {
                        ratio,
                        timestamp: now,
                        access_count: 0,
                    },
                );
            }
        }
        self.bump();
    }

    /// Make sure a ratio for `id` is cached or being measured; idempotent.
    ///
    /// No-op when `id` is already cached (and fresh) or already in flight. A synchronous
    /// metadata-provided ratio is preferred; otherwise the id is marked in flight and the
    /// injected measurer begins one asynchronous measurement of the image URL. Concurrent
    /// calls for the same id collapse into one underlying fetch.
    pub fn ensure(
        &mut self,
        id: &ContentId,
        url: impl FnOnce() -> Option<String>,
        metadata_ratio: impl FnOnce() -> Option<f64>,
        measurer: &mut dyn RatioMeasurer,
    ) {
        self.ensure_at(id, url, metadata_ratio, measurer, Instant::now());
    }

    /// [`Self::ensure`] with an injected clock.
    pub fn ensure_at(
        &mut self,
        id: &ContentId,
        url: impl FnOnce() -> Option<String>,
        metadata_ratio: impl FnOnce() -> Option<f64>,
        measurer: &mut dyn RatioMeasurer,
        now: Instant,
    ) {
        if self.contains_fresh_at(id, now) || self.in_flight.contains(id) {
            return;
        }
        if let Some(ratio) = metadata_ratio().filter(|r| r.is_finite() && *r > 0.0) {
            self.set_at(id, ratio, now);
            return;
        }
        if let Some(url) = url() {
            self.in_flight.insert(id.clone());
            measurer.begin(id, &url);
        }
    }

    /// Host callback for a finished asynchronous measurement.
    ///
    /// Clears the in-flight mark; a successful ratio is stored, a failure leaves the id
    /// unresolved and is not surfaced. A stale completion arriving after the interaction that
    /// requested it simply populates the cache for future use.
    pub fn complete_measurement(&mut self, id: &ContentId, result: TessellaResult<f64>) {
        self.complete_measurement_at(id, result, Instant::now());
    }

    /// [`Self::complete_measurement`] with an injected clock.
    pub fn complete_measurement_at(
        &mut self,
        id: &ContentId,
        result: TessellaResult<f64>,
        now: Instant,
    ) {
        self.in_flight.remove(id);
        match result {
            Ok(ratio) => self.set_at(id, ratio, now),
            Err(err) => {
                tracing::debug!(id = id.as_str(), %err, "aspect-ratio measurement failed");
            }
        }
    }

    /// Monotonically increasing version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of stored entries (fresh or not yet expired-on-read).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `true` when an entry for `id` exists, regardless of age.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of measurements currently in flight.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    fn contains_fresh_at(&self, id: &ContentId, now: Instant) -> bool {
        self.entries
            .get(id)
            .is_some_and(|e| now.duration_since(e.timestamp) <= CACHE_TTL)
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ratio/cache.rs"]
mod tests;
