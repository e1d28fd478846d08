//! Aspect-ratio cache and measurement seam.
//!
//! The cache is an explicit service object: constructed once by the host and passed by
//! reference to every call site, never a hidden global. Measurement of unknown ratios is
//! delegated to the host through [`measure::RatioMeasurer`] and re-enters through
//! [`cache::AspectRatioCache::complete_measurement`] on a later pass.

/// Bounded, TTL-limited aspect-ratio store.
pub mod cache;
/// Measurement seam and image-header probing.
pub mod measure;
