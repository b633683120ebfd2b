//! Reverse geocoding behind a memoization cache.
//!
//! Looking up a place name is a network call, and map panning asks for the
//! same coordinates over and over. `PlaceCache` remembers every successful
//! answer for as long as the cache value lives; there is no eviction and no
//! expiry. Callers own the cache and decide its lifetime, typically one per
//! map view.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::Result;

/// Resolves a coordinate pair to a human-readable place name.
///
/// Implementations wrap whatever geocoding service the embedding
/// application talks to. Failures are expected; `PlaceCache` logs them and
/// substitutes the raw coordinates.
pub trait ReverseGeocode {
    fn place_name(&self, latitude: f64, longitude: f64) -> Result<String>;
}

/// Memoizing wrapper around a [`ReverseGeocode`] provider.
///
/// Cache keys are the coordinate pair formatted at six decimal places, the
/// precision the platform API echoes coordinates with, so repeated lookups
/// of the same record never reach the provider twice. Only successful
/// answers are cached; a failed lookup falls back to the coordinate string
/// and a later call for the same pair retries the provider.
///
/// Lookups take `&self` and are safe to share across threads. Concurrent
/// misses on one key may each call the provider; the last answer wins.
///
/// # Examples
///
/// ```
/// use obsmap::{PlaceCache, ReverseGeocode, Result};
///
/// struct Fixed;
///
/// impl ReverseGeocode for Fixed {
///     fn place_name(&self, _lat: f64, _lng: f64) -> Result<String> {
///         Ok("Jakarta, Indonesia".to_string())
///     }
/// }
///
/// let cache = PlaceCache::new(Fixed);
/// assert_eq!(cache.resolve(-6.2, 106.8), "Jakarta, Indonesia");
/// assert_eq!(cache.len(), 1);
/// ```
pub struct PlaceCache<G> {
    provider: G,
    entries: Mutex<FxHashMap<String, String>>,
}

impl<G: ReverseGeocode> PlaceCache<G> {
    /// Creates an empty cache around a provider.
    pub fn new(provider: G) -> Self {
        Self {
            provider,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    /// Returns the place name for a coordinate pair.
    ///
    /// Cache hits return the stored name without touching the provider.
    /// On a miss the provider is called once and its answer stored. When
    /// the provider fails, the failure is logged and the raw coordinates
    /// are returned as the name; nothing is cached in that case.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> String {
        let key = cache_key(latitude, longitude);

        if let Some(hit) = self.entries.lock().get(&key) {
            return hit.clone();
        }

        match self.provider.place_name(latitude, longitude) {
            Ok(name) => {
                self.entries.lock().insert(key, name.clone());
                name
            }
            Err(err) => {
                log::warn!("Reverse geocoding failed for {}: {}", key, err);
                fallback_name(latitude, longitude)
            }
        }
    }

    /// Number of cached place names.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn cache_key(latitude: f64, longitude: f64) -> String {
    format!("{:.6},{:.6}", latitude, longitude)
}

/// The place name shown when no provider answer is available.
fn fallback_name(latitude: f64, longitude: f64) -> String {
    format!("{}, {}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObsmapError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Counting {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ReverseGeocode for Counting {
        fn place_name(&self, latitude: f64, longitude: f64) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ObsmapError::Geocode("service unavailable".to_string()))
            } else {
                Ok(format!("place at {:.1},{:.1}", latitude, longitude))
            }
        }
    }

    #[test]
    fn test_one_provider_call_per_unique_pair() {
        let cache = PlaceCache::new(Counting::new(false));

        let first = cache.resolve(-6.2, 106.8);
        for _ in 0..10 {
            assert_eq!(cache.resolve(-6.2, 106.8), first);
        }
        assert_eq!(cache.provider.calls(), 1);

        cache.resolve(-7.0, 110.0);
        assert_eq!(cache.provider.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_key_precision_collapses_nearby_pairs() {
        let cache = PlaceCache::new(Counting::new(false));

        // Differ only past the sixth decimal, so they share a key.
        cache.resolve(-6.2000001, 106.8000001);
        cache.resolve(-6.2000004, 106.8000004);
        assert_eq!(cache.provider.calls(), 1);

        // A sixth-decimal difference is a distinct key.
        cache.resolve(-6.200001, 106.8000001);
        assert_eq!(cache.provider.calls(), 2);
    }

    #[test]
    fn test_failure_returns_coordinate_fallback() {
        let cache = PlaceCache::new(Counting::new(true));
        assert_eq!(cache.resolve(-6.2, 106.8), "-6.2, 106.8");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = PlaceCache::new(Counting::new(true));
        cache.resolve(-6.2, 106.8);
        cache.resolve(-6.2, 106.8);

        // Each attempt reached the provider again.
        assert_eq!(cache.provider.calls(), 2);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(PlaceCache::new(Counting::new(false)));
        cache.resolve(-6.2, 106.8);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.resolve(-6.2, 106.8))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "place at -6.2,106.8");
        }
        // Warmed before spawning, so the provider was called exactly once.
        assert_eq!(cache.provider.calls(), 1);
    }
}
