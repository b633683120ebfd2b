use obsmap::{ObsmapError, PlaceCache, ReverseGeocode, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Provider that counts outbound calls and can be made to fail for the
/// first N of them. The counter is shared so tests can read it after the
/// provider moves into the cache.
struct MockGeocoder {
    calls: Arc<AtomicUsize>,
    fail_remaining: AtomicUsize,
}

impl MockGeocoder {
    fn new() -> (Self, Arc<AtomicUsize>) {
        Self::failing_first(0)
    }

    fn failing_first(n: usize) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let geocoder = Self {
            calls: Arc::clone(&calls),
            fail_remaining: AtomicUsize::new(n),
        };
        (geocoder, calls)
    }
}

impl ReverseGeocode for MockGeocoder {
    fn place_name(&self, latitude: f64, longitude: f64) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ObsmapError::Geocode("upstream 503".to_string()));
        }
        Ok(format!("near {:.2}, {:.2}", latitude, longitude))
    }
}

#[test]
fn test_single_outbound_call_per_pair() {
    let (provider, calls) = MockGeocoder::new();
    let cache = PlaceCache::new(provider);

    let name = cache.resolve(-6.2, 106.8);
    for _ in 0..25 {
        assert_eq!(cache.resolve(-6.2, 106.8), name);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_each_unique_pair_calls_once() {
    let (provider, calls) = MockGeocoder::new();
    let cache = PlaceCache::new(provider);

    let pairs = [(-6.2, 106.8), (-6.21, 106.81), (-7.0, 110.0)];
    for _ in 0..3 {
        for (lat, lng) in pairs {
            cache.resolve(lat, lng);
        }
    }

    assert_eq!(calls.load(Ordering::SeqCst), pairs.len());
    assert_eq!(cache.len(), pairs.len());
}

#[test]
fn test_failure_falls_back_to_coordinates_and_retries() {
    let (provider, calls) = MockGeocoder::failing_first(1);
    let cache = PlaceCache::new(provider);

    // First attempt fails: coordinate fallback, nothing cached.
    assert_eq!(cache.resolve(-6.2, 106.8), "-6.2, 106.8");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.is_empty());

    // Second attempt reaches the provider again and caches the answer.
    assert_eq!(cache.resolve(-6.2, 106.8), "near -6.20, 106.80");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 1);

    // Third is a pure cache hit.
    assert_eq!(cache.resolve(-6.2, 106.8), "near -6.20, 106.80");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_key_precision_is_six_decimals() {
    let (provider, calls) = MockGeocoder::new();
    let cache = PlaceCache::new(provider);

    // Sub-micro-degree differences share a cache entry.
    cache.resolve(-6.2000000, 106.8000000);
    cache.resolve(-6.2000001, 106.8000003);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A one-micro-degree difference does not.
    cache.resolve(-6.200001, 106.8);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_cache_lifetime_is_injectable() {
    let (provider, calls) = MockGeocoder::new();

    {
        let cache = PlaceCache::new(provider);
        cache.resolve(-6.2, 106.8);
    } // cache dropped, memoized names gone with it

    let (provider, fresh_calls) = MockGeocoder::new();
    let cache = PlaceCache::new(provider);
    cache.resolve(-6.2, 106.8);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(fresh_calls.load(Ordering::SeqCst), 1);
}
