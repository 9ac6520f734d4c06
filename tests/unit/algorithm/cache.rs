//! Tests for support caching behavior including hit/miss tracking and key uniqueness

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::PatternBitset;
    use wavetile::algorithm::cache::{SupportCache, SupportKey};

    // Verifies new cache starts with 0 hits and 0 misses
    // Verified by initializing cache with non-zero hit and miss counts
    #[test]
    fn test_cache_new() {
        let cache = SupportCache::new();
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(cache.stats.misses, 0);
        assert!(cache.is_empty());
    }

    // Tests support key equality from identical source sets
    // Verified by making key equality include a per-instance counter
    #[test]
    fn test_support_key_creation() {
        let sources = PatternBitset::single(6, 2);
        assert_eq!(SupportKey::new(&sources, 1), SupportKey::new(&sources, 1));
        assert_ne!(SupportKey::new(&sources, 1), SupportKey::new(&sources, 2));
    }

    // Tests cache miss on first access and hit on second
    // Verified by removing hit counter increment logic
    #[test]
    fn test_cache_miss_and_hit() {
        let mut cache = SupportCache::new();
        let key = SupportKey::new(&PatternBitset::all(10), 0);

        let mut compute_count = 0;
        let first = cache
            .get_or_compute_support(key.clone(), || {
                compute_count += 1;
                PatternBitset::single(10, 5)
            })
            .to_vec();

        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(first, vec![5]);

        let second = cache
            .get_or_compute_support(key, || {
                compute_count += 1;
                PatternBitset::single(10, 9)
            })
            .to_vec();

        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(second, vec![5]);
        assert_eq!(compute_count, 1);
    }

    // Tests different source sets produce different cache entries
    // Verified by making the key ignore the source bitset
    #[test]
    fn test_different_sources_different_results() {
        let mut cache = SupportCache::new();
        let key1 = SupportKey::new(&PatternBitset::single(4, 0), 0);
        let key2 = SupportKey::new(&PatternBitset::single(4, 1), 0);

        let first = cache
            .get_or_compute_support(key1, || PatternBitset::single(4, 3))
            .to_vec();
        let second = cache
            .get_or_compute_support(key2, || PatternBitset::single(4, 2))
            .to_vec();

        assert_eq!(first, vec![3]);
        assert_eq!(second, vec![2]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats.misses, 2);
    }

    // Tests the cache flushes instead of growing past its capacity
    // Verified by skipping the capacity check before insertion
    #[test]
    fn test_capacity_flush() {
        let mut cache = SupportCache::with_capacity(2);
        for pattern in 0..3 {
            let key = SupportKey::new(&PatternBitset::single(4, pattern), 0);
            cache.get_or_compute_support(key, || PatternBitset::all(4));
        }

        assert_eq!(cache.stats.flushes, 1);
        assert_eq!(cache.len(), 1);
    }

    // Tests a hit on a full cache keeps the existing entries
    // Verified by flushing whenever the cache is full
    #[test]
    fn test_hit_on_full_cache_does_not_flush() {
        let mut cache = SupportCache::with_capacity(1);
        let key = SupportKey::new(&PatternBitset::single(3, 1), 2);
        cache.get_or_compute_support(key.clone(), || PatternBitset::all(3));
        cache.get_or_compute_support(key, || PatternBitset::new(3));

        assert_eq!(cache.stats.flushes, 0);
        assert_eq!(cache.stats.hits, 1);
    }

    // Tests clearing removes entries and statistics
    // Verified by leaving statistics untouched on clear
    #[test]
    fn test_clear() {
        let mut cache = SupportCache::new();
        cache.get_or_compute_support(SupportKey::new(&PatternBitset::all(2), 0), || {
            PatternBitset::all(2)
        });
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats.misses, 0);
    }
}
