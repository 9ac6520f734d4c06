use crate::algorithm::bitset::PatternBitset;
use crate::io::configuration::SUPPORT_CACHE_CAPACITY;
use std::collections::HashMap;

/// Key for caching support computations
///
/// Identifies the possibility set of a source cell and the offset towards
/// the neighbor being narrowed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SupportKey {
    sources: PatternBitset,
    offset_index: usize,
}

impl SupportKey {
    /// Create a key from a source possibility set and offset index
    pub fn new(sources: &PatternBitset, offset_index: usize) -> Self {
        Self {
            sources: sources.clone(),
            offset_index,
        }
    }
}

/// Memoization cache for adjacency support sets
///
/// Propagation repeatedly asks which patterns a given possibility set allows
/// at a given offset; fully collapsed regions ask the same question many
/// times. The cache is flushed once it reaches its capacity.
#[derive(Debug)]
pub struct SupportCache {
    /// Possibility set and offset to allowed patterns mapping
    support_cache: HashMap<SupportKey, PatternBitset>,

    /// Maximum number of entries before flushing
    capacity: usize,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of times the cache was flushed for capacity
    pub flushes: usize,
}

impl Default for SupportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportCache {
    /// Create an empty cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(SUPPORT_CACHE_CAPACITY)
    }

    /// Create an empty cache holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            support_cache: HashMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.support_cache.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.support_cache.is_empty()
    }

    /// Drop all entries and statistics
    pub fn clear(&mut self) {
        self.support_cache.clear();
        self.stats = CacheStats::default();
    }

    /// Retrieve cached result or compute and store new one
    ///
    /// Uses the provided closure to compute the support set only when the
    /// key is not already cached.
    pub fn get_or_compute_support<F>(&mut self, key: SupportKey, compute_fn: F) -> &PatternBitset
    where
        F: FnOnce() -> PatternBitset,
    {
        use std::collections::hash_map::Entry;

        if self.support_cache.len() >= self.capacity && !self.support_cache.contains_key(&key) {
            self.support_cache.clear();
            self.stats.flushes += 1;
        }

        match self.support_cache.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(compute_fn())
            }
        }
    }
}
