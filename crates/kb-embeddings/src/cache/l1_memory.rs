//! L1 in-memory embedding cache using moka.
//!
//! TinyLFU admission, bounded entry count, idle and absolute TTL.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache. Keys are blake3 hashes of the producing
/// provider's name and the embedded text.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    /// Create a new L1 cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600)) // 1 hour idle TTL
            .time_to_live(Duration::from_secs(86400)) // 24 hour max TTL
            .build();

        Self { cache }
    }

    /// Cache key for `text` as embedded by `provider`.
    pub fn key_for(provider: &str, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(provider.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = L1MemoryCache::new(100);
        let key = L1MemoryCache::key_for("tfidf", "takaful");
        cache.insert(key.clone(), vec![1.0, 2.0, 3.0]);
        assert_eq!(cache.get(&key), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn keys_are_stable_and_distinct() {
        assert_eq!(L1MemoryCache::key_for("p", "a"), L1MemoryCache::key_for("p", "a"));
        assert_ne!(L1MemoryCache::key_for("p", "a"), L1MemoryCache::key_for("p", "b"));
    }

    #[test]
    fn keys_are_scoped_by_provider() {
        assert_ne!(
            L1MemoryCache::key_for("ollama", "takaful"),
            L1MemoryCache::key_for("tfidf", "takaful")
        );
        // The separator keeps name/text boundaries unambiguous.
        assert_ne!(L1MemoryCache::key_for("ab", "c"), L1MemoryCache::key_for("a", "bc"));
    }

    #[test]
    fn clear_empties_cache() {
        let cache = L1MemoryCache::new(100);
        cache.insert("a".to_string(), vec![1.0]);
        cache.insert("b".to_string(), vec![2.0]);
        cache.clear();
        // entry_count lags invalidation; get does not.
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }
}
