//! ResultCache: moka TTL cache of search results and formatted contexts,
//! plus the `CachedSearcher` decorator.

pub mod cached_searcher;
pub mod key;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use kb_core::config::CacheConfig;
use kb_core::models::{CacheStats, FormattedContext, SearchResult};
use moka::sync::Cache;

pub use cached_searcher::CachedSearcher;
pub use key::{cache_key, PayloadKind};

#[derive(Debug, Clone)]
enum Payload {
    Result(SearchResult),
    Context(FormattedContext),
}

/// Bounded TTL cache with hit/miss counters.
pub struct ResultCache {
    cache: Cache<String, Payload>,
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        Self {
            cache,
            enabled: config.enabled,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn lookup(&self, key: &str) -> Option<Payload> {
        if !self.enabled {
            return None;
        }
        let found = self.cache.get(key);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn get_result(&self, key: &str) -> Option<SearchResult> {
        match self.lookup(key)? {
            Payload::Result(r) => Some(r),
            Payload::Context(_) => None,
        }
    }

    pub fn get_context(&self, key: &str) -> Option<FormattedContext> {
        match self.lookup(key)? {
            Payload::Context(c) => Some(c),
            Payload::Result(_) => None,
        }
    }

    pub fn put_result(&self, key: String, result: SearchResult) {
        if self.enabled {
            self.cache.insert(key, Payload::Result(result));
        }
    }

    pub fn put_context(&self, key: String, context: FormattedContext) {
        if self.enabled {
            self.cache.insert(key, Payload::Context(context));
        }
    }

    /// Drop every cached payload. Counters are kept.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        kb_observability::tracing_setup::events::cache_cleared("explicit flush");
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        CacheStats {
            hits,
            misses,
            entries: self.cache.entry_count(),
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::models::SearchMethod;

    fn cache() -> ResultCache {
        ResultCache::new(&CacheConfig::default())
    }

    #[test]
    fn miss_then_hit() {
        let c = cache();
        assert!(c.get_result("k").is_none());
        c.put_result("k".into(), SearchResult::empty(SearchMethod::None, 1));
        assert!(c.get_result("k").is_some());
        let stats = c.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn payload_kinds_do_not_mix() {
        let c = cache();
        c.put_context("k".into(), FormattedContext::default());
        assert!(c.get_result("k").is_none());
        assert!(c.get_context("k").is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let c = cache();
        c.put_result("k".into(), SearchResult::empty(SearchMethod::None, 0));
        c.clear();
        assert!(c.get_result("k").is_none());
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let c = ResultCache::new(&CacheConfig {
            enabled: false,
            ..Default::default()
        });
        c.put_result("k".into(), SearchResult::empty(SearchMethod::None, 0));
        assert!(c.get_result("k").is_none());
        assert_eq!(c.stats().misses, 0);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let c = ResultCache::new(&CacheConfig {
            ttl_secs: 1,
            ..Default::default()
        });
        c.put_result("k".into(), SearchResult::empty(SearchMethod::None, 0));
        std::thread::sleep(Duration::from_millis(1_200));
        assert!(c.get_result("k").is_none());
    }
}
