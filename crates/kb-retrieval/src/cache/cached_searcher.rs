//! Cache decorator around any `(request) -> SearchResult` pipeline.

use std::sync::Arc;

use kb_core::errors::KbResult;
use kb_core::models::{SearchRequest, SearchResult};
use kb_core::traits::IKnowledgeSearcher;
use tracing::debug;

use super::{cache_key, PayloadKind, ResultCache};

pub struct CachedSearcher<S> {
    inner: S,
    cache: Arc<ResultCache>,
}

impl<S: IKnowledgeSearcher> CachedSearcher<S> {
    pub fn new(inner: S, cache: Arc<ResultCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Serve from cache or compute and store. The flag is true on a hit.
    /// Errors are never cached.
    pub fn search_cached(&self, request: &SearchRequest) -> KbResult<(SearchResult, bool)> {
        let key = cache_key(PayloadKind::Result, request);
        if let Some(hit) = self.cache.get_result(&key) {
            debug!(query = %request.query, "result cache hit");
            return Ok((hit, true));
        }
        let result = self.inner.search(request)?;
        self.cache.put_result(key, result.clone());
        Ok((result, false))
    }
}

impl<S: IKnowledgeSearcher> IKnowledgeSearcher for CachedSearcher<S> {
    fn search(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        self.search_cached(request).map(|(result, _)| result)
    }
}
