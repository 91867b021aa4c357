use crate::errors::KbResult;
use crate::models::{SearchRequest, SearchResult};

/// A complete `(request) -> result` search pipeline.
pub trait IKnowledgeSearcher: Send + Sync {
    fn search(&self, request: &SearchRequest) -> KbResult<SearchResult>;
}

impl<T: IKnowledgeSearcher> IKnowledgeSearcher for std::sync::Arc<T> {
    fn search(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        (**self).search(request)
    }
}
