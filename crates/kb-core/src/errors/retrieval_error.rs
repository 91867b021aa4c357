/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("no results found for query")]
    NoResults,

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("{strategy} strategy failed: {reason}")]
    StrategyFailed { strategy: String, reason: String },
}
