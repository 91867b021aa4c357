/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding model not loaded: {model}")]
    ModelNotLoaded { model: String },

    #[error("vector search is disabled")]
    VectorSearchDisabled,
}
