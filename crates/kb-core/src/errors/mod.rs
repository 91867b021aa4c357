//! Error taxonomy. One enum per subsystem, folded into [`KbError`].

pub mod configuration_error;
pub mod embedding_error;
pub mod retrieval_error;
pub mod storage_error;

pub use configuration_error::ConfigurationError;
pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Result alias used across the workspace.
pub type KbResult<T> = Result<T, KbError>;

/// Top-level error for the knowledge retrieval engine.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("knowledge entry not found: {id}")]
    EntryNotFound { id: i64 },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl KbError {
    /// Shorthand for an [`KbError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True when the lexical storage failed and callers should degrade to
    /// the substring fallback.
    pub fn is_index_unavailable(&self) -> bool {
        matches!(self, Self::StorageError(_))
    }

    /// True when the vector strategy should silently contribute nothing.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingError(
                EmbeddingError::ProviderUnavailable { .. }
                    | EmbeddingError::VectorSearchDisabled
                    | EmbeddingError::ModelNotLoaded { .. }
            )
        )
    }
}
