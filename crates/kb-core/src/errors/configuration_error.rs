/// Configuration and model-compatibility errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown embedding provider: {name}")]
    UnknownProvider { name: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid weight {name} = {value}")]
    InvalidWeight { name: String, value: f64 },

    #[error("unknown category: {name}")]
    UnknownCategory { name: String },
}
