//! # kb-embeddings
//!
//! Text → vector generation for the vector strategy.
//!
//! ```text
//! EmbeddingEngine
//! ├── DegradationChain (provider fallback)
//! │   ├── OllamaProvider (local HTTP, optional)
//! │   └── TfIdfFallback (always available)
//! └── L1MemoryCache (moka, keyed by blake3 of provider and text)
//! ```

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;

pub use cache::L1MemoryCache;
pub use degradation::DegradationChain;
pub use engine::{l2_normalize, EmbeddingEngine};
pub use providers::{create_provider, OllamaProvider, TfIdfFallback};
