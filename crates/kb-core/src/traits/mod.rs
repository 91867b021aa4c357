pub mod embedding;
pub mod searcher;
pub mod stemmer;
pub mod storage;

pub use embedding::IEmbeddingProvider;
pub use searcher::IKnowledgeSearcher;
pub use stemmer::IStemmer;
pub use storage::IKnowledgeStorage;
