use crate::errors::KbResult;

/// Text → dense vector provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> KbResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;

    /// Identifier stored next to every vector this provider produces.
    /// Vectors with different identifiers are never compared.
    fn model_id(&self) -> String {
        format!("{}/{}", self.name(), self.dimensions())
    }

    /// Embed and report which model produced the vector. Providers that can
    /// fall back internally override this so the tag names the model that
    /// actually served the request.
    fn embed_tagged(&self, text: &str) -> KbResult<(Vec<f32>, String)> {
        Ok((self.embed(text)?, self.model_id()))
    }

    /// Batch form of [`embed_tagged`](Self::embed_tagged).
    fn embed_batch_tagged(&self, texts: &[String]) -> KbResult<Vec<(Vec<f32>, String)>> {
        let model = self.model_id();
        Ok(self
            .embed_batch(texts)?
            .into_iter()
            .map(|v| (v, model.clone()))
            .collect())
    }
}
