//! EmbeddingEngine: provider fallback chain plus L1 cache.
//! Implements `IEmbeddingProvider`.

use std::sync::atomic::{AtomicU64, Ordering};

use kb_core::config::EmbeddingConfig;
use kb_core::errors::{ConfigurationError, KbResult};
use kb_core::models::DegradationEvent;
use kb_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::degradation::DegradationChain;
use crate::providers;

/// Scale a vector to unit L2 norm in place. Zero vectors are left as is.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cached, fallback-aware embedding engine. All output is L2-normalized and
/// checked against the configured dimensions.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
    lookups: AtomicU64,
    hits: AtomicU64,
}

impl EmbeddingEngine {
    /// Build from config: the configured provider, then TF-IDF as the last
    /// resort when the primary is something else.
    pub fn new(config: EmbeddingConfig) -> KbResult<Self> {
        let primary = providers::create_provider(&config)?;
        let needs_fallback = primary.name() != "tfidf";

        let mut chain = DegradationChain::new();
        chain.push(primary);
        if needs_fallback {
            chain.push(Box::new(providers::TfIdfFallback::new(config.dimensions)));
        }
        Ok(Self::from_chain(chain, config))
    }

    /// Wrap a single caller-supplied provider.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        chain.push(provider);
        Self::from_chain(chain, config)
    }

    fn from_chain(chain: DegradationChain, config: EmbeddingConfig) -> Self {
        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );
        Self {
            cache: L1MemoryCache::new(config.l1_cache_size),
            chain,
            config,
            lookups: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    fn finish(&self, mut v: Vec<f32>) -> KbResult<Vec<f32>> {
        if v.len() != self.config.dimensions {
            return Err(ConfigurationError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: v.len(),
            }
            .into());
        }
        l2_normalize(&mut v);
        Ok(v)
    }

    fn tag(&self, provider: &str) -> String {
        format!("{provider}/{}", self.config.dimensions)
    }

    /// Embed one text through the cache.
    pub fn embed_text(&self, text: &str) -> KbResult<Vec<f32>> {
        self.embed_text_tagged(text).map(|(v, _)| v)
    }

    /// Embed one text and return the model id of the provider that produced
    /// it. Cache entries are scoped to their producing provider, so a
    /// fallback vector is never served once the primary is back.
    pub fn embed_text_tagged(&self, text: &str) -> KbResult<(Vec<f32>, String)> {
        let active = self.chain.active_provider_name();
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if let Some(vec) = self.cache.get(&L1MemoryCache::key_for(active, text)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok((vec, self.tag(active)));
        }

        let (raw, provider) = self.chain.embed(text)?;
        debug!(provider, chars = text.len(), "embedded text");
        let vec = self.finish(raw)?;
        self.cache
            .insert(L1MemoryCache::key_for(provider, text), vec.clone());
        Ok((vec, self.tag(provider)))
    }

    /// Embed many texts, `batch_size` at a time. Cached texts are not re-sent.
    pub fn embed_texts(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
        Ok(self
            .embed_texts_tagged(texts)?
            .into_iter()
            .map(|(v, _)| v)
            .collect())
    }

    /// Batch form of [`Self::embed_text_tagged`]. Chunks served by different
    /// providers carry different tags.
    pub fn embed_texts_tagged(&self, texts: &[String]) -> KbResult<Vec<(Vec<f32>, String)>> {
        let active = self.chain.active_provider_name();
        let mut out: Vec<Option<(Vec<f32>, String)>> = Vec::with_capacity(texts.len());
        let mut missing: Vec<usize> = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            match self.cache.get(&L1MemoryCache::key_for(active, text)) {
                Some(v) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    out.push(Some((v, self.tag(active))));
                }
                None => {
                    out.push(None);
                    missing.push(i);
                }
            }
        }

        for chunk in missing.chunks(self.config.batch_size.max(1)) {
            let batch: Vec<String> = chunk.iter().map(|&i| texts[i].clone()).collect();
            let (raw, provider) = self.chain.embed_batch(&batch)?;
            let model = self.tag(provider);
            for (&i, v) in chunk.iter().zip(raw) {
                let v = self.finish(v)?;
                self.cache
                    .insert(L1MemoryCache::key_for(provider, &texts[i]), v.clone());
                out[i] = Some((v, model.clone()));
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Model id of the provider that would serve the next request.
    pub fn model_id(&self) -> String {
        self.tag(self.active_provider())
    }

    /// `(hits, lookups)` of the L1 cache.
    pub fn cache_counters(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.lookups.load(Ordering::Relaxed),
        )
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> KbResult<Vec<f32>> {
        self.embed_text(text)
    }

    fn embed_batch(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
        self.embed_texts(texts)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        self.chain.active_provider_name()
    }

    fn is_available(&self) -> bool {
        self.chain.active_provider().is_some()
    }

    fn model_id(&self) -> String {
        EmbeddingEngine::model_id(self)
    }

    fn embed_tagged(&self, text: &str) -> KbResult<(Vec<f32>, String)> {
        self.embed_text_tagged(text)
    }

    fn embed_batch_tagged(&self, texts: &[String]) -> KbResult<Vec<(Vec<f32>, String)>> {
        self.embed_texts_tagged(texts)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use super::*;

    fn tfidf_engine(dims: usize) -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "tfidf".to_string(),
            dimensions: dims,
            batch_size: 2,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn embed_returns_configured_dims() {
        let engine = tfidf_engine(128);
        assert_eq!(engine.embed_text("assurance takaful").unwrap().len(), 128);
        assert_eq!(engine.active_provider(), "tfidf");
    }

    #[test]
    fn repeated_text_hits_cache() {
        let engine = tfidf_engine(64);
        let a = engine.embed_text("contact agence").unwrap();
        let b = engine.embed_text("contact agence").unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache_counters(), (1, 2));
    }

    #[test]
    fn batch_spans_chunks_and_keeps_order() {
        let engine = tfidf_engine(64);
        let texts: Vec<String> = ["un sinistre", "paiement", "agence sfax", "santé"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        engine.embed_text("paiement").unwrap();
        let batch = engine.embed_texts(&texts).unwrap();
        assert_eq!(batch.len(), 4);
        for (text, vec) in texts.iter().zip(&batch) {
            assert_eq!(&engine.embed_text(text).unwrap(), vec);
        }
    }

    struct WrongDims;
    impl IEmbeddingProvider for WrongDims {
        fn embed(&self, _text: &str) -> KbResult<Vec<f32>> {
            Ok(vec![3.0, 4.0])
        }
        fn embed_batch(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![3.0, 4.0]).collect())
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "wrong"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn dimension_mismatch_is_configuration_error() {
        let engine = EmbeddingEngine::with_provider(
            Box::new(WrongDims),
            EmbeddingConfig {
                dimensions: 3,
                ..Default::default()
            },
        );
        let err = engine.embed_text("x").unwrap_err();
        assert!(matches!(
            err,
            kb_core::KbError::Configuration(ConfigurationError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn output_is_normalized() {
        let engine = EmbeddingEngine::with_provider(
            Box::new(WrongDims),
            EmbeddingConfig {
                dimensions: 2,
                ..Default::default()
            },
        );
        let v = engine.embed_text("x").unwrap();
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ollama_config_falls_back_to_tfidf() {
        let engine = EmbeddingEngine::new(EmbeddingConfig {
            provider: "ollama".into(),
            base_url: Some("http://127.0.0.1:9".into()),
            dimensions: 32,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(engine.active_provider(), "tfidf");
        assert_eq!(engine.embed_text("takaful").unwrap().len(), 32);
        let events = engine.drain_degradation_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fallback_used, "tfidf");
    }

    /// Serves a constant vector until its switch is flipped off.
    struct Switchable {
        up: Arc<AtomicBool>,
    }
    impl IEmbeddingProvider for Switchable {
        fn embed(&self, _text: &str) -> KbResult<Vec<f32>> {
            if self.up.load(Ordering::SeqCst) {
                Ok(vec![1.0; 16])
            } else {
                Err(kb_core::errors::EmbeddingError::ProviderUnavailable {
                    provider: "primary".into(),
                }
                .into())
            }
        }
        fn embed_batch(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            16
        }
        fn name(&self) -> &str {
            "primary"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn switchable_engine(up: Arc<AtomicBool>) -> EmbeddingEngine {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Switchable { up }));
        chain.push(Box::new(providers::TfIdfFallback::new(16)));
        EmbeddingEngine::from_chain(
            chain,
            EmbeddingConfig {
                dimensions: 16,
                ..Default::default()
            },
        )
    }

    #[test]
    fn fallback_vectors_are_tagged_and_not_served_after_recovery() {
        let up = Arc::new(AtomicBool::new(false));
        let engine = switchable_engine(up.clone());

        let (fallback, model) = engine.embed_text_tagged("contrat santé").unwrap();
        assert_eq!(model, "tfidf/16");

        up.store(true, Ordering::SeqCst);
        let (primary, model) = engine.embed_text_tagged("contrat santé").unwrap();
        assert_eq!(model, "primary/16");
        assert_ne!(primary, fallback);
        assert_eq!(engine.model_id(), "primary/16");
    }

    #[test]
    fn batch_tags_follow_the_serving_provider() {
        let up = Arc::new(AtomicBool::new(false));
        let engine = switchable_engine(up.clone());
        let texts = vec!["a b".to_string(), "c d".to_string()];

        let tagged = engine.embed_batch_tagged(&texts).unwrap();
        assert!(tagged.iter().all(|(_, m)| m == "tfidf/16"));

        up.store(true, Ordering::SeqCst);
        let tagged = engine.embed_batch_tagged(&texts).unwrap();
        assert!(tagged.iter().all(|(_, m)| m == "primary/16"));
    }
}
