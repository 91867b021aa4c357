//! End-to-end embedding engine behaviour with the TF-IDF provider.

use kb_core::config::{EmbeddingConfig, KbConfig};
use kb_core::traits::IEmbeddingProvider;
use kb_embeddings::EmbeddingEngine;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[test]
fn default_config_builds_tfidf_engine() {
    let config = KbConfig::default();
    let engine = EmbeddingEngine::new(config.embedding).unwrap();
    assert_eq!(engine.dimensions(), 384);
    assert_eq!(engine.model_id(), "tfidf/384");
    assert!(engine.is_available());
}

#[test]
fn vectors_are_unit_length() {
    let engine = EmbeddingEngine::new(EmbeddingConfig {
        dimensions: 96,
        ..Default::default()
    })
    .unwrap();
    let v = engine.embed("Déclarer un sinistre auprès de votre agence").unwrap();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn shared_terms_are_more_similar() {
    let engine = EmbeddingEngine::new(EmbeddingConfig {
        dimensions: 256,
        ..Default::default()
    })
    .unwrap();
    let query = engine.embed("assurance automobile").unwrap();
    let close = engine.embed("Assurance automobile\nCouvre le vol et l'incendie").unwrap();
    let far = engine.embed("Modes de paiement\nVirement bancaire").unwrap();
    assert!(cosine(&query, &close) > cosine(&query, &far));
}

#[test]
fn engine_usable_behind_trait_object() {
    let engine = EmbeddingEngine::new(EmbeddingConfig {
        dimensions: 32,
        ..Default::default()
    })
    .unwrap();
    let provider: std::sync::Arc<dyn IEmbeddingProvider> = std::sync::Arc::new(engine);
    let texts = vec!["takaful".to_string(), "wakala".to_string()];
    let batch = provider.embed_batch(&texts).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(provider.dimensions(), 32);
    assert_eq!(provider.name(), "tfidf");
}
