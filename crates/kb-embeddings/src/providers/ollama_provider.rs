//! Ollama local embedding provider.
//!
//! Talks to a local Ollama server (`/api/embed`). Unavailable until a health
//! check succeeds.
//!
//! Every call blocks the calling thread until the HTTP request completes.
//! Requests run on a private current-thread tokio runtime, moved to a scoped
//! thread when the caller is already inside a runtime. From async code,
//! call it through `spawn_blocking` so the executor is not stalled.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kb_core::config::defaults::DEFAULT_OLLAMA_URL;
use kb_core::errors::{EmbeddingError, KbError, KbResult};
use kb_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama local embedding provider. Blocking; see the module docs for use
/// from async code.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// `base_url` defaults to `http://localhost:11434`.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            dimensions,
            available: AtomicBool::new(false),
        }
    }

    /// Check if the Ollama server is reachable, updating availability.
    /// Blocks for up to five seconds.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        let result = block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(HEALTH_TIMEOUT)
                .send()
                .await
                .map(|resp| resp.status())
        });

        let healthy = match result {
            Ok(Ok(status)) if status.is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(Ok(status)) => {
                warn!(status = %status, "Ollama health check failed");
                false
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama health check could not run");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: format!("ollama:{}", self.model),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let result: KbResult<OllamaEmbedResponse> = block_on(async {
            let response = reqwest::Client::new()
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama HTTP error: {e}"),
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("Ollama returned {status}: {body}"),
                }
                .into());
            }

            Ok::<_, KbError>(response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })?)
        })?;

        let embeddings = result?.embeddings;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "Ollama returned {} embeddings for {} inputs",
                    embeddings.len(),
                    texts.len()
                ),
            }
            .into());
        }
        Ok(embeddings)
    }
}

/// Drive `fut` to completion on a fresh current-thread runtime. Inside a
/// runtime context the work moves to a scoped thread, since a runtime cannot
/// be started on a thread that already has one.
fn block_on<F>(fut: F) -> KbResult<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    let run = move || -> KbResult<F::Output> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("runtime error: {e}"),
            })?;
        Ok(rt.block_on(fut))
    };

    if tokio::runtime::Handle::try_current().is_err() {
        return run();
    }
    std::thread::scope(|scope| scope.spawn(run).join()).unwrap_or_else(|_| {
        Err(EmbeddingError::InferenceFailed {
            reason: "Ollama request thread panicked".to_string(),
        }
        .into())
    })
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> KbResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> KbResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
