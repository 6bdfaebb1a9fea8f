//! Shared application state.

use std::time::Duration;

use verifaq_core::{Error, Result, VerifaqConfig};
use verifaq_extract::{FaqGenerator, Generation};
use verifaq_ingest::{DocumentFormat, DocumentLoader, StandardLoader};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: VerifaqConfig,
    pub generator: FaqGenerator,
    pub loader: StandardLoader,
}

impl AppState {
    pub fn new(config: VerifaqConfig) -> Self {
        Self {
            generator: FaqGenerator::new(config.faq.clone()),
            loader: StandardLoader,
            config,
        }
    }

    /// Generate FAQs for `text` on the blocking pool, bounded by the
    /// configured timeout.
    pub async fn generate(&self, text: String) -> Result<Generation> {
        let generator = self.generator.clone();
        run_bounded(self.config.server.generation_timeout_ms, move || {
            generator.generate(&text)
        })
        .await
    }

    /// Decode an uploaded payload and generate FAQs from it as one bounded
    /// operation. Returns the extracted text alongside the result.
    pub async fn generate_from_bytes(
        &self,
        bytes: Vec<u8>,
        format: DocumentFormat,
    ) -> Result<(String, Generation)> {
        let generator = self.generator.clone();
        let loader = self.loader;
        run_bounded(self.config.server.generation_timeout_ms, move || {
            let text = loader.load(&bytes, format)?;
            let generation = generator.generate(&text)?;
            Ok((text, generation))
        })
        .await
    }
}

/// Run a CPU-bound task on the blocking pool; `Timeout` if it takes longer
/// than `timeout_ms`. The task itself is not cancelled, only abandoned.
pub async fn run_bounded<T, F>(timeout_ms: u64, task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(task);
    match tokio::time::timeout(Duration::from_millis(timeout_ms), handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(Error::Internal(format!("Generation task failed: {}", e))),
        Err(_) => {
            tracing::warn!("Generation exceeded {}ms", timeout_ms);
            Err(Error::Timeout(timeout_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_bounded_times_out() {
        let result: Result<()> = run_bounded(10, || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(Error::Timeout(10))));
    }

    #[tokio::test]
    async fn test_run_bounded_passes_result_through() {
        let ok: Result<u32> = run_bounded(1_000, || Ok(7)).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u32> = run_bounded(1_000, || Err(Error::Decode("bad".into()))).await;
        assert!(matches!(err, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_generate_from_bytes_rejects_short_documents() {
        let state = AppState::new(VerifaqConfig::default());
        let err = state
            .generate_from_bytes(b"Just one sentence here.".to_vec(), DocumentFormat::PlainText)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientContent { found: 1, .. }));
    }
}
