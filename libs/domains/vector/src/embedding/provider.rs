use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

use super::pipeline::{EmbeddingPipeline, PipelineLoader};
use crate::error::VectorResult;

/// Turns text into unit-length embedding vectors.
///
/// The pipeline is loaded lazily on the first [`EmbeddingProvider::embed`]
/// call. Loading is single-flight: callers arriving while the load is in
/// progress wait for that same load instead of starting their own. A failed
/// load is not remembered, so the next call tries again.
pub struct EmbeddingProvider {
    loader: Arc<dyn PipelineLoader>,
    pipeline: OnceCell<Arc<dyn EmbeddingPipeline>>,
}

impl EmbeddingProvider {
    pub fn new(loader: Arc<dyn PipelineLoader>) -> Self {
        Self {
            loader,
            pipeline: OnceCell::new(),
        }
    }

    pub fn model_id(&self) -> &str {
        self.loader.model_id()
    }

    /// Whether the pipeline has finished loading
    pub fn is_loaded(&self) -> bool {
        self.pipeline.initialized()
    }

    /// The loaded pipeline, loading it on first use
    pub async fn pipeline(&self) -> VectorResult<Arc<dyn EmbeddingPipeline>> {
        let pipeline = self
            .pipeline
            .get_or_try_init(|| async {
                info!(model = self.loader.model_id(), "Loading embedding pipeline");
                self.loader.load().await
            })
            .await
            .inspect_err(|e| {
                error!(model = self.loader.model_id(), "Error loading embedding pipeline: {}", e)
            })?;

        Ok(Arc::clone(pipeline))
    }

    /// Output dimensionality, loading the pipeline if needed
    pub async fn dimension(&self) -> VectorResult<usize> {
        Ok(self.pipeline().await?.dimension())
    }

    /// Embed one text into a mean-pooled, L2-normalized vector
    #[instrument(skip_all, fields(model = self.loader.model_id(), len = text.len()))]
    pub async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let pipeline = self.pipeline().await?;
        let raw = pipeline
            .embed(text)
            .await
            .inspect_err(|e| error!("Error embedding text: {}", e))?;

        Ok(l2_normalize(raw))
    }
}

/// Scale `vector` to unit length. The zero vector is returned unchanged.
pub fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{FakeLoader, FakePipeline};
    use crate::error::VectorError;
    use std::time::Duration;

    #[test]
    fn test_l2_normalize() {
        assert_eq!(l2_normalize(vec![3.0, 4.0]), vec![0.6, 0.8]);
        assert_eq!(l2_normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);

        let unit = l2_normalize(vec![1.0, 2.0, 2.0]);
        let norm: f32 = unit.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_embed_returns_normalized_vector() {
        let loader = Arc::new(FakeLoader::new(FakePipeline::constant(vec![3.0, 4.0])));
        let provider = EmbeddingProvider::new(loader.clone());

        let vector = provider.embed("hello").await.unwrap();

        assert_eq!(vector, vec![0.6, 0.8]);
        assert_eq!(provider.model_id(), "fake/model");
    }

    #[tokio::test]
    async fn test_pipeline_is_memoized() {
        let loader = Arc::new(FakeLoader::new(FakePipeline::constant(vec![1.0])));
        let provider = EmbeddingProvider::new(loader.clone());
        assert!(!provider.is_loaded());

        let first = provider.pipeline().await.unwrap();
        let second = provider.pipeline().await.unwrap();
        provider.embed("again").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(provider.is_loaded());
        assert_eq!(provider.dimension().await.unwrap(), 1);
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_share_one_load() {
        let loader = Arc::new(
            FakeLoader::new(FakePipeline::constant(vec![1.0, 0.0]))
                .with_load_delay(Duration::from_millis(50)),
        );
        let provider = Arc::new(EmbeddingProvider::new(loader.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move { provider.embed(&format!("text {i}")).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), vec![1.0, 0.0]);
        }
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried_on_next_call() {
        let loader = Arc::new(FakeLoader::new(FakePipeline::constant(vec![2.0])).failing_first(1));
        let provider = EmbeddingProvider::new(loader.clone());

        let err = provider.embed("first").await.unwrap_err();
        assert!(matches!(err, VectorError::Embedding(_)));
        assert!(!provider.is_loaded());

        let vector = provider.embed("second").await.unwrap();
        assert_eq!(vector, vec![1.0]);
        assert_eq!(loader.load_count(), 2);
    }

    #[tokio::test]
    async fn test_inference_error_is_returned() {
        let loader = Arc::new(FakeLoader::new(FakePipeline::failing("model exploded")));
        let provider = EmbeddingProvider::new(loader);

        let err = provider.embed("boom").await.unwrap_err();
        assert!(err.to_string().contains("model exploded"));
    }
}
