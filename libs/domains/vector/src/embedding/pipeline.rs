use std::sync::Arc;

use async_trait::async_trait;

use crate::error::VectorResult;

/// A loaded sentence-embedding model.
///
/// Implementations tokenize the text, run the forward pass and mean-pool the
/// token embeddings into one fixed-length vector.
#[async_trait]
pub trait EmbeddingPipeline: Send + Sync {
    /// Output dimensionality
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;
}

/// Builds an [`EmbeddingPipeline`]. Loading is expensive (model download,
/// session setup) and is expected to run once per process.
#[async_trait]
pub trait PipelineLoader: Send + Sync {
    fn model_id(&self) -> &str;

    async fn load(&self) -> VectorResult<Arc<dyn EmbeddingPipeline>>;
}
