use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

use super::provider::EmbeddingProvider;
use crate::error::VectorResult;
use crate::repository::EmbeddingFunction;

/// Name the vector store records for collections embedded by this adapter
pub const ADAPTER_NAME: &str = "HuggingFaceEmbedding";

/// Exposes an [`EmbeddingProvider`] as the store's [`EmbeddingFunction`]
#[derive(Clone)]
pub struct EmbeddingAdapter {
    provider: Arc<EmbeddingProvider>,
}

impl EmbeddingAdapter {
    pub fn new(provider: Arc<EmbeddingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl EmbeddingFunction for EmbeddingAdapter {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    /// Embeds all texts concurrently. Results keep the input order no matter
    /// which embedding finishes first; the first failure fails the batch.
    async fn generate(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>> {
        debug!(count = texts.len(), "Generating embeddings");
        try_join_all(texts.iter().map(|text| self.provider.embed(text))).await
    }
}
