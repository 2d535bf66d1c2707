use std::sync::Arc;

use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{Collection, DeleteOutcome};

/// Capability the vector store uses to turn documents into vectors.
///
/// `name` identifies the function to the store so it can detect a
/// collection being reopened with a different embedding function.
#[async_trait]
pub trait EmbeddingFunction: Send + Sync {
    fn name(&self) -> &str;

    /// Embed every text; output `i` belongs to input `i`
    async fn generate(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>>;
}

/// Collection-level operations of the vector store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Return the named collection, creating it when it does not exist yet
    async fn get_or_create_collection(
        &self,
        name: &str,
        embedding_function: Arc<dyn EmbeddingFunction>,
    ) -> VectorResult<Collection>;

    /// Delete the named collection
    async fn delete_collection(&self, name: &str) -> DeleteOutcome;
}
