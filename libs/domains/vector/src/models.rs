use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{VectorError, VectorResult};
use crate::repository::EmbeddingFunction;

/// Handle to a vector-store collection, bound to the embedding function it
/// was created with.
#[derive(Clone)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub metadata: Option<Map<String, Value>>,
    embedding_function: Arc<dyn EmbeddingFunction>,
}

impl Collection {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        embedding_function: Arc<dyn EmbeddingFunction>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: None,
            embedding_function,
        }
    }

    pub fn with_metadata(mut self, metadata: Option<Map<String, Value>>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn embedding_function(&self) -> &Arc<dyn EmbeddingFunction> {
        &self.embedding_function
    }

    /// Embed documents with the collection's own embedding function
    pub async fn embed(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>> {
        self.embedding_function.generate(texts).await
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .field("embedding_function", &self.embedding_function.name())
            .finish()
    }
}

/// Result of deleting a collection.
///
/// A missing collection is an expected outcome rather than an error.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Failed(VectorError),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DeleteOutcome::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DeleteOutcome::Failed(_))
    }
}

/// Sentence-embedding models the local pipeline can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingModel {
    /// all-MiniLM-L6-v2 (384 dimensions)
    #[default]
    AllMiniLmL6V2,
    /// BAAI bge-small-en-v1.5 (384 dimensions)
    BgeSmallEnV15,
    /// BAAI bge-base-en-v1.5 (768 dimensions)
    BgeBaseEnV15,
}

impl EmbeddingModel {
    /// Hub identifier of the model
    pub fn model_id(&self) -> &'static str {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => "Xenova/all-MiniLM-L6-v2",
            EmbeddingModel::BgeSmallEnV15 => "Xenova/bge-small-en-v1.5",
            EmbeddingModel::BgeBaseEnV15 => "Xenova/bge-base-en-v1.5",
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingModel::AllMiniLmL6V2 => 384,
            EmbeddingModel::BgeSmallEnV15 => 384,
            EmbeddingModel::BgeBaseEnV15 => 768,
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_id())
    }
}

impl FromStr for EmbeddingModel {
    type Err = VectorError;

    /// Accepts the hub id with any organisation prefix, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit('/').next().unwrap_or(s).to_ascii_lowercase();
        match name.as_str() {
            "all-minilm-l6-v2" => Ok(EmbeddingModel::AllMiniLmL6V2),
            "bge-small-en-v1.5" => Ok(EmbeddingModel::BgeSmallEnV15),
            "bge-base-en-v1.5" => Ok(EmbeddingModel::BgeBaseEnV15),
            _ => Err(VectorError::Config(format!(
                "Unsupported embedding model: {}",
                s
            ))),
        }
    }
}
