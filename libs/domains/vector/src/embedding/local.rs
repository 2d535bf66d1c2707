use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use super::config::EmbeddingConfig;
use super::pipeline::{EmbeddingPipeline, PipelineLoader};
use crate::error::{VectorError, VectorResult};
use crate::models::EmbeddingModel;

fn to_fastembed_model(model: EmbeddingModel) -> fastembed::EmbeddingModel {
    match model {
        EmbeddingModel::AllMiniLmL6V2 => fastembed::EmbeddingModel::AllMiniLML6V2,
        EmbeddingModel::BgeSmallEnV15 => fastembed::EmbeddingModel::BGESmallENV15,
        EmbeddingModel::BgeBaseEnV15 => fastembed::EmbeddingModel::BGEBaseENV15,
    }
}

/// Loads ONNX sentence-embedding models locally via fastembed.
///
/// fastembed mean-pools and normalizes the output of the supported models,
/// so no network calls happen after the model files are cached.
pub struct FastEmbedLoader {
    config: EmbeddingConfig,
}

impl FastEmbedLoader {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PipelineLoader for FastEmbedLoader {
    fn model_id(&self) -> &str {
        self.config.model.model_id()
    }

    async fn load(&self) -> VectorResult<Arc<dyn EmbeddingPipeline>> {
        let model = self.config.model;
        let cache_dir = self.config.cache_dir.clone();

        let embedding = tokio::task::spawn_blocking(move || {
            let mut options = fastembed::InitOptions::new(to_fastembed_model(model))
                .with_show_download_progress(false);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }
            fastembed::TextEmbedding::try_new(options)
        })
        .await?
        .map_err(|e| {
            VectorError::Embedding(format!("Failed to initialize embedding model {}: {}", model, e))
        })?;

        info!(model = %model, dimension = model.dimension(), "Embedding model loaded");

        Ok(Arc::new(FastEmbedPipeline {
            model: Arc::new(Mutex::new(embedding)),
            dimension: model.dimension(),
        }))
    }
}

/// A loaded fastembed model. Inference is CPU-bound and runs on the
/// blocking pool.
pub struct FastEmbedPipeline {
    model: Arc<Mutex<fastembed::TextEmbedding>>,
    dimension: usize,
}

#[async_trait]
impl EmbeddingPipeline for FastEmbedPipeline {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let model = Arc::clone(&self.model);
        let texts = vec![text.to_string()];

        let mut embeddings = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| VectorError::Internal("Embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| VectorError::Embedding(format!("Local embedding failed: {}", e)))
        })
        .await??;

        embeddings
            .pop()
            .ok_or_else(|| VectorError::Embedding("No embedding returned".to_string()))
    }
}
