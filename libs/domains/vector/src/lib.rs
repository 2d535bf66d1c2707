//! Vector Domain Library
//!
//! Embedding generation and the chatbot's vector collection, backed by
//! Chroma.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │ CollectionManager │  ← cached handle to "chatbot-collection"
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐     ┌───────────────────┐
//! │   VectorStore     │     │ EmbeddingAdapter  │  ← EmbeddingFunction
//! │     (trait)       │     └─────────┬─────────┘
//! └─────────┬─────────┘               │
//!           │               ┌─────────▼─────────┐
//! ┌─────────▼─────────┐     │ EmbeddingProvider │  ← single-flight load
//! │   ChromaStore     │     └─────────┬─────────┘
//! └───────────────────┘               │
//!                           ┌─────────▼─────────┐
//!                           │  PipelineLoader   │  ← fastembed (local ONNX)
//!                           └───────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_vector::{
//!     ChromaConfig, ChromaStore, CollectionManager, EmbeddingAdapter, EmbeddingConfig,
//!     EmbeddingProvider, FastEmbedLoader,
//! };
//! use core_config::FromEnv;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = FastEmbedLoader::new(EmbeddingConfig::from_env()?);
//! let provider = Arc::new(EmbeddingProvider::new(Arc::new(loader)));
//! let adapter = Arc::new(EmbeddingAdapter::new(provider));
//!
//! let store = ChromaStore::new(ChromaConfig::from_env()?)?;
//! let manager = CollectionManager::new(Arc::new(store), adapter);
//!
//! let collection = manager.collection().await?;
//! let vectors = collection.embed(&["hello".to_string()]).await?;
//! assert_eq!(vectors[0].len(), 384);
//! # Ok(())
//! # }
//! ```

pub mod chroma;
pub mod collection;
pub mod embedding;
pub mod error;
pub mod models;
pub mod repository;

// Re-export commonly used types
pub use chroma::{ChromaConfig, ChromaStore};
pub use collection::{COLLECTION_NAME, CollectionManager};
#[cfg(feature = "fastembed")]
pub use embedding::FastEmbedLoader;
pub use embedding::{
    ADAPTER_NAME, EmbeddingAdapter, EmbeddingConfig, EmbeddingPipeline, EmbeddingProvider,
    PipelineLoader,
};
pub use error::{VectorError, VectorResult};
pub use models::{Collection, DeleteOutcome, EmbeddingModel};
pub use repository::{EmbeddingFunction, VectorStore};
