mod adapter;
mod config;
#[cfg(feature = "fastembed")]
mod local;
mod pipeline;
mod provider;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use adapter::{ADAPTER_NAME, EmbeddingAdapter};
pub use config::EmbeddingConfig;
#[cfg(feature = "fastembed")]
pub use local::{FastEmbedLoader, FastEmbedPipeline};
pub use pipeline::{EmbeddingPipeline, PipelineLoader};
pub use provider::{EmbeddingProvider, l2_normalize};
