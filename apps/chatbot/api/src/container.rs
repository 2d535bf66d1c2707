use std::sync::Arc;

use core_config::FromEnv;
use database::postgres::{DatabasePrefix, PoolManager};
use domain_vector::{
    ChromaConfig, ChromaStore, CollectionManager, EmbeddingAdapter, EmbeddingConfig,
    EmbeddingProvider, FastEmbedLoader, PipelineLoader, VectorStore,
};
use http_client::HttpClient;
use tracing::info;

/// External backends the container wires its managers to
pub struct Backends {
    pub vector_store: Arc<dyn VectorStore>,
    pub pipeline_loader: Arc<dyn PipelineLoader>,
}

impl Backends {
    /// Chroma over HTTP and the local fastembed model, configured from the environment
    pub fn from_env() -> eyre::Result<Self> {
        let chroma = ChromaConfig::from_env()?;
        info!(url = %chroma.url, tenant = %chroma.tenant, "Using Chroma vector store");
        let embedding = EmbeddingConfig::from_env()?;
        info!(model = %embedding.model, "Using local embedding model");

        Ok(Self {
            vector_store: Arc::new(ChromaStore::new(chroma)?),
            pipeline_loader: Arc::new(FastEmbedLoader::new(embedding)),
        })
    }
}

/// Composition root owning every long-lived resource of the service.
///
/// Construction does no I/O: the pools, the embedding pipeline and the
/// vector collection are all created on first use.
pub struct ServiceContainer {
    pub http: HttpClient,
    pub embedding_provider: Arc<EmbeddingProvider>,
    pub embedding_adapter: Arc<EmbeddingAdapter>,
    pub collections: CollectionManager,
    pub service_db: PoolManager,
    pub scrape_db: PoolManager,
}

impl ServiceContainer {
    pub fn new(backends: Backends) -> Self {
        let http = HttpClient::new();
        let embedding_provider = Arc::new(EmbeddingProvider::new(backends.pipeline_loader));
        let embedding_adapter = Arc::new(EmbeddingAdapter::new(Arc::clone(&embedding_provider)));
        let collections = CollectionManager::new(backends.vector_store, embedding_adapter.clone());

        Self {
            http,
            embedding_provider,
            embedding_adapter,
            collections,
            service_db: PoolManager::new(DatabasePrefix::ServiceDb),
            scrape_db: PoolManager::new(DatabasePrefix::ScrapeDb),
        }
    }

    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self::new(Backends::from_env()?))
    }

    /// Close both database pools
    pub async fn shutdown(&self) {
        info!("Shutting down: closing database connections");
        tokio::join!(self.service_db.close(), self.scrape_db.close());
        info!("Database connections closed");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use domain_vector::embedding::testing::{FakeLoader, FakePipeline};
    use domain_vector::{Collection, DeleteOutcome, EmbeddingFunction, VectorError, VectorResult};

    /// Vector store that has no collections and cannot create any
    pub struct OfflineStore;

    #[async_trait]
    impl VectorStore for OfflineStore {
        async fn get_or_create_collection(
            &self,
            _name: &str,
            _embedding_function: Arc<dyn EmbeddingFunction>,
        ) -> VectorResult<Collection> {
            Err(VectorError::Store("offline".to_string()))
        }

        async fn delete_collection(&self, _name: &str) -> DeleteOutcome {
            DeleteOutcome::NotFound
        }
    }

    pub fn container() -> ServiceContainer {
        ServiceContainer::new(Backends {
            vector_store: Arc::new(OfflineStore),
            pipeline_loader: Arc::new(FakeLoader::new(FakePipeline::constant(vec![1.0, 0.0]))),
        })
    }
}
