use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::error::VectorResult;
use crate::models::{Collection, DeleteOutcome};
use crate::repository::{EmbeddingFunction, VectorStore};

/// The only collection the chatbot reads and writes
pub const COLLECTION_NAME: &str = "chatbot-collection";

/// Owns the chatbot's vector collection.
///
/// The handle is fetched (or created) on first use and cached until
/// [`CollectionManager::reset_collection`]. Creation and reset serialize on
/// one lock, so concurrent first callers share a single get-or-create.
pub struct CollectionManager {
    store: Arc<dyn VectorStore>,
    embedding_function: Arc<dyn EmbeddingFunction>,
    cached: Mutex<Option<Arc<Collection>>>,
}

impl CollectionManager {
    pub fn new(store: Arc<dyn VectorStore>, embedding_function: Arc<dyn EmbeddingFunction>) -> Self {
        Self {
            store,
            embedding_function,
            cached: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        COLLECTION_NAME
    }

    pub fn embedding_function(&self) -> &Arc<dyn EmbeddingFunction> {
        &self.embedding_function
    }

    pub async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }

    /// The collection handle, created in the store on first call
    #[instrument(skip(self), fields(collection = COLLECTION_NAME))]
    pub async fn collection(&self) -> VectorResult<Arc<Collection>> {
        let mut cached = self.cached.lock().await;
        if let Some(collection) = cached.as_ref() {
            return Ok(Arc::clone(collection));
        }

        let collection = self
            .store
            .get_or_create_collection(COLLECTION_NAME, Arc::clone(&self.embedding_function))
            .await
            .inspect_err(|e| error!("Error getting collection: {}", e))?;
        info!(id = %collection.id, "Collection initialized");

        let collection = Arc::new(collection);
        *cached = Some(Arc::clone(&collection));
        Ok(collection)
    }

    /// Delete the collection from the store and drop the cached handle.
    ///
    /// Never fails: a missing collection or a store error is logged and
    /// reported through the returned outcome.
    #[instrument(skip(self), fields(collection = COLLECTION_NAME))]
    pub async fn reset_collection(&self) -> DeleteOutcome {
        let mut cached = self.cached.lock().await;
        let outcome = self.store.delete_collection(COLLECTION_NAME).await;

        match &outcome {
            DeleteOutcome::Deleted => info!("Collection reset"),
            DeleteOutcome::NotFound => warn!("Collection did not exist, nothing to reset"),
            DeleteOutcome::Failed(e) => error!("Error resetting collection: {}", e),
        }

        *cached = None;
        outcome
    }
}
