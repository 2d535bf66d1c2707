use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::ChromaConfig;
use crate::error::{VectorError, VectorResult};
use crate::models::{Collection, DeleteOutcome};
use crate::repository::{EmbeddingFunction, VectorStore};

/// Chroma-backed implementation of [`VectorStore`] over the v2 REST API
pub struct ChromaStore {
    client: Client,
    config: ChromaConfig,
}

impl ChromaStore {
    pub fn new(config: ChromaConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorError::Store(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn collection_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.config.collections_url(),
            urlencoding::encode(name)
        )
    }
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
    configuration: CollectionConfiguration<'a>,
}

#[derive(Debug, Serialize)]
struct CollectionConfiguration<'a> {
    embedding_function: EmbeddingFunctionConfiguration<'a>,
}

#[derive(Debug, Serialize)]
struct EmbeddingFunctionConfiguration<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    config: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: String,
    name: String,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

fn is_not_found(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NOT_FOUND
        || body.contains("does not exist")
        || body.contains("NotFoundError")
}

#[async_trait]
impl VectorStore for ChromaStore {
    #[instrument(skip(self, embedding_function), fields(function = embedding_function.name()))]
    async fn get_or_create_collection(
        &self,
        name: &str,
        embedding_function: Arc<dyn EmbeddingFunction>,
    ) -> VectorResult<Collection> {
        let request = CreateCollectionRequest {
            name,
            get_or_create: true,
            configuration: CollectionConfiguration {
                embedding_function: EmbeddingFunctionConfiguration {
                    kind: "known",
                    name: embedding_function.name(),
                    config: Map::new(),
                },
            },
        };

        let response = self
            .client
            .post(self.config.collections_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorError::Store(format!(
                "Chroma API error ({}): {}",
                status, error_text
            )));
        }

        let body: CollectionResponse = response.json().await?;
        debug!(id = %body.id, "Collection ready");

        Ok(Collection::new(body.id, body.name, embedding_function).with_metadata(body.metadata))
    }

    #[instrument(skip(self))]
    async fn delete_collection(&self, name: &str) -> DeleteOutcome {
        let response = match self.client.delete(self.collection_url(name)).send().await {
            Ok(response) => response,
            Err(e) => return DeleteOutcome::Failed(e.into()),
        };

        let status = response.status();
        if status.is_success() {
            info!("Collection deleted");
            return DeleteOutcome::Deleted;
        }

        let error_text = response.text().await.unwrap_or_default();
        if is_not_found(status, &error_text) {
            warn!("Collection does not exist");
            return DeleteOutcome::NotFound;
        }

        DeleteOutcome::Failed(VectorError::Store(format!(
            "Chroma API error ({}): {}",
            status, error_text
        )))
    }
}
