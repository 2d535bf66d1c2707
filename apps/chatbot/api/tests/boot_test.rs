//! Boots the service against a real PostgreSQL container
//!
//! Needs Docker: `cargo test -p chatbot_api -- --ignored`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chatbot_api::bootstrap;
use chatbot_api::config::{Config, Environment};
use chatbot_api::container::{Backends, ServiceContainer};
use core_config::server::{CorsConfig, ServerConfig};
use domain_vector::embedding::testing::{FakeLoader, FakePipeline};
use domain_vector::{
    Collection, DeleteOutcome, EmbeddingFunction, VectorError, VectorResult, VectorStore,
};
use test_utils::TestDatabase;

struct OfflineStore;

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

#[tokio::test]
#[ignore = "requires docker"]
async fn test_boot_serves_hello_world() {
    let db = TestDatabase::new().await;
    let container = Arc::new(ServiceContainer::new(Backends {
        vector_store: Arc::new(OfflineStore),
        pipeline_loader: Arc::new(FakeLoader::new(FakePipeline::constant(vec![1.0]))),
    }));
    temp_env::with_vars(db.env_vars("SERVICE_DB"), || {
        container.service_db.pool().unwrap()
    });

    let port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = Config {
        server: ServerConfig::new("127.0.0.1".to_string(), port),
        cors: CorsConfig::default(),
        environment: Environment::Development,
    };
    let server = tokio::spawn(bootstrap::run(config, Arc::clone(&container)));

    let url = format!("http://127.0.0.1:{port}/");
    let mut body = None;
    for _ in 0..50 {
        if let Ok(response) = reqwest::get(&url).await {
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            body = Some(response.json::<serde_json::Value>().await.unwrap());
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert_eq!(body, Some(serde_json::json!({ "message": "Hello World" })));

    let ready = reqwest::get(format!("http://127.0.0.1:{port}/ready"))
        .await
        .unwrap();
    assert_eq!(ready.status(), reqwest::StatusCode::OK);

    server.abort();
    container.shutdown().await;
}
