//! Outbound HTTP fetch utility.
//!
//! A thin wrapper over `reqwest` that treats any non-2xx response as an
//! error carrying the status line and the response body, and decodes
//! successful responses as JSON.
//!
//! ```rust,no_run
//! use http_client::{HttpClient, RequestOptions};
//!
//! # async fn example() -> Result<(), http_client::HttpError> {
//! let client = HttpClient::new();
//! let data = client
//!     .fetch("https://example.com/api/items", RequestOptions::default())
//!     .await?;
//! println!("{}", data);
//! # Ok(())
//! # }
//! ```

mod error;
mod options;

pub use error::{HttpError, HttpResult};
pub use options::RequestOptions;

use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// JSON fetcher shared by the services of one process
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and return the decoded JSON body
    pub async fn fetch(&self, url: &str, options: RequestOptions) -> HttpResult<serde_json::Value> {
        self.fetch_json(url, options).await
    }

    /// Fetch `url` and decode the JSON body into `T`.
    ///
    /// No retries: transport failures, non-2xx statuses and undecodable
    /// bodies are logged and returned.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> HttpResult<T> {
        self.send(url, options)
            .await
            .inspect_err(|e| error!("Error fetching data from {}: {}", url, e))
    }

    async fn send<T: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> HttpResult<T> {
        let method = options.method.clone();
        let response = options
            .apply(self.client.request(method, url))
            .send()
            .await
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| HttpError::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Fetched");
        serde_json::from_str(&body).map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
