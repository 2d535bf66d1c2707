use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch data from {url}: {status} {status_text} - {body}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            HttpError::Request { url, .. }
            | HttpError::Status { url, .. }
            | HttpError::Decode { url, .. } => url,
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;
