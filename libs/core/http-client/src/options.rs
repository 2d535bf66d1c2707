use std::time::Duration;

use reqwest::{Method, RequestBuilder};

/// Per-request settings for [`crate::HttpClient::fetch`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            json: None,
            body: None,
            timeout: None,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// JSON request body; takes precedence over [`RequestOptions::body`]
    pub fn json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn apply(self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in self.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        match (self.json, self.body) {
            (Some(json), _) => request.json(&json),
            (None, Some(body)) => request.body(body),
            (None, None) => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.json.is_none());
    }

    #[test]
    fn test_builder() {
        let options = RequestOptions::method(Method::PUT)
            .header("x-trace", "abc")
            .body("raw")
            .timeout(Duration::from_secs(3));
        assert_eq!(options.method, Method::PUT);
        assert_eq!(options.headers, vec![("x-trace".to_string(), "abc".to_string())]);
        assert_eq!(options.body.as_deref(), Some("raw"));
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));
    }
}
