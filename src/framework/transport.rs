//! # HttpTransport Trait
//!
//! The seam between the order pipeline and the network. Clients never talk to
//! `reqwest` directly; they hand an [`HttpRequest`] to whatever
//! [`HttpTransport`] was injected. Production code injects [`ReqwestTransport`],
//! tests inject [`MockTransport`](crate::framework::mock::MockTransport).

use crate::framework::TransportError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP verbs used against the provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A fully resolved request: absolute URL, headers and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A received response. Any status code, including 4xx/5xx.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decodes the body for reporting: JSON when possible, otherwise the raw
    /// text as a JSON string, `Null` for an empty body.
    pub fn body_value(&self) -> serde_json::Value {
        if self.body.is_empty() {
            return serde_json::Value::Null;
        }
        self.json().unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&self.body).into_owned())
        })
    }
}

/// Sends a single request and returns whatever response arrived.
///
/// Implementations perform exactly one attempt. Retrying is layered on top by
/// [`ApiClient`](crate::clients::ApiClient) using a
/// [`RetryPolicy`](crate::framework::RetryPolicy).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a `reqwest::Client`.
///
/// Construct one per pipeline run; the inner client pools connections for the
/// lifetime of the value and releases them on drop.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests fail with
    /// [`TransportError::Timeout`] after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, size = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest::get("http://localhost/v1/menu")
            .with_header("Content-Type", "application/json");

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("token"), None);
    }

    #[test]
    fn test_body_value_falls_back_to_text() {
        assert_eq!(HttpResponse::new(200, "").body_value(), serde_json::Value::Null);
        assert_eq!(
            HttpResponse::new(502, "Bad Gateway").body_value(),
            serde_json::json!("Bad Gateway")
        );
        assert_eq!(
            HttpResponse::new(201, r#"{"accepted":2}"#).body_value(),
            serde_json::json!({"accepted": 2})
        );
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
