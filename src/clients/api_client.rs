//! # API Client
//!
//! Shared plumbing for every provider endpoint: URL layout, headers, the
//! injected transport and the retry policy. Endpoint-specific clients
//! ([`MenuClient`](crate::clients::MenuClient),
//! [`OrderClient`](crate::clients::OrderClient)) wrap an `ApiClient` and only
//! add what their endpoint means.

use crate::framework::{HttpRequest, HttpResponse, HttpTransport, RetryPolicy, TransportError};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Versioned path segment of the provider API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub fn path_segment(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" => Ok(ApiVersion::V1),
            "v2" => Ok(ApiVersion::V2),
            other => Err(format!("unknown API version '{other}'")),
        }
    }
}

/// Client for the provider API as a whole.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    version: ApiVersion,
    token: Option<String>,
    retry: RetryPolicy,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: ApiVersion::default(),
            token: None,
            retry: RetryPolicy::default(),
            transport,
        }
    }

    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Sets the value sent in the `token` header.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// `{base_url}/{version}/{endpoint}`
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.version,
            endpoint.trim_start_matches('/')
        )
    }

    fn with_headers(&self, request: HttpRequest) -> HttpRequest {
        let request = request
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json");
        match &self.token {
            Some(token) => request.with_header("token", token.as_str()),
            None => request,
        }
    }

    /// Sends a `GET` to `endpoint` under the retry policy.
    #[instrument(skip(self))]
    pub async fn get(&self, endpoint: &str) -> Result<HttpResponse, TransportError> {
        let request = self.with_headers(HttpRequest::get(self.url(endpoint)));
        debug!(url = %request.url, "Sending request");
        self.retry.send(self.transport.as_ref(), &request).await
    }

    /// Sends a `POST` with a JSON body to `endpoint` under the retry policy.
    #[instrument(skip(self, body), fields(size = body.len()))]
    pub async fn post(&self, endpoint: &str, body: Vec<u8>) -> Result<HttpResponse, TransportError> {
        let request = self.with_headers(HttpRequest::post(self.url(endpoint), body));
        debug!(url = %request.url, "Sending request");
        self.retry.send(self.transport.as_ref(), &request).await
    }
}
