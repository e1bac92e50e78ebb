//! # Transport Errors
//!
//! Errors raised when no HTTP response could be obtained at all. A response
//! with a bad status code is *not* a transport error; it reaches the caller as
//! an [`HttpResponse`](crate::framework::HttpResponse) so each client can decide
//! what the status means for its endpoint.

use thiserror::Error;

/// Failure to exchange a request/response pair with a remote endpoint.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The remote host could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be built or the response body could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout(value.to_string())
        } else if value.is_connect() {
            Self::Connect(value.to_string())
        } else {
            Self::Request(value.to_string())
        }
    }
}
