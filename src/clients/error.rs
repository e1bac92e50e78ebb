//! Error types for the provider clients.

use crate::framework::TransportError;
use crate::model::CatalogError;
use thiserror::Error;

/// Why the live dish catalog could not be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuFetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("menu endpoint answered with status {0}")]
    Status(u16),

    #[error("menu body is not valid JSON: {0}")]
    Decode(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Why the local catalog snapshot could not be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    #[error("cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("snapshot '{path}' is not valid JSON: {message}")]
    Decode { path: String, message: String },

    #[error("snapshot '{path}': {source}")]
    Catalog {
        path: String,
        #[source]
        source: CatalogError,
    },
}

/// Neither the live catalog nor the snapshot produced a dish index.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("menu unavailable: live fetch failed ({live}); fallback failed ({fallback})")]
pub struct MenuUnavailableError {
    pub live: MenuFetchError,
    pub fallback: SnapshotError,
}

/// The bulk order was not accepted.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    /// The batch could not be serialized.
    #[error("cannot encode order batch: {0}")]
    Encode(String),

    /// No response was received, even after retrying.
    #[error("order submission failed: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered with a non-success status after retrying.
    #[error("order endpoint rejected the batch with status {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
}
