//! Run-level errors and their structured report.

use crate::clients::{MenuUnavailableError, SubmitError};
use crate::framework::TransportError;
use crate::lifecycle::ConfigError;
use crate::mapping::BuildError;
use crate::markup::MarkupParseError;
use serde::Serialize;
use thiserror::Error;

/// Why a relay run produced no accepted batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot initialize HTTP client: {0}")]
    Client(TransportError),

    #[error(transparent)]
    Markup(#[from] MarkupParseError),

    #[error(transparent)]
    Menu(#[from] MenuUnavailableError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl PipelineError {
    /// Stable short label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "config",
            PipelineError::Input { .. } => "input",
            PipelineError::Client(_) => "client",
            PipelineError::Markup(_) => "markup",
            PipelineError::Menu(_) => "menu_unavailable",
            PipelineError::Build(_) => "build",
            PipelineError::Submit(SubmitError::Encode(_)) => "encode",
            PipelineError::Submit(SubmitError::Transport(_)) => "transport",
            PipelineError::Submit(SubmitError::Rejected { .. }) => "rejected",
        }
    }

    /// Status code of a rejected submission.
    pub fn status(&self) -> Option<u16> {
        match self {
            PipelineError::Submit(SubmitError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Machine-readable form of a [`PipelineError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl From<&PipelineError> for ErrorReport {
    fn from(e: &PipelineError) -> Self {
        let body = match e {
            PipelineError::Submit(SubmitError::Rejected { body, .. }) => Some(body.clone()),
            _ => None,
        };
        Self {
            error: e.kind(),
            message: e.to_string(),
            status: e.status(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_distinguishes_rejection_from_transport() {
        let rejected = PipelineError::from(SubmitError::Rejected {
            status: 502,
            body: json!("Bad Gateway"),
        });
        assert_eq!(
            serde_json::to_value(ErrorReport::from(&rejected)).unwrap(),
            json!({
                "error": "rejected",
                "message": "order endpoint rejected the batch with status 502",
                "status": 502,
                "body": "Bad Gateway"
            })
        );

        let transport = PipelineError::from(SubmitError::Transport(TransportError::Timeout(
            "deadline".to_string(),
        )));
        let report = ErrorReport::from(&transport);
        assert_eq!(report.error, "transport");
        assert_eq!(report.status, None);
    }

    #[test]
    fn test_kind_of_early_failures() {
        assert_eq!(PipelineError::from(MarkupParseError::NoRoot).kind(), "markup");
        assert_eq!(PipelineError::from(BuildError::EmptyBatch).kind(), "build");
    }
}
