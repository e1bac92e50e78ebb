//! Error types for markup decoding.

use thiserror::Error;

/// The input is not a well-formed markup document.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarkupParseError {
    /// The reader rejected the input (bad syntax, mismatched end tag, bad escape).
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// Input ended while an element was still open.
    #[error("element <{0}> is never closed")]
    Unclosed(String),

    /// The document contains no element at all.
    #[error("document has no root element")]
    NoRoot,

    /// A second top-level element follows the root.
    #[error("document has more than one root element: <{first}> and <{second}>")]
    MultipleRoots { first: String, second: String },

    /// Non-whitespace text appears outside the root element.
    #[error("text outside the root element at byte {position}")]
    TextOutsideRoot { position: u64 },
}
