//! Error types for record mapping and batch assembly.

use crate::model::OrderLineFormatError;
use thiserror::Error;

/// A dish name that is not on the menu.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("dish '{dish_name}' is not on the menu")]
pub struct DishResolutionError {
    pub dish_name: String,
}

/// One employee record cannot become a customer document.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    OrderLine(#[from] OrderLineFormatError),

    #[error(transparent)]
    DishResolution(#[from] DishResolutionError),
}

/// The batch could not be assembled.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("document has no <Employees> root")]
    MissingRoot,

    #[error("no orders to submit")]
    EmptyBatch,

    #[error("employee {index} ({name}): {source}")]
    Record {
        index: usize,
        name: String,
        #[source]
        source: RecordError,
    },
}
