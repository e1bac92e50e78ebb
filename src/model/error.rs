//! Error types for order-line and catalog parsing.

use thiserror::Error;

/// An order line does not have the `<amount>x <dish name>` shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderLineFormatError {
    /// No `x` separates amount and dish name.
    #[error("order line '{0}' has no 'x' separator")]
    MissingSeparator(String),

    /// Nothing follows the separator.
    #[error("order line '{0}' names no dish")]
    MissingDishName(String),

    /// The text before the separator is not a positive whole number.
    #[error("order line '{line}' has invalid amount '{quantity}'")]
    InvalidQuantity { line: String, quantity: String },

    /// The order field holds no order line at all.
    #[error("order field is empty")]
    Empty,
}

/// A dish catalog body without the expected `dishes` sequence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no 'dishes' array")]
    MissingDishes,
}
