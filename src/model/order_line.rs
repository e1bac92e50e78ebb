//! Free-text order lines such as `"3x Pizza Quattro Formaggi"`.

use crate::model::OrderLineFormatError;
use std::fmt::Display;

/// Separates the amount from the dish name.
pub const SEPARATOR: char = 'x';

/// One `<amount>x <dish name>` segment of an employee's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// The amount exactly as written (trimmed), e.g. `"3"`.
    pub quantity: String,
    /// The dish display name, trimmed.
    pub dish_name: String,
    amount: u32,
}

impl OrderLine {
    /// Parses a single order line.
    ///
    /// The text is split on the first `x`. The left part is the amount and must
    /// be a positive whole number; the right part is the dish name and must not
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns [`OrderLineFormatError`] when the separator is missing, the dish
    /// name is empty or the amount is not a positive whole number.
    pub fn parse(text: &str) -> Result<Self, OrderLineFormatError> {
        let line = text.trim();
        let (quantity, dish_name) = line
            .split_once(SEPARATOR)
            .ok_or_else(|| OrderLineFormatError::MissingSeparator(line.to_string()))?;
        let quantity = quantity.trim();
        let dish_name = dish_name.trim();

        if dish_name.is_empty() {
            return Err(OrderLineFormatError::MissingDishName(line.to_string()));
        }

        let amount = quantity
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| quantity.parse::<u32>().ok())
            .flatten()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| OrderLineFormatError::InvalidQuantity {
                line: line.to_string(),
                quantity: quantity.to_string(),
            })?;

        Ok(Self {
            quantity: quantity.to_string(),
            dish_name: dish_name.to_string(),
            amount,
        })
    }

    /// The validated amount.
    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl Display for OrderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.quantity, SEPARATOR, self.dish_name)
    }
}

/// Parses a comma-separated order field into its lines, in order of appearance.
///
/// Empty segments (a trailing comma, `",,"`) are ignored. A field with a single
/// segment yields a single line.
pub fn parse_order_field(field: &str) -> Result<Vec<OrderLine>, OrderLineFormatError> {
    let lines = field
        .split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(OrderLine::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if lines.is_empty() {
        return Err(OrderLineFormatError::Empty);
    }
    Ok(lines)
}
