//! Wire types for the bulk order request body.

use crate::model::DishId;
use serde::{Deserialize, Serialize};

/// Delivery address of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

/// The person an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub full_name: String,
    pub address: Address,
}

/// One resolved dish with its amount.
///
/// `amount` goes over the wire as a JSON number, not the quantity text from
/// the order line. It has already been checked to be a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishOrder {
    pub dish_id: DishId,
    pub amount: u32,
}

/// Normalized order of one employee.
///
/// `dishes` is in the order the lines appeared in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDocument {
    pub customer: Customer,
    pub dishes: Vec<DishOrder>,
}

/// The request body of one bulk order, in input employee order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBatch {
    pub orders: Vec<CustomerDocument>,
}

impl OrderBatch {
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total number of dish lines across all orders.
    pub fn dish_count(&self) -> usize {
        self.orders.iter().map(|order| order.dishes.len()).sum()
    }
}
