//! Maps one employee record into a [`CustomerDocument`].

use crate::mapping::{DishResolutionError, RecordError};
use crate::model::{
    parse_order_field, Address, Customer, CustomerDocument, DishOrder, EmployeeRecord, MenuIndex,
};
use tracing::{debug, instrument};

/// Maps employee records against a resolved menu.
///
/// Every order line must resolve. A single unknown dish fails the whole record
/// with [`RecordError::DishResolution`]; no partial dish list and no
/// placeholder identifier is ever produced.
#[derive(Debug, Clone, Copy)]
pub struct CustomerRecordMapper<'m> {
    menu: &'m MenuIndex,
}

impl<'m> CustomerRecordMapper<'m> {
    pub fn new(menu: &'m MenuIndex) -> Self {
        Self { menu }
    }

    /// # Errors
    ///
    /// Returns [`RecordError`] when `Name`, an address component or `Order` is
    /// missing, an order line is malformed, or a dish is not on the menu.
    #[instrument(skip(self, record), fields(employee = record.name().unwrap_or_default()))]
    pub fn map(&self, record: EmployeeRecord<'_>) -> Result<CustomerDocument, RecordError> {
        let full_name = record.name().ok_or(RecordError::MissingField("Name"))?;
        let address = Address {
            street: required(record.address_field("Street"), "Street")?,
            city: required(record.address_field("City"), "City")?,
            postal_code: required(record.address_field("PostalCode"), "PostalCode")?,
        };
        let order = record.order().ok_or(RecordError::MissingField("Order"))?;

        let dishes = parse_order_field(order)?
            .into_iter()
            .map(|line| -> Result<DishOrder, RecordError> {
                let dish_id = self.menu.resolve(&line.dish_name).cloned().ok_or_else(|| {
                    DishResolutionError {
                        dish_name: line.dish_name.clone(),
                    }
                })?;
                debug!(%line, %dish_id, "Order line resolved");
                Ok(DishOrder {
                    dish_id,
                    amount: line.amount(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CustomerDocument {
            customer: Customer {
                full_name: full_name.to_string(),
                address,
            },
            dishes,
        })
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, RecordError> {
    value
        .map(str::to_string)
        .ok_or(RecordError::MissingField(field))
}
