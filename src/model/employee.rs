//! Typed view over one decoded `Employee` element.

use crate::markup::Node;

/// Key of the nested address element.
pub const ADDRESS: &str = "Address";

/// Borrowed accessor for the known keys of an employee record.
///
/// Values are trimmed; blank values read as absent.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeRecord<'a> {
    node: &'a Node,
}

impl<'a> EmployeeRecord<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self { node }
    }

    /// Text of a direct child field.
    pub fn field(&self, key: &str) -> Option<&'a str> {
        non_blank(self.node.get(key))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.field("Name")
    }

    pub fn order(&self) -> Option<&'a str> {
        self.field("Order")
    }

    /// An address component, read from the nested `Address` element when the
    /// record has one and from the record itself otherwise.
    pub fn address_field(&self, key: &str) -> Option<&'a str> {
        match self.node.get(ADDRESS) {
            Some(address) if address.is_element() => non_blank(address.get(key)),
            _ => self.field(key),
        }
    }

    /// `IsAttending` as a boolean; `None` when absent or not `true`/`false`.
    pub fn is_attending(&self) -> Option<bool> {
        match self.field("IsAttending")?.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

fn non_blank(node: Option<&Node>) -> Option<&str> {
    node.and_then(Node::text)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
