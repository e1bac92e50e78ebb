//! Generic nested record decoded from markup.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A decoded markup value.
///
/// Elements keep their children in document order. Repeated sibling elements
/// with the same name are gathered into a single [`Node::List`] entry, so a
/// key never appears twice within one element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An empty element (`<Order/>` or `<Order></Order>`).
    Null,
    /// An element holding only text.
    Text(String),
    /// An element with child elements and/or attributes.
    Element(Vec<(String, Node)>),
    /// Repeated sibling elements.
    List(Vec<Node>),
}

impl Node {
    /// Looks up a direct child. Returns `None` for anything but an element.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Element(children) => children
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// The text content of this node, if it has any.
    ///
    /// Mixed-content elements expose the text stored under `#text`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => self.get("#text").and_then(Node::text),
            _ => None,
        }
    }

    /// Normalizes cardinality: a list yields its items, anything else yields
    /// itself as a one-element sequence.
    ///
    /// An empty element (`Null`) is still one element. Absence is expressed by
    /// [`Node::get`] returning `None`, never by an empty sequence here.
    pub fn items(&self) -> Vec<&Node> {
        match self {
            Node::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Text(text) => serializer.serialize_str(text),
            Node::Element(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, value) in children {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
