//! Dish catalog index: display name to provider dish identifier.

use crate::model::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::debug;

/// Provider-side dish identifier, kept in the form the provider sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DishId {
    Number(u64),
    Text(String),
}

impl DishId {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(DishId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(DishId::Text(s.trim().to_string())),
            _ => None,
        }
    }
}

impl From<u64> for DishId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for DishId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DishId::Number(id) => write!(f, "{id}"),
            DishId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// Lookup from trimmed dish display name to [`DishId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuIndex {
    dishes: HashMap<String, DishId>,
}

impl MenuIndex {
    /// Builds the index from a catalog body of the shape
    /// `{"dishes": [{"name": ..., "id": ...}, ...]}`.
    ///
    /// Entries that are not objects, lack a usable `name` or `id`, are skipped.
    /// When a name occurs twice the later entry wins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingDishes`] when the body has no `dishes`
    /// array at all.
    pub fn from_catalog(catalog: &Value) -> Result<Self, CatalogError> {
        let entries = catalog
            .get("dishes")
            .and_then(Value::as_array)
            .ok_or(CatalogError::MissingDishes)?;

        let mut dishes = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let id = entry.get("id").and_then(DishId::from_json);

            match (name, id) {
                (Some(name), Some(id)) => {
                    if let Some(previous) = dishes.insert(name.to_string(), id) {
                        debug!(dish = name, %previous, "Duplicate dish name, keeping later entry");
                    }
                }
                _ => debug!(position, ?entry, "Skipping malformed catalog entry"),
            }
        }

        Ok(Self { dishes })
    }

    /// Looks up a dish by display name. Surrounding whitespace is ignored.
    pub fn resolve(&self, dish_name: &str) -> Option<&DishId> {
        self.dishes.get(dish_name.trim())
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

impl FromIterator<(String, DishId)> for MenuIndex {
    fn from_iter<I: IntoIterator<Item = (String, DishId)>>(iter: I) -> Self {
        Self {
            dishes: iter
                .into_iter()
                .map(|(name, id)| (name.trim().to_string(), id))
                .collect(),
        }
    }
}
