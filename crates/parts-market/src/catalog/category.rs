//! Part categories.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A flat part category such as "Brakes" or "Filters".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartCategory {
    pub category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl PartCategory {
    pub fn new(
        category_id: impl Into<CategoryId>,
        name: impl Into<String>,
        description: Option<&str>,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            name: name.into(),
            description: description.map(str::to_string),
        }
    }
}
