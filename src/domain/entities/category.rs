//! Category entity

use serde::{Deserialize, Serialize};

/// Category id every asset lands in when nothing more specific is configured
pub const DEFAULT_CATEGORY_ID: &str = "default";

/// A destination bucket in the permanent collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}
