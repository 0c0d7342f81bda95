//! Item serialization.

use crate::error::ExploreResult;
use crate::item::{Explorable, Item};

/// How a surviving item is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Compact JSON of every raw attribute.
    #[default]
    Json,
    /// Short human-readable form, e.g. `Repository(full_name="octocat/Hello-World")`.
    Repr,
}

impl Format {
    pub fn render(&self, item: &Item) -> ExploreResult<String> {
        match self {
            Self::Json => Ok(serde_json::to_string(item.raw())?),
            Self::Repr => {
                let (type_name, key, value) = item.label();
                Ok(format!("{type_name}({key}={value:?})"))
            }
        }
    }
}
