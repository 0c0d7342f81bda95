//! The heterogeneous items a run streams over.

use gh_api_client::RawObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item variant tag. Used as the key of a [`crate::Tally`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Repository,
    Gist,
    User,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Gist => "gist",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String attributes a pattern predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Language,
}

impl Field {
    /// Key of the attribute in the raw API payload.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Language => "language",
        }
    }

    /// Command-line option that filters on this field.
    pub fn option(&self) -> &'static str {
        match self {
            Self::Name => "--name",
            Self::Language => "--language",
        }
    }
}

/// The thin view predicates and renderers need of any item.
pub trait Explorable {
    /// Variant tag.
    fn kind(&self) -> ItemKind;

    /// Stringified attribute value, or `None` when this kind of item does
    /// not define the attribute at all.
    ///
    /// A defined attribute whose value is JSON `null` yields `Some("")`.
    fn attribute(&self, field: Field) -> Option<String>;

    /// Open issue count; `None` when this kind of item cannot have issues.
    fn open_issues(&self) -> Option<u64>;

    /// Every attribute exactly as received.
    fn raw(&self) -> &RawObject;
}

/// One unit of the explored stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Repository(RawObject),
    Gist(RawObject),
    User(RawObject),
}

impl Item {
    /// Look up a string-ish value for a repr label.
    pub(crate) fn label(&self) -> (&'static str, &'static str, String) {
        let (type_name, key) = match self {
            Self::Repository(_) => ("Repository", "full_name"),
            Self::Gist(_) => ("Gist", "id"),
            Self::User(_) => ("User", "login"),
        };
        let value = self
            .raw()
            .get(key)
            .map(stringify)
            .unwrap_or_default();
        (type_name, key, value)
    }

    fn defines(&self, field: Field) -> bool {
        match (self, field) {
            (Self::Repository(_), _) => true,
            (Self::User(_), Field::Name) => true,
            (Self::User(_), Field::Language) => false,
            (Self::Gist(_), _) => false,
        }
    }
}

impl Explorable for Item {
    fn kind(&self) -> ItemKind {
        match self {
            Self::Repository(_) => ItemKind::Repository,
            Self::Gist(_) => ItemKind::Gist,
            Self::User(_) => ItemKind::User,
        }
    }

    fn attribute(&self, field: Field) -> Option<String> {
        if !self.defines(field) {
            return None;
        }
        Some(
            self.raw()
                .get(field.key())
                .map(stringify)
                .unwrap_or_default(),
        )
    }

    fn open_issues(&self) -> Option<u64> {
        match self {
            Self::Repository(raw) => Some(
                raw.get("open_issues")
                    .or_else(|| raw.get("open_issues_count"))
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0),
            ),
            Self::Gist(_) | Self::User(_) => None,
        }
    }

    fn raw(&self) -> &RawObject {
        match self {
            Self::Repository(raw) | Self::Gist(raw) | Self::User(raw) => raw,
        }
    }
}

fn stringify(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
