//! `owner[/repo]` target parsing.

use crate::error::{ExploreError, ExploreResult};
use std::fmt;
use std::str::FromStr;

/// The scope of one run: an owner, optionally narrowed to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub owner: String,
    pub repo: Option<String>,
}

impl Target {
    /// Resolve a raw command-line target.
    ///
    /// One leading and one trailing `/` are stripped first. What remains may
    /// hold at most one `/`; an empty repository part means "no repository".
    pub fn parse(raw: &str) -> ExploreResult<Self> {
        let trimmed = raw.strip_prefix('/').unwrap_or(raw);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        if trimmed.matches('/').count() >= 2 {
            return Err(ExploreError::BadTarget(trimmed.to_string()));
        }

        let (owner, repo) = match trimmed.split_once('/') {
            Some((owner, repo)) => (owner, repo),
            None => (trimmed, ""),
        };

        if owner.trim().is_empty() {
            return Err(ExploreError::BadTarget(raw.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: (!repo.is_empty()).then(|| repo.to_string()),
        })
    }

    /// Whether the target names a single repository.
    pub fn is_single_repo(&self) -> bool {
        self.repo.is_some()
    }
}

impl FromStr for Target {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repo {
            Some(repo) => write!(f, "{}/{}", self.owner, repo),
            None => write!(f, "{}/", self.owner),
        }
    }
}
