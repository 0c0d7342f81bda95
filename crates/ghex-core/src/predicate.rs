//! Filter predicates and their AND composition.

use crate::error::{ExploreError, ExploreResult};
use crate::item::{Explorable, Field, Item};
use crate::source::ItemKindSelector;
use regex::Regex;

/// Filter-related command-line inputs.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub name: Option<String>,
    pub language: Option<String>,
    pub has_issues: bool,
}

/// A pure test over one item.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Start-anchored regex match on a string attribute. Items whose kind
    /// does not define the attribute pass.
    Matches { field: Field, pattern: Regex },
    /// Open issue count is non-zero. Items that cannot have issues fail.
    HasIssues,
}

impl Predicate {
    /// Compile a start-anchored pattern predicate.
    pub fn matching(field: Field, pattern: &str) -> ExploreResult<Self> {
        // Anchor at the start only; trailing text is allowed to remain.
        let pattern = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
            ExploreError::InvalidPattern {
                option: field.option(),
                source,
            }
        })?;
        Ok(Self::Matches { field, pattern })
    }

    pub fn evaluate(&self, item: &Item) -> bool {
        match self {
            Self::Matches { field, pattern } => match item.attribute(*field) {
                Some(value) => pattern.is_match(&value),
                None => true,
            },
            Self::HasIssues => item.open_issues().is_some_and(|count| count > 0),
        }
    }
}

/// Ordered list of predicates combined with short-circuiting AND.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Build predicates from the filter options.
    ///
    /// Fails before any network access when `--has-issues` is combined with
    /// an explicit gist-only selector.
    pub fn build(options: &FilterOptions, kind: ItemKindSelector) -> ExploreResult<Self> {
        let mut predicates = Vec::new();

        if options.has_issues {
            if !kind.allows_repositories() {
                return Err(ExploreError::IncompatibleFilter {
                    option: "--has-issues",
                    required: "repositories",
                });
            }
            predicates.push(Predicate::HasIssues);
        }

        for (pattern, field) in [
            (&options.language, Field::Language),
            (&options.name, Field::Name),
        ] {
            if let Some(pattern) = pattern {
                predicates.push(Predicate::matching(field, pattern)?);
            }
        }

        tracing::debug!(count = predicates.len(), "built predicates");
        Ok(Self { predicates })
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True iff every predicate accepts the item, in declaration order.
    pub fn matches(&self, item: &Item) -> bool {
        self.predicates.iter().all(|p| p.evaluate(item))
    }
}
