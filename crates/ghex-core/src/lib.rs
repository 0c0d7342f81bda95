//! # ghex core
//!
//! A `find(1)`-like engine over a GitHub owner's repositories and gists.
//!
//! Inputs are validated up front into an [`ExplorePlan`]: the resolved
//! [`Target`], the [`ItemKindSelector`], an AND-composed [`PredicateSet`] and
//! the [`OutputMode`]. [`explore`] then drives an [`ItemSource`] over a
//! [`Catalog`] and routes every surviving [`Item`] to exactly one sink:
//! a printed record (optionally produced by an external command), a per-kind
//! [`Tally`], or the profile-level counts.

mod config;
mod error;
mod exec;
mod item;
mod pipeline;
mod plan;
mod predicate;
mod render;
mod sink;
mod source;
mod target;

pub use config::{Config, DEFAULT_LOG_LEVEL};
pub use error::{ExploreError, ExploreResult};
pub use exec::{CommandRunner, CommandTemplate, PLACEHOLDER};
pub use item::{Explorable, Field, Item, ItemKind};
pub use pipeline::{explore, RunSummary};
pub use plan::{ExploreOptions, ExplorePlan, OutputMode};
pub use predicate::{FilterOptions, Predicate, PredicateSet};
pub use render::Format;
pub use sink::{Counts, RecordWriter, Tally, Terminator};
pub use source::{Catalog, ItemKindSelector, ItemSource, Listing};
pub use target::Target;
