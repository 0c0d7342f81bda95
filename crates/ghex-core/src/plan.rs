//! Validated run configuration.
//!
//! Everything here is checked before any network access.

use crate::error::{ExploreError, ExploreResult};
use crate::exec::CommandTemplate;
use crate::predicate::{FilterOptions, PredicateSet};
use crate::render::Format;
use crate::sink::Terminator;
use crate::source::ItemKindSelector;
use crate::target::Target;

/// Which sink surviving items go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One record per surviving item.
    #[default]
    Stream,
    /// Profile totals only, no per-item fetch.
    Count,
    /// Survivor tally per item kind.
    Sum,
}

impl OutputMode {
    pub fn from_flags(count: bool, sum: bool) -> ExploreResult<Self> {
        match (count, sum) {
            (true, true) => Err(ExploreError::ConflictingModes),
            (true, false) => Ok(Self::Count),
            (false, true) => Ok(Self::Sum),
            (false, false) => Ok(Self::Stream),
        }
    }
}

/// Raw command-line level inputs.
#[derive(Debug, Clone, Default)]
pub struct ExploreOptions {
    pub target: String,
    /// `--type` value (`r`, `repo`, `g`, `gist`).
    pub kind: Option<String>,
    pub filters: FilterOptions,
    pub exec: Option<String>,
    pub null_terminated: bool,
    pub count: bool,
    pub sum: bool,
    pub repr: bool,
}

/// Immutable, validated description of one run.
#[derive(Debug, Clone)]
pub struct ExplorePlan {
    pub target: Target,
    pub kind: ItemKindSelector,
    pub predicates: PredicateSet,
    pub mode: OutputMode,
    pub format: Format,
    pub command: Option<CommandTemplate>,
    pub terminator: Terminator,
}

impl ExplorePlan {
    /// Validate options and build the plan.
    pub fn build(options: &ExploreOptions) -> ExploreResult<Self> {
        let mode = OutputMode::from_flags(options.count, options.sum)?;

        let kind = ItemKindSelector::from_flag(options.kind.as_deref())
            .ok_or_else(|| ExploreError::UnknownKind(options.kind.clone().unwrap_or_default()))?;

        let predicates = PredicateSet::build(&options.filters, kind)?;
        let target = Target::parse(&options.target)?;

        let command = options
            .exec
            .as_deref()
            .map(CommandTemplate::parse)
            .transpose()?;

        if command.as_ref().is_some_and(|c| !c.has_placeholder()) {
            tracing::warn!("--exec command has no {{}} placeholder");
        }

        Ok(Self {
            target,
            kind,
            predicates,
            mode,
            format: if options.repr { Format::Repr } else { Format::Json },
            command,
            terminator: Terminator::from_null_flag(options.null_terminated),
        })
    }
}
