//! Evaluation pipeline: source → predicates → sink.

use crate::error::ExploreResult;
use crate::exec::CommandRunner;
use crate::item::Explorable;
use crate::plan::{ExplorePlan, OutputMode};
use crate::sink::{Counts, RecordWriter, Tally};
use crate::source::{Catalog, ItemSource};
use std::io::Write;

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Items pulled from the source.
    pub fetched: usize,
    /// Items that passed every predicate.
    pub matched: usize,
    /// Records or JSON objects written to `out`.
    pub emitted: usize,
}

/// Run a validated plan against a catalog, writing to `out`.
///
/// The owner is resolved first so an unknown owner fails the run instead of
/// producing an empty stream. Count mode stops right after that lookup.
pub async fn explore<C, W>(catalog: &C, plan: &ExplorePlan, out: W) -> ExploreResult<RunSummary>
where
    C: Catalog + ?Sized,
    W: Write,
{
    let mut writer = RecordWriter::new(out, plan.terminator);
    let owner = &plan.target.owner;

    let profile = catalog.profile(owner).await?;
    tracing::debug!(owner = %profile.login, mode = ?plan.mode, "resolved owner");

    if plan.mode == OutputMode::Count {
        let counts = Counts::from(&profile);
        writer.write_json_line(&counts)?;
        tracing::info!(
            total_repos = counts.total_repos,
            total_gists = counts.total_gists,
            "counted"
        );
        return Ok(RunSummary {
            emitted: writer.written(),
            ..RunSummary::default()
        });
    }

    let runner = CommandRunner::new();
    let mut tally = Tally::new();
    let mut matched = 0usize;
    let mut source = ItemSource::new(catalog, &plan.target, plan.kind);

    while let Some(item) = source.next().await? {
        if !plan.predicates.matches(&item) {
            continue;
        }
        matched += 1;

        match plan.mode {
            OutputMode::Sum => tally.record(item.kind()),
            _ => {
                let payload = plan.format.render(&item)?;
                let record = match &plan.command {
                    Some(command) => runner.run(command, &payload).await?,
                    None => payload,
                };
                writer.write_record(&record)?;
            }
        }
    }

    if plan.mode == OutputMode::Sum {
        writer.write_json_line(&tally)?;
    }

    let summary = RunSummary {
        fetched: source.fetched(),
        matched,
        emitted: writer.written(),
    };
    tracing::info!(
        fetched = summary.fetched,
        matched = summary.matched,
        emitted = summary.emitted,
        "run complete"
    );
    Ok(summary)
}
