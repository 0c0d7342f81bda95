//! Output sinks: per-item records, per-kind tallies and profile counts.

use crate::error::ExploreResult;
use crate::item::ItemKind;
use gh_api_client::UserProfile;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Record separator for stream output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    #[default]
    Newline,
    Nul,
}

impl Terminator {
    pub fn from_null_flag(null_terminated: bool) -> Self {
        if null_terminated {
            Self::Nul
        } else {
            Self::Newline
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Newline => b"\n",
            Self::Nul => b"\0",
        }
    }
}

/// Writes one terminated record at a time, flushing after each.
pub struct RecordWriter<W: Write> {
    out: W,
    terminator: Terminator,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, terminator: Terminator) -> Self {
        Self {
            out,
            terminator,
            written: 0,
        }
    }

    /// Write `record` followed by the terminator.
    pub fn write_record(&mut self, record: &str) -> ExploreResult<()> {
        self.out.write_all(record.as_bytes())?;
        self.out.write_all(self.terminator.as_bytes())?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Write one JSON object on its own line (aggregate modes).
    pub fn write_json_line<T: Serialize>(&mut self, value: &T) -> ExploreResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Survivor counts grouped by item kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<ItemKind, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ItemKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: ItemKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Profile-level totals reported by count mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total_repos: u64,
    pub total_gists: u64,
}

impl From<&UserProfile> for Counts {
    fn from(profile: &UserProfile) -> Self {
        Self {
            total_repos: profile.repo_count(),
            total_gists: profile.gist_count(),
        }
    }
}
