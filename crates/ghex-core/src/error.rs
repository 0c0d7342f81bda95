//! Error types for exploration runs.

use gh_api_client::GhApiError;
use thiserror::Error;

/// Errors produced while validating inputs or running the pipeline.
///
/// Validation variants are always raised before the first network request.
#[derive(Error, Debug)]
pub enum ExploreError {
    /// Target string is not `owner`, `owner/` or `owner/repo`
    #[error("Bad target {0:?}")]
    BadTarget(String),

    /// `--type` value is not one of the known item kinds
    #[error("unknown --type {0:?} (expected r, repo, g or gist)")]
    UnknownKind(String),

    /// `--count` and `--sum` were both requested
    #[error("--count and --sum are mutually exclusive")]
    ConflictingModes,

    /// A filter was combined with an item kind it cannot apply to
    #[error("{option} can only be used with {required} as a target type")]
    IncompatibleFilter {
        option: &'static str,
        required: &'static str,
    },

    /// A name or language pattern failed to compile
    #[error("invalid {option} pattern: {source}")]
    InvalidPattern {
        option: &'static str,
        #[source]
        source: regex::Error,
    },

    /// `--exec` template could not be turned into an argument vector
    #[error("invalid --exec command: {0}")]
    InvalidCommand(String),

    /// Fetching from GitHub failed (unknown owner/repository, transport, rate limit)
    #[error(transparent)]
    Remote(#[from] GhApiError),

    /// External command could not be started
    #[error("failed to run {program:?}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External command exited unsuccessfully
    #[error("command {program:?} failed with {status}")]
    CommandFailed { program: String, status: String },

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExploreError {
    /// Whether the error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::BadTarget(_)
                | Self::UnknownKind(_)
                | Self::ConflictingModes
                | Self::IncompatibleFilter { .. }
                | Self::InvalidPattern { .. }
                | Self::InvalidCommand(_)
                | Self::Config(_)
        )
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Remote(_) => 2,
            Self::CommandSpawn { .. } | Self::CommandFailed { .. } => 3,
            _ => 1,
        }
    }

    /// Whether this is a closed stdout (reader went away, e.g. `| head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Result type alias using ExploreError.
pub type ExploreResult<T> = Result<T, ExploreError>;
