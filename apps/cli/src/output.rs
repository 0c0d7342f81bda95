//! Terminal output for the CLI: the record stream and error reporting.

use clap::ValueEnum;
use ghex_core::ExploreError;
use observability::LogFormat;
use std::io::{self, BufWriter, StdoutLock};

/// Log line format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogFormatArg {
    #[default]
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Locked, buffered stdout. Records are flushed one at a time by the sink.
pub fn records() -> BufWriter<StdoutLock<'static>> {
    BufWriter::new(io::stdout().lock())
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ExploreError>() {
        Some(explore) if explore.is_broken_pipe() => 0,
        Some(explore) => explore.exit_code(),
        None => 1,
    }
}

/// Print the error to stderr and return the exit status.
///
/// A closed stdout is not reported: the reader simply stopped listening.
pub fn print_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ExploreError>() {
        Some(explore) if explore.is_broken_pipe() => {
            tracing::debug!("stdout closed, stopping");
        }
        Some(explore) => eprintln!("Error: {explore}"),
        None => eprintln!("Error: {err:#}"),
    }
    exit_code(err)
}
