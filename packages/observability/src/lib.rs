//! # Observability
//!
//! Centralized `tracing` setup for ghex.
//!
//! Binaries call [`init_with_config`] once at startup and use the standard
//! `tracing` macros everywhere else. Library crates never install a
//! subscriber.
//!
//! Logs are kept off stdout, which carries records:
//! - compact human-readable text on stderr by default
//! - JSON lines (see [`LogEntry`]) with [`LogFormat::Json`]
//! - appended to a file instead of stderr when `log_path` is set
//!
//! `RUST_LOG` overrides the configured level.
//!
//! ## Usage
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "ghex".into(),
//!     default_level: "debug".into(),
//!     format: observability::LogFormat::Json,
//!     ..Default::default()
//! })?;
//! tracing::info!("ready");
//! ```

mod json_layer;
mod writer;

pub use json_layer::{JsonLayer, LogEntry};
pub use writer::LogSink;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human-readable text.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name written to every JSON entry.
    pub service_name: String,

    /// Default filter (e.g. "warn", "ghex_core=debug").
    /// Overridden by the `RUST_LOG` environment variable.
    pub default_level: String,

    pub format: LogFormat,

    /// Append to this file instead of writing to stderr.
    pub log_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "ghex".into(),
            default_level: "warn".into(),
            format: LogFormat::Compact,
            log_path: None,
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if the log file cannot be opened or a global subscriber is already
/// installed.
pub fn init_with_config(config: LogConfig) -> io::Result<()> {
    let sink = match &config.log_path {
        Some(path) => LogSink::open(path)?,
        None => LogSink::stderr(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Compact => {
            let ansi = sink.is_stderr() && io::stderr().is_terminal();
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_file(false)
                        .with_line_number(false)
                        .compact()
                        .with_ansi(ansi)
                        .with_writer(sink),
                )
                .try_init()
        }
        LogFormat::Json => registry
            .with(JsonLayer::new(config.service_name.clone(), sink))
            .try_init(),
    };
    installed.map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    tracing::debug!(
        service = %config.service_name,
        format = ?config.format,
        log_path = ?config.log_path,
        "observability initialized"
    );
    Ok(())
}
