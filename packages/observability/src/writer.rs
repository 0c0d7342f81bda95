//! Log destinations.
//!
//! Logs never share stdout with records: they go to stderr, or are appended
//! to a file with one flush per line so `tail -f` sees whole entries.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// Where formatted log lines are written.
#[derive(Clone)]
pub enum LogSink {
    Stderr,
    File(Arc<Mutex<BufWriter<File>>>),
}

impl LogSink {
    pub fn stderr() -> Self {
        Self::Stderr
    }

    /// Open `path` for appending, creating parent directories as needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self::File(Arc::new(Mutex::new(BufWriter::with_capacity(
            8192, file,
        )))))
    }

    pub fn is_stderr(&self) -> bool {
        matches!(self, Self::Stderr)
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stderr => io::stderr().write(buf),
            Self::File(inner) => {
                let mut guard = inner.lock();
                let result = guard.write(buf);
                guard.flush()?;
                result
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stderr => io::stderr().flush(),
            Self::File(inner) => inner.lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
