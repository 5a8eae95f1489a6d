//! Plain-text results log

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the plain-text log inside the output directory
pub const LOG_FILE_NAME: &str = "Results.txt";

/// Append-only line sink backing `Results.txt`
///
/// The underlying writer is buffered and flushed when the sink is dropped, so
/// every exit path closes the file.
pub struct LogSink {
    writer: Box<dyn Write + Send>,
}

impl LogSink {
    /// Create `<output_dir>/Results.txt`, creating the directory if needed
    pub fn create(output_dir: &Path) -> Result<Self> {
        let path = log_path(output_dir);
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Write one newline-terminated line
    pub fn line(&mut self, line: &str) {
        // A log write failure must not abort per-file processing
        if let Err(e) = writeln!(self.writer, "{}", line) {
            tracing::warn!("failed to write log line: {}", e);
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush log file")
    }
}

pub fn log_path(output_dir: &Path) -> PathBuf {
    output_dir.join(LOG_FILE_NAME)
}
