//! Machine-readable run summary

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::context::RunTally;
use crate::core::status::ReturnStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    File,
    Directory,
}

/// Totals of a finished run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub mode: RunMode,
    pub target: PathBuf,
    pub files_seen: usize,
    pub files_opened: usize,
    pub status: ReturnStatus,
    pub exit_code: u8,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(mode: RunMode, target: &Path, tally: RunTally, status: ReturnStatus, interrupted: bool) -> Self {
        Self {
            mode,
            target: target.to_path_buf(),
            files_seen: tally.files_seen,
            files_opened: tally.files_opened,
            status,
            exit_code: status.exit_code(),
            interrupted,
        }
    }
}

/// Save the summary as pretty-printed JSON
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary).context("Failed to write summary file")?;
    Ok(())
}
