//! Mutable run state and the shared recording contract

use indicatif::ProgressBar;
use std::path::Path;

use super::file_type::DocumentType;
use crate::reporting::ledger::{Outcome, ResultsLedger};
use crate::reporting::log_sink::LogSink;

/// Files seen versus files opened during a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTally {
    pub files_seen: usize,
    pub files_opened: usize,
}

impl RunTally {
    pub fn all_opened(&self) -> bool {
        self.files_opened == self.files_seen
    }
}

/// Console output, routed around an optional progress bar
pub struct Console {
    progress: ProgressBar,
    captured: Option<Vec<String>>,
}

impl Console {
    /// Print to stdout with no progress bar
    pub fn stdout() -> Self {
        Self::with_progress(ProgressBar::hidden())
    }

    /// Print to stdout, suspending `progress` while each line is written
    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            progress,
            captured: None,
        }
    }

    /// Keep lines in memory instead of printing them
    pub fn capturing() -> Self {
        Self {
            progress: ProgressBar::hidden(),
            captured: Some(Vec::new()),
        }
    }

    pub fn line(&mut self, line: &str) {
        match self.captured.as_mut() {
            Some(lines) => lines.push(line.to_string()),
            None => self.progress.suspend(|| println!("{}", line)),
        }
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// Lines kept by a capturing console
    pub fn captured(&self) -> &[String] {
        self.captured.as_deref().unwrap_or(&[])
    }
}

/// Everything a run mutates: the optional ledger, the tally and the output sinks
///
/// The ledger is only present when a structured report was requested. Every
/// recording operation still writes to the console without it.
pub struct RunContext {
    ledger: Option<ResultsLedger>,
    log: Option<LogSink>,
    console: Console,
    tally: RunTally,
}

impl RunContext {
    pub fn new(keep_ledger: bool, log: Option<LogSink>, console: Console) -> Self {
        Self {
            ledger: keep_ledger.then(ResultsLedger::new),
            log,
            console,
            tally: RunTally::default(),
        }
    }

    /// A document opened but is password protected
    ///
    /// Recorded as a success, but neither counted as a pass nor written to
    /// the plain-text log.
    pub fn record_protected_open(&mut self, path: &Path, description: &str, doc_type: DocumentType) {
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.add(doc_type, path, description.to_string(), Outcome::Success);
        }

        let line = format!("{}: {} - Opened Protected", doc_type.type_name(), path.display());
        self.console.line(&line);
    }

    /// A document opened normally; counts as a pass
    pub fn record_normal_open(&mut self, path: &Path, description: &str, doc_type: DocumentType) {
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.add(doc_type, path, description.to_string(), Outcome::Success);
        }
        self.tally.files_opened += 1;

        let line = format!("{}: {} - Opened OK", doc_type.type_name(), path.display());
        self.emit(&line);
    }

    /// A document failed to open
    pub fn record_failure(&mut self, path: &Path, reason: &str, doc_type: DocumentType) {
        if let Some(ledger) = self.ledger.as_mut() {
            ledger.add(
                doc_type,
                path,
                format!("File Open - Failed with '{}'", reason),
                Outcome::Fail,
            );
        }

        let line = format!("{}: {} - Error: {}", doc_type.type_name(), path.display(), reason);
        self.emit(&line);
    }

    pub fn file_seen(&mut self) {
        self.tally.files_seen += 1;
    }

    /// Write a line to the console and, when enabled, the log
    pub fn emit(&mut self, line: &str) {
        self.console.line(line);
        if let Some(log) = self.log.as_mut() {
            log.line(line);
        }
    }

    pub fn tally(&self) -> RunTally {
        self.tally
    }

    pub fn ledger(&self) -> Option<&ResultsLedger> {
        self.ledger.as_ref()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Hand the ledger to the report writer and close the log
    pub fn finish(mut self) -> anyhow::Result<(RunTally, Option<ResultsLedger>)> {
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }
        Ok((self.tally, self.ledger.take()))
    }
}
