//! Run orchestration: argument checks, single-file and directory runs

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

use super::context::{Console, RunContext, RunTally};
use super::dispatch::{open_and_record, record_outcome, OpenStatus, Openers};
use super::file_type::{classify_path, KNOWN_EXTENSIONS};
use super::status::ReturnStatus;
use crate::reporting::log_sink::LogSink;
use crate::reporting::report_writer::write_report;
use crate::reporting::summary::{write_summary, RunMode, RunSummary};
use crate::scanner::file_scanner::{collect_files, ANY_FILETYPE};

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Options a run is configured with
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub directory: Option<PathBuf>,
    /// Extension filter for directory runs, `*` for every file
    pub filetype: String,
    /// Write `Results.txt` into the output directory
    pub log: bool,
    /// XML report file name, relative to the output directory
    pub xml_report: Option<PathBuf>,
    pub output_directory: PathBuf,
    pub workers: usize,
    pub progress: bool,
    pub summary_json: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            file: None,
            directory: None,
            filetype: ANY_FILETYPE.to_string(),
            log: false,
            xml_report: None,
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: 1,
            progress: false,
            summary_json: None,
        }
    }
}

impl RunOptions {
    /// Where the XML report goes, if one was requested
    pub fn report_path(&self) -> Option<PathBuf> {
        self.xml_report
            .as_ref()
            .map(|report| self.output_directory.join(report))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Filetype must be one of doc|xls|ppt|docx|xlsx|pptx|docm|xlsm|pptm|pdf")]
    UnknownFiletype(String),

    #[error("Cannot Use Both File and Directory Options. Please select 1.")]
    FileAndDirectory,

    #[error("Either a file or a directory must be given.")]
    MissingTarget,

    #[error("Worker count must be at least 1.")]
    NoWorkers,
}

/// Check options before any filesystem access
pub fn validate_args(opts: &RunOptions) -> Result<(), ArgsError> {
    let filetype = opts.filetype.to_ascii_lowercase();
    if filetype != ANY_FILETYPE && !KNOWN_EXTENSIONS.contains(&filetype.as_str()) {
        return Err(ArgsError::UnknownFiletype(opts.filetype.clone()));
    }

    match (&opts.file, &opts.directory) {
        (Some(_), Some(_)) => return Err(ArgsError::FileAndDirectory),
        (None, None) => return Err(ArgsError::MissingTarget),
        _ => {}
    }

    if opts.workers == 0 {
        return Err(ArgsError::NoWorkers);
    }

    Ok(())
}

/// Final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub status: ReturnStatus,
    pub tally: RunTally,
    pub interrupted: bool,
}

/// Classify and open a single file
pub fn run_file(path: &Path, openers: &Openers, ctx: &mut RunContext) -> ReturnStatus {
    ctx.file_seen();
    match open_and_record(classify_path(path), path, openers, ctx) {
        OpenStatus::Opened => ReturnStatus::FileOpened,
        OpenStatus::NotOpened => ReturnStatus::FileCouldNotOpen,
    }
}

/// Open every file under `dir` matching `*.<filter>`
///
/// With more than one worker the files are opened on a rayon pool and the
/// context is shared behind a mutex; per-type result order is then
/// completion order rather than enumeration order. Setting `shutdown` stops
/// new files from being started.
pub fn run_directory(
    dir: &Path,
    filter: &str,
    openers: &Openers,
    ctx: &mut RunContext,
    workers: usize,
    shutdown: &AtomicBool,
) -> Result<(ReturnStatus, bool)> {
    if !dir.is_dir() {
        eprintln!("Directory '{}' does not exist.", dir.display());
        return Ok((ReturnStatus::Error, false));
    }

    let files = collect_files(dir, filter)?;
    ctx.console().progress().set_length(files.len() as u64);

    let interrupted = if workers > 1 {
        run_parallel(&files, openers, ctx, workers, shutdown)?
    } else {
        run_sequential(&files, openers, ctx, shutdown)
    };

    ctx.console().progress().finish_and_clear();
    if interrupted {
        eprintln!("Shutdown requested, remaining files were skipped.");
    }

    let tally = ctx.tally();
    ctx.emit(&format!(
        "Files opened successfully {} of {}",
        tally.files_opened, tally.files_seen
    ));

    let status = if tally.all_opened() {
        ReturnStatus::DirOpened
    } else {
        ReturnStatus::DirContainsFilesCouldNotOpen
    };
    Ok((status, interrupted))
}

fn run_sequential(files: &[PathBuf], openers: &Openers, ctx: &mut RunContext, shutdown: &AtomicBool) -> bool {
    for path in files {
        if shutdown.load(Ordering::SeqCst) {
            return true;
        }
        ctx.file_seen();
        open_and_record(classify_path(path), path, openers, ctx);
        ctx.console().progress().inc(1);
    }
    false
}

fn run_parallel(
    files: &[PathBuf],
    openers: &Openers,
    ctx: &mut RunContext,
    workers: usize,
    shutdown: &AtomicBool,
) -> Result<bool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;

    let shared = Mutex::new(ctx);

    pool.install(|| {
        files.par_iter().for_each(|path| {
            if shutdown.load(Ordering::SeqCst) {
                return;
            }
            let doc_type = classify_path(path);
            // Openers run outside the lock; only recording is serialized
            let outcome = openers.attempt(doc_type, path);

            let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
            guard.file_seen();
            record_outcome(&mut **guard, doc_type, path, outcome);
            guard.console().progress().inc(1);
        });
    });

    Ok(shutdown.load(Ordering::SeqCst))
}

/// Printed for every run; single-file runs have no directory to name
fn search_banner(opts: &RunOptions) -> String {
    let dir = opts
        .directory
        .as_deref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    format!("Searching {} for files of type *.{}", dir, opts.filetype)
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Execute a whole run: validate, open, then write the log, report and summary
///
/// Argument errors are reported on stderr and mapped to
/// [`ReturnStatus::BadArgs`] without touching the filesystem. Failing to
/// create the log or write the report or summary is returned as an error.
pub fn run(opts: &RunOptions, openers: &Openers, shutdown: &AtomicBool) -> Result<RunReport> {
    if let Err(e) = validate_args(opts) {
        eprintln!("{}", e);
        return Ok(RunReport {
            status: ReturnStatus::BadArgs,
            tally: RunTally::default(),
            interrupted: false,
        });
    }

    println!("Running {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("{}", search_banner(opts));

    let log = if opts.log {
        Some(LogSink::create(&opts.output_directory)?)
    } else {
        None
    };
    let report_path = opts.report_path();

    let (mode, target, status, interrupted, tally, ledger) = {
        let console = if opts.progress && opts.directory.is_some() {
            Console::with_progress(progress_bar())
        } else {
            Console::stdout()
        };
        let mut ctx = RunContext::new(report_path.is_some(), log, console);

        let (mode, target, status, interrupted) = match (&opts.directory, &opts.file) {
            (Some(dir), _) => {
                let (status, interrupted) =
                    run_directory(dir, &opts.filetype, openers, &mut ctx, opts.workers, shutdown)?;
                (RunMode::Directory, dir.clone(), status, interrupted)
            }
            (None, Some(file)) => {
                let status = run_file(file, openers, &mut ctx);
                (RunMode::File, file.clone(), status, false)
            }
            (None, None) => unreachable!("validate_args requires a file or a directory"),
        };

        let (tally, ledger) = ctx.finish()?;
        (mode, target, status, interrupted, tally, ledger)
    };

    if let (Some(path), Some(ledger)) = (report_path.as_deref(), ledger.as_ref()) {
        write_report(path, ledger)?;
        println!("XML report saved to: {}", path.display());
    }

    if let Some(path) = opts.summary_json.as_deref() {
        let summary = RunSummary::new(mode, &target, tally, status, interrupted);
        write_summary(path, &summary)?;
    }

    tracing::debug!("run finished with {:?} ({} of {} opened)", status, tally.files_opened, tally.files_seen);

    Ok(RunReport {
        status,
        tally,
        interrupted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> RunOptions {
        RunOptions {
            directory: Some(PathBuf::from("docs")),
            ..RunOptions::default()
        }
    }

    #[test]
    fn test_validate_accepts_known_filters() {
        for filter in ["*", "doc", "XLSX", "pptm", "pdf"] {
            let o = RunOptions {
                filetype: filter.to_string(),
                ..opts()
            };
            assert_eq!(validate_args(&o), Ok(()), "filter {}", filter);
        }
    }

    #[test]
    fn test_validate_rejects_unknown_filter() {
        let o = RunOptions {
            filetype: "tmp".to_string(),
            ..opts()
        };
        assert_eq!(validate_args(&o), Err(ArgsError::UnknownFiletype("tmp".to_string())));
    }

    #[test]
    fn test_validate_rejects_file_and_directory() {
        let o = RunOptions {
            file: Some(PathBuf::from("a.docx")),
            ..opts()
        };
        assert_eq!(validate_args(&o), Err(ArgsError::FileAndDirectory));
    }

    #[test]
    fn test_validate_requires_target() {
        assert_eq!(validate_args(&RunOptions::default()), Err(ArgsError::MissingTarget));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let o = RunOptions { workers: 0, ..opts() };
        assert_eq!(validate_args(&o), Err(ArgsError::NoWorkers));
    }

    #[test]
    fn test_search_banner_in_both_modes() {
        assert_eq!(
            search_banner(&RunOptions {
                filetype: "pdf".to_string(),
                ..opts()
            }),
            "Searching docs for files of type *.pdf"
        );

        let single = RunOptions {
            file: Some(PathBuf::from("a.docx")),
            ..RunOptions::default()
        };
        assert_eq!(search_banner(&single), "Searching  for files of type *.*");
    }

    #[test]
    fn test_report_path_is_relative_to_output_dir() {
        let o = RunOptions {
            xml_report: Some(PathBuf::from("report.xml")),
            ..opts()
        };
        assert_eq!(o.report_path(), Some(PathBuf::from("output").join("report.xml")));
        assert_eq!(opts().report_path(), None);
    }
}
