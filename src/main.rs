use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use open_files_test::prelude::*;
use open_files_test::orchestrator::DEFAULT_OUTPUT_DIR;

#[derive(Parser)]
#[command(name = "open_files_test")]
#[command(version, about = "Open-test Office and PDF documents and report which ones fail", long_about = None)]
struct Cli {
    /// Source FILE to process
    #[arg(long = "f", visible_alias = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Source DIRECTORY to search for the files specified by 'filetype'
    #[arg(long = "d", visible_alias = "directory", value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Which type of documents to check: doc|ppt|xls|docx|xlsx|pptx|docm|xlsm|pptm|pdf, or * for all
    #[arg(long, default_value = "*")]
    filetype: String,

    /// Generate a log report of the results (Results.txt in the output directory)
    #[arg(long = "l", visible_alias = "log")]
    log: bool,

    /// Generate an XML report containing the test run results
    #[arg(long = "x", visible_alias = "xmlreport", value_name = "REPORT")]
    xml_report: Option<PathBuf>,

    /// Output directory for the log and XML report
    #[arg(long = "o", visible_alias = "output-directory", default_value = DEFAULT_OUTPUT_DIR)]
    output_directory: PathBuf,

    /// Number of parallel worker threads for directory runs
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Show a progress bar during directory runs
    #[arg(long)]
    progress: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        RunOptions {
            file: cli.file,
            directory: cli.directory,
            filetype: cli.filetype,
            log: cli.log,
            xml_report: cli.xml_report,
            output_directory: cli.output_directory,
            workers: cli.workers,
            progress: cli.progress,
            summary_json: cli.summary_json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn execute(cli: Cli) -> Result<ReturnStatus> {
    // Set up graceful shutdown handler
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();

    ctrlc::set_handler(move || {
        eprintln!("\nShutdown requested. Finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let opts = RunOptions::from(cli);
    let report = run(&opts, &Openers::native(), &shutdown_requested)?;
    Ok(report.status)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            eprintln!("Couldn't Parse Args");
            return ExitCode::from(ReturnStatus::BadArgs.exit_code());
        }
    };

    init_tracing(cli.verbose);

    let status = match execute(cli) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("General exception occurred: {:#}", e);
            ReturnStatus::UndefinedStatus
        }
    };

    ExitCode::from(status.exit_code())
}
