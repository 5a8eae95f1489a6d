//! Open Files Test Library
//! 
//! Batch open-testing of Office and PDF documents: classify each file by
//! extension, hand it to the opener for its family, and aggregate the
//! outcomes into a per-type XML test report.

pub mod core;
pub mod openers;
pub mod reporting;
pub mod scanner;

pub use crate::core::file_type;
pub use crate::core::orchestrator;
pub use reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::context::{Console, RunContext, RunTally};
    pub use crate::core::dispatch::{open_and_record, OpenOutcome, OpenStatus, Opener, Openers};
    pub use crate::core::file_type::{classify, classify_path, DocumentType};
    pub use crate::core::orchestrator::{
        run, run_directory, run_file, validate_args, ArgsError, RunOptions, RunReport,
    };
    pub use crate::core::status::ReturnStatus;
    pub use crate::openers::{OfficeOpener, PdfOpener};
    pub use crate::reporting::ledger::{Outcome, ResultsLedger, TestResult};
    pub use crate::reporting::log_sink::LogSink;
    pub use crate::reporting::report_writer::{render_report, write_report};
    pub use crate::scanner::file_scanner::collect_files;
}
