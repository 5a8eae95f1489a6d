//! Result aggregation and report output

pub mod ledger;
pub mod log_sink;
pub mod report_writer;
pub mod summary;

pub use ledger::{roll_up, Outcome, ResultsLedger, TestResult};
pub use log_sink::LogSink;
pub use report_writer::{render_report, write_report};
pub use summary::{write_summary, RunMode, RunSummary};
