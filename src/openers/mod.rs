//! Built-in document openers

pub mod office;
pub mod pdf;

pub use office::OfficeOpener;
pub use pdf::PdfOpener;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::core::dispatch::OpenOutcome;

/// Run an open attempt with panic isolation
///
/// Parsers for malformed documents can panic; a panic is reported as a
/// failure for that one file instead of tearing down the run.
pub(crate) fn guarded<F>(path: &Path, attempt: F) -> OpenOutcome
where
    F: FnOnce() -> anyhow::Result<OpenOutcome>,
{
    match panic::catch_unwind(AssertUnwindSafe(attempt)) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => OpenOutcome::Failed(format!("{:#}", e)),
        Err(_panic) => {
            tracing::warn!("panic while opening {}", path.display());
            OpenOutcome::Failed("Panic while opening document".to_string())
        }
    }
}
