//! Opener dispatch
//!
//! Routes a classified file to the opener for its document family and records
//! exactly one outcome for it.

use std::path::Path;

use super::context::RunContext;
use super::file_type::{display_extension, DocumentType};
use crate::openers::{OfficeOpener, PdfOpener};

/// Description recorded for a normal open
pub const OPENED_OK_DESCRIPTION: &str = "File Open - Opened OK";
/// Description recorded for a protected open
pub const OPENED_PROTECTED_DESCRIPTION: &str = "File Open - Opened Protected";

/// What an opener observed when it tried to load a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The document loaded but is password protected
    OpenedProtected,
    Failed(String),
}

/// Whether a dispatched file counts as opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    Opened,
    NotOpened,
}

/// Capability to attempt opening a document of one family
pub trait Opener: Send + Sync {
    fn open(&self, path: &Path, doc_type: DocumentType) -> OpenOutcome;
}

/// One opener per document family
pub struct Openers {
    pub document: Box<dyn Opener>,
    pub workbook: Box<dyn Opener>,
    pub presentation: Box<dyn Opener>,
    pub pdf: Box<dyn Opener>,
}

impl Openers {
    /// The built-in openers
    pub fn native() -> Self {
        Self {
            document: Box::new(OfficeOpener),
            workbook: Box::new(OfficeOpener),
            presentation: Box::new(OfficeOpener),
            pdf: Box::new(PdfOpener),
        }
    }

    /// Opener responsible for `doc_type`, `None` for unassigned types
    pub fn select(&self, doc_type: DocumentType) -> Option<&dyn Opener> {
        match doc_type {
            DocumentType::WordBinary | DocumentType::WordXml => Some(self.document.as_ref()),
            DocumentType::ExcelBinary | DocumentType::ExcelXml => Some(self.workbook.as_ref()),
            DocumentType::PowerPointBinary | DocumentType::PowerPointXml => {
                Some(self.presentation.as_ref())
            }
            DocumentType::Pdf => Some(self.pdf.as_ref()),
            DocumentType::Unassigned => None,
        }
    }

    /// Run the matching opener without recording anything
    ///
    /// Unassigned types never reach an opener and fail straight away.
    pub fn attempt(&self, doc_type: DocumentType, path: &Path) -> OpenOutcome {
        match self.select(doc_type) {
            Some(opener) => {
                tracing::debug!("opening {} as {:?}", path.display(), doc_type);
                opener.open(path, doc_type)
            }
            None => OpenOutcome::Failed(format!(
                "Failed to Open - Unknown Filetype {}",
                display_extension(path)
            )),
        }
    }
}

impl Default for Openers {
    fn default() -> Self {
        Self::native()
    }
}

/// Record `outcome` through the recording contract
pub fn record_outcome(
    ctx: &mut RunContext,
    doc_type: DocumentType,
    path: &Path,
    outcome: OpenOutcome,
) -> OpenStatus {
    match outcome {
        OpenOutcome::Opened => {
            ctx.record_normal_open(path, OPENED_OK_DESCRIPTION, doc_type);
            OpenStatus::Opened
        }
        OpenOutcome::OpenedProtected => {
            ctx.record_protected_open(path, OPENED_PROTECTED_DESCRIPTION, doc_type);
            OpenStatus::NotOpened
        }
        OpenOutcome::Failed(reason) => {
            ctx.record_failure(path, &reason, doc_type);
            OpenStatus::NotOpened
        }
    }
}

/// Open `path` with the opener for `doc_type` and record the outcome
pub fn open_and_record(
    doc_type: DocumentType,
    path: &Path,
    openers: &Openers,
    ctx: &mut RunContext,
) -> OpenStatus {
    let outcome = openers.attempt(doc_type, path);
    record_outcome(ctx, doc_type, path, outcome)
}
