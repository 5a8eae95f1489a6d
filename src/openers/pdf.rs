//! PDF opener

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::guarded;
use crate::core::dispatch::{OpenOutcome, Opener};
use crate::core::file_type::DocumentType;

const MAX_PDF_SIZE: u64 = 500_000_000; // 500MB
const MIN_PDF_SIZE: u64 = 100;

/// Opens PDF files with lopdf
pub struct PdfOpener;

impl Opener for PdfOpener {
    fn open(&self, path: &Path, _doc_type: DocumentType) -> OpenOutcome {
        guarded(path, || open_pdf(path))
    }
}

/// Check size bounds, magic bytes and the EOF marker
fn quick_validate(path: &Path) -> Result<Vec<u8>> {
    let file_size = fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path.display()))?
        .len();

    if file_size > MAX_PDF_SIZE {
        bail!("File too large: {} bytes", file_size);
    }
    if file_size < MIN_PDF_SIZE {
        bail!("File too small: {} bytes", file_size);
    }

    let buffer = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;

    if !buffer.starts_with(b"%PDF-") {
        bail!("Invalid PDF header");
    }

    // %%EOF must appear within the last 1KB
    let tail_start = buffer.len().saturating_sub(1024);
    if !buffer[tail_start..].windows(5).any(|w| w == b"%%EOF") {
        bail!("Missing %%EOF marker");
    }

    Ok(buffer)
}

/// Parse with lopdf; an `/Encrypt` trailer entry or a decryption error marks a document protected
fn open_pdf(path: &Path) -> Result<OpenOutcome> {
    let buffer = quick_validate(path)?;

    let doc = match lopdf::Document::load_mem(&buffer) {
        Ok(doc) => doc,
        Err(lopdf::Error::Decryption(_)) => return Ok(OpenOutcome::OpenedProtected),
        Err(e) => return Err(e).context("PDF parse error"),
    };

    if doc.trailer.get(b"Encrypt").is_ok() {
        return Ok(OpenOutcome::OpenedProtected);
    }
    if doc.get_pages().is_empty() {
        bail!("PDF has no pages");
    }

    Ok(OpenOutcome::Opened)
}
