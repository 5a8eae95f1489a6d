//! Office document opener
//!
//! Binary documents (doc/xls/ppt) are compound files that must carry the main
//! stream of their family. OOXML documents are zip packages with a content
//! types part and the family's main part directory. Password-protected OOXML
//! documents are stored as compound files wrapping an `EncryptedPackage`.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::guarded;
use crate::core::dispatch::{OpenOutcome, Opener};
use crate::core::file_type::DocumentType;

const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const WORD_IDENT: u16 = 0xA5EC;
const FIB_ENCRYPTED: u16 = 0x0100;

const XLS_BOF: u16 = 0x0809;
const XLS_EOF: u16 = 0x000A;
const XLS_FILEPASS: u16 = 0x002F;

/// Opens Word, Excel and PowerPoint documents, binary or OOXML
pub struct OfficeOpener;

impl Opener for OfficeOpener {
    fn open(&self, path: &Path, doc_type: DocumentType) -> OpenOutcome {
        guarded(path, || match doc_type {
            DocumentType::WordBinary | DocumentType::ExcelBinary | DocumentType::PowerPointBinary => {
                open_binary(path, doc_type)
            }
            DocumentType::WordXml | DocumentType::ExcelXml | DocumentType::PowerPointXml => {
                open_ooxml(path, doc_type)
            }
            DocumentType::Pdf | DocumentType::Unassigned => {
                bail!("{:?} is not an Office document type", doc_type)
            }
        })
    }
}

fn is_compound_file(path: &Path) -> Result<bool> {
    let mut file = File::open(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let mut header = [0u8; 8];
    match file.read_exact(&mut header) {
        Ok(()) => Ok(header == CFB_SIGNATURE),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn has_encrypted_package(comp: &cfb::CompoundFile<File>) -> bool {
    comp.is_stream("/EncryptionInfo") && comp.is_stream("/EncryptedPackage")
}

fn open_binary(path: &Path, doc_type: DocumentType) -> Result<OpenOutcome> {
    if !is_compound_file(path)? {
        bail!("Not a compound document");
    }
    let mut comp = cfb::open(path).context("Corrupt compound document")?;

    if has_encrypted_package(&comp) {
        return Ok(OpenOutcome::OpenedProtected);
    }

    let protected = match doc_type {
        DocumentType::WordBinary => word_is_encrypted(&mut comp)?,
        DocumentType::ExcelBinary => workbook_is_encrypted(&mut comp)?,
        _ => presentation_is_encrypted(&comp)?,
    };

    if protected {
        Ok(OpenOutcome::OpenedProtected)
    } else {
        Ok(OpenOutcome::Opened)
    }
}

/// Read the FIB at the start of the `WordDocument` stream
fn word_is_encrypted(comp: &mut cfb::CompoundFile<File>) -> Result<bool> {
    if !comp.is_stream("/WordDocument") {
        bail!("Missing WordDocument stream");
    }
    let mut stream = comp.open_stream("/WordDocument")?;
    let mut fib = [0u8; 12];
    stream.read_exact(&mut fib).context("Truncated FIB")?;

    if u16::from_le_bytes([fib[0], fib[1]]) != WORD_IDENT {
        bail!("Invalid Word FIB identifier");
    }
    let flags = u16::from_le_bytes([fib[10], fib[11]]);
    Ok(flags & FIB_ENCRYPTED != 0)
}

/// Scan the globals substream for a FILEPASS record
fn workbook_is_encrypted(comp: &mut cfb::CompoundFile<File>) -> Result<bool> {
    let name = ["/Workbook", "/Book"]
        .into_iter()
        .find(|name| comp.is_stream(name))
        .context("Missing Workbook stream")?;
    let mut stream = comp.open_stream(name)?;

    let mut first = true;
    loop {
        let mut header = [0u8; 4];
        if let Err(e) = stream.read_exact(&mut header) {
            if e.kind() == io::ErrorKind::UnexpectedEof && !first {
                return Ok(false);
            }
            return Err(e).context("Truncated workbook record");
        }
        let record = u16::from_le_bytes([header[0], header[1]]);
        let len = u16::from_le_bytes([header[2], header[3]]) as u64;

        if first && record != XLS_BOF {
            bail!("Workbook stream does not start with BOF");
        }
        first = false;

        match record {
            XLS_FILEPASS => return Ok(true),
            XLS_EOF => return Ok(false),
            _ => {
                let skipped = io::copy(&mut (&mut stream).take(len), &mut io::sink())?;
                if skipped < len {
                    bail!("Truncated workbook record");
                }
            }
        }
    }
}

fn presentation_is_encrypted(comp: &cfb::CompoundFile<File>) -> Result<bool> {
    if !comp.is_stream("/PowerPoint Document") {
        bail!("Missing PowerPoint Document stream");
    }
    Ok(comp.is_stream("/EncryptedSummary"))
}

fn main_part_prefix(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::ExcelXml => "xl/",
        DocumentType::PowerPointXml => "ppt/",
        _ => "word/",
    }
}

fn open_ooxml(path: &Path, doc_type: DocumentType) -> Result<OpenOutcome> {
    if is_compound_file(path)? {
        let comp = cfb::open(path).context("Corrupt compound document")?;
        if has_encrypted_package(&comp) {
            return Ok(OpenOutcome::OpenedProtected);
        }
        bail!("Compound document is not an OOXML package");
    }

    let file = File::open(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("Not a valid OOXML package")?;

    {
        let mut content_types = archive
            .by_name("[Content_Types].xml")
            .context("Missing [Content_Types].xml")?;
        io::copy(&mut content_types, &mut io::sink()).context("Corrupt [Content_Types].xml")?;
    }

    let prefix = main_part_prefix(doc_type);
    if !archive.file_names().any(|name| name.starts_with(prefix)) {
        bail!("Missing {} part", prefix.trim_end_matches('/'));
    }

    Ok(OpenOutcome::Opened)
}
