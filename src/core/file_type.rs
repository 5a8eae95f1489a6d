//! Document type classification by file extension

use std::path::Path;

/// Document type tag derived from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Unassigned,
    WordBinary,
    ExcelBinary,
    PowerPointBinary,
    WordXml,
    ExcelXml,
    PowerPointXml,
    Pdf,
}

/// Extensions accepted by the `--filetype` filter, besides `*`
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "doc", "xls", "ppt", "docx", "xlsx", "pptx", "docm", "xlsm", "pptm", "pdf",
];

/// Classify an extension string
///
/// Leading dots are stripped and the lookup is case-insensitive, so `.DOCX`,
/// `docx` and `DocX` all map to [`DocumentType::WordXml`]. Anything not in the
/// table is [`DocumentType::Unassigned`].
pub fn classify(extension: &str) -> DocumentType {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();

    match ext.as_str() {
        // binary compound files
        "doc" => DocumentType::WordBinary,
        "xls" => DocumentType::ExcelBinary,
        "ppt" => DocumentType::PowerPointBinary,
        // OOXML packages, including macro-enabled variants
        "docx" | "docm" => DocumentType::WordXml,
        "xlsx" | "xlsm" => DocumentType::ExcelXml,
        "pptx" | "pptm" => DocumentType::PowerPointXml,
        "pdf" => DocumentType::Pdf,
        _ => DocumentType::Unassigned,
    }
}

/// Classify a path by its extension. Paths without an extension are unassigned.
pub fn classify_path(path: &Path) -> DocumentType {
    path.extension()
        .map(|ext| classify(&ext.to_string_lossy()))
        .unwrap_or(DocumentType::Unassigned)
}

/// The extension of `path` as displayed in failure messages, dot included
pub fn display_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

impl DocumentType {
    /// Family name used in console and log lines
    pub fn type_name(self) -> &'static str {
        match self {
            DocumentType::WordBinary | DocumentType::WordXml => "Document",
            DocumentType::ExcelBinary | DocumentType::ExcelXml => "Workbook",
            DocumentType::PowerPointBinary | DocumentType::PowerPointXml => "Presentation",
            DocumentType::Pdf => "PDF",
            DocumentType::Unassigned => "Unsupported",
        }
    }

    /// Canonical extension, used to title report test cases
    pub fn extension_name(self) -> &'static str {
        match self {
            DocumentType::WordBinary => "doc",
            DocumentType::ExcelBinary => "xls",
            DocumentType::PowerPointBinary => "ppt",
            DocumentType::WordXml => "docx",
            DocumentType::ExcelXml => "xlsx",
            DocumentType::PowerPointXml => "pptx",
            DocumentType::Pdf => "pdf",
            DocumentType::Unassigned => "unknown",
        }
    }
}
