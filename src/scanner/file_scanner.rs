//! Candidate file collection

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filter value that matches every file
pub const ANY_FILETYPE: &str = "*";

/// Whether `path` matches the `*.<filter>` pattern
///
/// `*` matches every file. Otherwise the extension must equal the filter,
/// ignoring case.
pub fn matches_filter(path: &Path, filter: &str) -> bool {
    if filter == ANY_FILETYPE {
        return true;
    }
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(filter))
        .unwrap_or(false)
}

/// Recursively collect files under `dir` matching `*.<filter>`
///
/// Entries that cannot be read (permission denied, broken links, ...) are
/// skipped with a warning so one bad subtree does not hide the rest.
pub fn collect_files(dir: &Path, filter: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Directory '{}' does not exist.", dir.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && matches_filter(entry.path(), filter) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("found {} file(s) under {}", files.len(), dir.display());
    Ok(files)
}
