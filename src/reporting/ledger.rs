//! Per-document-type result ledger

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::file_type::DocumentType;

/// Outcome of a single open test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Success,
    Fail,
}

/// Result of opening a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub description: String,
    pub file_path: PathBuf,
    pub outcome: Outcome,
}

/// Results grouped by document type
///
/// Types are kept in the order they were first recorded and each type's
/// results in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ResultsLedger {
    entries: Vec<(DocumentType, Vec<TestResult>)>,
}

impl ResultsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result under `doc_type`
    pub fn add(&mut self, doc_type: DocumentType, path: &Path, description: String, outcome: Outcome) {
        let result = TestResult {
            description,
            file_path: path.to_path_buf(),
            outcome,
        };

        match self.entries.iter_mut().find(|(t, _)| *t == doc_type) {
            Some((_, results)) => results.push(result),
            None => self.entries.push((doc_type, vec![result])),
        }
    }

    /// Results recorded for `doc_type`, empty if none
    pub fn results_for(&self, doc_type: DocumentType) -> &[TestResult] {
        self.entries
            .iter()
            .find(|(t, _)| *t == doc_type)
            .map(|(_, results)| results.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate types with at least one result, in first-recorded order
    pub fn iter(&self) -> impl Iterator<Item = (DocumentType, &[TestResult])> {
        self.entries
            .iter()
            .filter(|(_, results)| !results.is_empty())
            .map(|(t, results)| (*t, results.as_slice()))
    }

    /// Number of document types with at least one result
    pub fn type_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.type_count() == 0
    }

    /// Fail-dominant verdict for `doc_type`, `None` if nothing was recorded
    pub fn overall_result(&self, doc_type: DocumentType) -> Option<Outcome> {
        let results = self.results_for(doc_type);
        if results.is_empty() {
            None
        } else {
            Some(roll_up(results))
        }
    }
}

/// Fail if any result failed, otherwise Success
pub fn roll_up(results: &[TestResult]) -> Outcome {
    if results.iter().any(|r| r.outcome == Outcome::Fail) {
        Outcome::Fail
    } else {
        Outcome::Success
    }
}
