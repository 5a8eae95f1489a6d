//! XML test report writing

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::ledger::{roll_up, Outcome, ResultsLedger};

pub const TEST_CASE_DESCRIPTION: &str =
    "Programatically open a set of files and report whether or not they open correctly.";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Serialize)]
#[serde(rename = "TestCases")]
pub struct TestCases {
    #[serde(rename = "TestCase")]
    pub test_cases: Vec<TestCase>,
}

/// One entry per document type
#[derive(Debug, Serialize)]
pub struct TestCase {
    #[serde(rename = "@Description")]
    pub description: String,
    #[serde(rename = "@ID")]
    pub id: usize,
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Result")]
    pub result: Outcome,
    #[serde(rename = "Test")]
    pub tests: Vec<Test>,
}

/// One entry per opened file
#[derive(Debug, Serialize)]
pub struct Test {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Description")]
    pub description: String,
    #[serde(rename = "@Result")]
    pub result: Outcome,
}

/// Build the report model from the ledger
///
/// Test cases are numbered from 1 in ledger order. Types without results
/// produce no entry.
pub fn build_report(ledger: &ResultsLedger) -> TestCases {
    let test_cases = ledger
        .iter()
        .enumerate()
        .map(|(idx, (doc_type, results))| TestCase {
            description: TEST_CASE_DESCRIPTION.to_string(),
            id: idx + 1,
            name: format!("{} - File open test", doc_type.extension_name().to_uppercase()),
            result: roll_up(results),
            tests: results
                .iter()
                .map(|r| Test {
                    name: format!("Opening file {}.", r.file_path.display()),
                    description: r.description.clone(),
                    result: r.outcome,
                })
                .collect(),
        })
        .collect();

    TestCases { test_cases }
}

/// Render the ledger as an XML document
pub fn render_report(ledger: &ResultsLedger) -> Result<String> {
    let report = build_report(ledger);

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    report
        .serialize(serializer)
        .context("Failed to serialize XML report")?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Write the XML report to `output_path`, creating parent directories
///
/// # Arguments
/// * `output_path` - Path of the report file
/// * `ledger` - Results collected during the run
pub fn write_report(output_path: &Path, ledger: &ResultsLedger) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let xml = render_report(ledger)?;
    fs::write(output_path, xml)
        .with_context(|| format!("Failed to write XML report {}", output_path.display()))?;

    tracing::debug!("wrote XML report to {}", output_path.display());
    Ok(())
}
