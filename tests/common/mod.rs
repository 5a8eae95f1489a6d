//! Shared helpers for integration tests

#![allow(dead_code)]

use open_files_test::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// Opener returning scripted outcomes keyed by file name
///
/// Files without a script open successfully. Every call is recorded.
#[derive(Default)]
pub struct ScriptedOpener {
    script: HashMap<String, OpenOutcome>,
    pub calls: Mutex<Vec<(String, DocumentType)>>,
}

impl ScriptedOpener {
    pub fn with(mut self, file_name: &str, outcome: OpenOutcome) -> Self {
        self.script.insert(file_name.to_string(), outcome);
        self
    }
}

impl Opener for ScriptedOpener {
    fn open(&self, path: &Path, doc_type: DocumentType) -> OpenOutcome {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((name.clone(), doc_type));
        self.script.get(&name).cloned().unwrap_or(OpenOutcome::Opened)
    }
}

/// Openers where every family uses a copy of the same script
pub fn scripted_openers(script: &[(&str, OpenOutcome)]) -> Openers {
    let build = || {
        script
            .iter()
            .fold(ScriptedOpener::default(), |o, (name, outcome)| o.with(name, outcome.clone()))
    };
    Openers {
        document: Box::new(build()),
        workbook: Box::new(build()),
        presentation: Box::new(build()),
        pdf: Box::new(build()),
    }
}

/// Create empty files named `names` under `dir`
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }
}

/// Write a minimal one-page PDF
pub fn write_minimal_pdf(path: &Path) {
    use lopdf::{dictionary, Document, Object, Stream};

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"BT ET".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
