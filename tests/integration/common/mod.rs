//! Shared helpers for the integration tests.
//!
//! Fixtures are generated with lopdf into temporary directories, so the
//! tests need no binary files in the repository.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdftools::config::{
    CompressionLevel, Config, KeyLength, MergeOptions, Metadata, OpenMode, Operation as ToolOperation,
    OverwriteMode,
};
use pdftools::encrypt::Encryptor;
use std::path::{Path, PathBuf};

/// Build a document whose pages each show `"{label} page {n}"` many times.
pub fn build_pdf(pages: usize, label: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for number in 1..=pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
        ];
        for line in 0..50 {
            operations.push(Operation::new("Td", vec![50.into(), (750 - line * 12).into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(format!("{label} page {number}"))],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a generated PDF to `dir/name`, labelled with the file stem.
pub fn create_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    let label = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    build_pdf(pages, &label).save(&path).unwrap();
    path
}

/// Write a generated PDF protected by `password`.
pub fn create_encrypted_pdf(dir: &Path, name: &str, pages: usize, password: &str) -> PathBuf {
    let path = dir.join(name);
    let mut doc = build_pdf(pages, name);

    Encryptor::new()
        .encrypt_document(&mut doc, password, password, KeyLength::Bits128)
        .unwrap();
    doc.save(&path).unwrap();

    path
}

/// The first text shown on each page, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| op.operands.first())
                .and_then(|operand| operand.as_str().ok())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Merge options with bookmarks and compression off.
pub fn merge_options(inputs: Vec<PathBuf>) -> MergeOptions {
    MergeOptions {
        inputs,
        bookmarks: false,
        compression: CompressionLevel::None,
        metadata: Metadata::default(),
        continue_on_error: false,
        jobs: None,
    }
}

/// Quiet, non-interactive configuration for `operation`.
pub fn config(operation: ToolOperation, output: PathBuf) -> Config {
    Config {
        operation,
        output,
        dry_run: false,
        verbose: false,
        quiet: true,
        overwrite_mode: OverwriteMode::Force,
        open_mode: OpenMode::Never,
        json: false,
    }
}
