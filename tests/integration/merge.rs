//! Integration tests for merging.

use lopdf::{Document, Object};
use pdftools::config::{CompressionLevel, Metadata, Operation};
use pdftools::merge::{MetadataManager, merge_pdfs};
use pdftools::ops::{Outcome, execute};
use tempfile::TempDir;

use crate::common::{config, create_pdf, merge_options, page_labels};

#[tokio::test]
async fn test_merge_keeps_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "first.pdf", 2),
        create_pdf(temp_dir.path(), "second.pdf", 1),
        create_pdf(temp_dir.path(), "third.pdf", 3),
    ];

    let (document, stats) = merge_pdfs(&merge_options(inputs)).await.unwrap();

    assert_eq!(stats.files_merged, 3);
    assert_eq!(stats.total_pages, 6);
    assert_eq!(
        page_labels(&document),
        vec![
            "first page 1",
            "first page 2",
            "second page 1",
            "third page 1",
            "third page 2",
            "third page 3",
        ]
    );
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "basic.pdf", 2);

    let (document, stats) = merge_pdfs(&merge_options(vec![input.clone(), input]))
        .await
        .unwrap();

    assert_eq!(stats.files_merged, 2);
    assert_eq!(document.get_pages().len(), 4);
}

#[tokio::test]
async fn test_merge_single_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "only.pdf", 5);

    let (document, stats) = merge_pdfs(&merge_options(vec![input])).await.unwrap();

    assert_eq!(stats.files_merged, 1);
    assert_eq!(document.get_pages().len(), 5);
}

#[tokio::test]
async fn test_merged_output_round_trips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out").join("merged.pdf");
    let mut options = merge_options(vec![
        create_pdf(temp_dir.path(), "a.pdf", 1),
        create_pdf(temp_dir.path(), "b.pdf", 2),
    ]);
    options.bookmarks = true;
    options.compression = CompressionLevel::Maximum;
    options.metadata = Metadata::new(
        Some("Combined".to_string()),
        Some("Tester".to_string()),
        None,
        None,
    );

    let outcome = execute(config(Operation::Merge(options), output.clone()))
        .await
        .unwrap();

    let Outcome::Merge(summary) = outcome else {
        panic!("expected merge outcome");
    };
    assert_eq!(summary.statistics.bookmarks_added, 2);
    assert!(summary.skipped.is_empty());

    let written = Document::load(&output).unwrap();
    assert_eq!(page_labels(&written), vec!["a page 1", "b page 1", "b page 2"]);

    let metadata = MetadataManager::new().get_metadata(&written);
    assert_eq!(metadata.title.as_deref(), Some("Combined"));
    assert_eq!(metadata.author.as_deref(), Some("Tester"));

    let catalog = written.catalog().unwrap();
    assert!(catalog.get(b"Outlines").and_then(Object::as_reference).is_ok());
}

#[tokio::test]
async fn test_merge_with_parallel_loading() {
    let temp_dir = TempDir::new().unwrap();
    let inputs: Vec<_> = (0..6)
        .map(|i| create_pdf(temp_dir.path(), &format!("part{i}.pdf"), 1))
        .collect();

    let mut options = merge_options(inputs);
    options.jobs = Some(3);

    let (document, _) = merge_pdfs(&options).await.unwrap();

    let expected: Vec<String> = (0..6).map(|i| format!("part{i} page 1")).collect();
    assert_eq!(page_labels(&document), expected);
}
