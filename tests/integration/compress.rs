//! Integration tests for compression.

use lopdf::Document;
use pdftools::compress::{compress_file, reduction_percent};
use pdftools::config::{CompressOptions, CompressionLevel, Operation};
use pdftools::ops::{Outcome, execute};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{config, create_pdf, page_labels};

#[rstest]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_compress_shrinks_and_keeps_pages(#[case] level: CompressionLevel) {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "report.pdf", 4);
    let output = temp_dir.path().join("small.pdf");

    let outcome = execute(config(
        Operation::Compress(CompressOptions {
            input: input.clone(),
            level,
        }),
        output.clone(),
    ))
    .await
    .unwrap();

    let Outcome::Compress(report) = outcome else {
        panic!("expected compress outcome");
    };
    assert_eq!(report.original_size, std::fs::metadata(&input).unwrap().len());
    assert_eq!(report.compressed_size, std::fs::metadata(&output).unwrap().len());
    assert!(report.compressed_size < report.original_size);
    assert_eq!(
        report.reduction_percent,
        reduction_percent(report.original_size, report.compressed_size)
    );

    let original = Document::load(&input).unwrap();
    let compressed = Document::load(&output).unwrap();
    assert_eq!(compressed.get_pages().len(), 4);
    assert_eq!(page_labels(&compressed), page_labels(&original));
}

#[tokio::test]
async fn test_compress_file_reports_statistics() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "report.pdf", 2);

    let compressed = compress_file(&CompressOptions {
        input,
        level: CompressionLevel::Standard,
    })
    .await
    .unwrap();

    assert_eq!(compressed.page_count, 2);
    assert!(compressed.statistics.applied());
    assert_eq!(compressed.statistics.streams_compressed, 2);
}

#[test]
fn test_reduction_percent_of_empty_original() {
    assert_eq!(reduction_percent(0, 100), 0.0);
}
