//! Integration tests for validation, which is all a dry run performs.

use pdftools::config::{DecryptOptions, Operation, OverwriteMode};
use pdftools::error::PdfToolsError;
use pdftools::validation::Validator;
use tempfile::TempDir;

use crate::common::{config, create_encrypted_pdf, create_pdf, merge_options};

#[tokio::test]
async fn test_dry_run_validation_does_not_write() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("merged.pdf");
    let inputs = vec![
        create_pdf(temp_dir.path(), "a.pdf", 2),
        create_pdf(temp_dir.path(), "b.pdf", 3),
    ];

    let mut config = config(Operation::Merge(merge_options(inputs)), output.clone());
    config.dry_run = true;

    let summary = Validator::new().validate_config(&config).await.unwrap();

    assert_eq!(summary.files_validated, 2);
    assert_eq!(summary.total_pages, 5);
    assert!(summary.total_size > 0);
    assert_eq!(summary.results[0].page_dimensions, Some((595.0, 842.0)));
    assert_eq!(summary.results[1].format_version().as_deref(), Some("1.5"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_validation_accepts_locked_input_for_decrypt() {
    let temp_dir = TempDir::new().unwrap();
    let locked = create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret");

    let config = config(
        Operation::Decrypt(DecryptOptions {
            input: locked,
            password: "secret".to_string(),
        }),
        temp_dir.path().join("plain.pdf"),
    );

    let summary = Validator::new().validate_config(&config).await.unwrap();
    assert!(summary.results[0].is_encrypted);
}

#[tokio::test]
async fn test_validation_rejects_locked_merge_input() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "plain.pdf", 1),
        create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret"),
    ];

    let config = config(
        Operation::Merge(merge_options(inputs)),
        temp_dir.path().join("merged.pdf"),
    );

    let result = Validator::new().validate_config(&config).await;
    assert!(matches!(result, Err(PdfToolsError::EncryptedPdf { .. })));
}

#[tokio::test]
async fn test_validation_skips_locked_merge_input_when_continuing() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "plain.pdf", 1),
        create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret"),
    ];

    let mut options = merge_options(inputs);
    options.continue_on_error = true;
    let config = config(Operation::Merge(options), temp_dir.path().join("merged.pdf"));

    let summary = Validator::new().validate_config(&config).await.unwrap();
    assert_eq!(summary.files_validated, 1);
    assert_eq!(summary.files_failed, 1);
}

#[tokio::test]
async fn test_validation_no_clobber_existing_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "a.pdf", 1);
    let output = create_pdf(temp_dir.path(), "existing.pdf", 1);

    let mut config = config(Operation::Merge(merge_options(vec![input])), output);
    config.overwrite_mode = OverwriteMode::NoClobber;

    let result = Validator::new().validate_config(&config).await;
    assert!(matches!(result, Err(PdfToolsError::OutputExists { .. })));
}

#[tokio::test]
async fn test_validation_missing_merge_input_fails_when_continuing() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        create_pdf(temp_dir.path(), "a.pdf", 1),
        temp_dir.path().join("missing.pdf"),
    ];

    let mut options = merge_options(inputs);
    options.continue_on_error = true;
    let config = config(Operation::Merge(options), temp_dir.path().join("merged.pdf"));

    let result = Validator::new().validate_config(&config).await;
    assert!(matches!(result, Err(PdfToolsError::FileNotFound { .. })));
}
