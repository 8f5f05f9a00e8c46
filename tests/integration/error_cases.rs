//! Integration tests for error handling and edge cases.

use pdftools::config::{CompressOptions, CompressionLevel, EncryptOptions, KeyLength, Operation};
use pdftools::error::PdfToolsError;
use pdftools::merge::merge_pdfs;
use pdftools::ops::execute;
use pdftools::settings::Settings;
use pdftools::validation::Validator;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{config, create_encrypted_pdf, create_pdf, merge_options};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let result = merge_pdfs(&merge_options(vec![PathBuf::from("/nonexistent/file.pdf")])).await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfToolsError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_missing_file_not_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let mut options = merge_options(vec![
        create_pdf(temp_dir.path(), "a.pdf", 1),
        temp_dir.path().join("missing.pdf"),
    ]);
    options.continue_on_error = true;

    let result = merge_pdfs(&options).await;
    assert!(matches!(result, Err(PdfToolsError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_error_invalid_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.pdf");
    fs::write(&bogus, b"this is not a pdf").unwrap();

    let result = Validator::new().validate_file(&bogus).await;
    assert!(matches!(result, Err(PdfToolsError::FailedToLoadPdf { .. })));
}

#[tokio::test]
async fn test_error_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty.pdf");
    fs::write(&empty, b"").unwrap();

    let result = Validator::new().validate_file(&empty).await;
    assert!(matches!(result, Err(PdfToolsError::CorruptedPdf { .. })));
}

#[tokio::test]
async fn test_continue_on_error_skips_corrupt_input() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.pdf");
    fs::write(&bogus, b"%PDF-1.4 garbage").unwrap();

    let mut options = merge_options(vec![
        create_pdf(temp_dir.path(), "good.pdf", 2),
        bogus,
    ]);
    options.continue_on_error = true;

    let (document, stats) = merge_pdfs(&options).await.unwrap();
    assert_eq!(stats.files_merged, 1);
    assert_eq!(document.get_pages().len(), 2);
}

#[tokio::test]
async fn test_compress_encrypted_input() {
    let temp_dir = TempDir::new().unwrap();
    let locked = create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret");
    let output = temp_dir.path().join("out.pdf");

    let result = execute(config(
        Operation::Compress(CompressOptions {
            input: locked,
            level: CompressionLevel::Standard,
        }),
        output.clone(),
    ))
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfToolsError::EncryptedPdf { .. }));
    assert!(err.to_string().contains("pdftools decrypt"));
    assert!(!output.exists());
}

#[test]
fn test_empty_password_is_a_config_error() {
    let config = config(
        Operation::Encrypt(EncryptOptions {
            input: PathBuf::from("in.pdf"),
            user_password: String::new(),
            owner_password: None,
            key_length: KeyLength::Bits128,
        }),
        PathBuf::from("out.pdf"),
    );

    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_output_in_missing_directory_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "a.pdf", 1);
    let config = config(
        Operation::Merge(merge_options(vec![input])),
        temp_dir.path().join("missing").join("out.pdf"),
    );

    let result = Validator::new().validate_output(&config).await;
    assert!(matches!(result, Err(PdfToolsError::InvalidConfig { .. })));
}

#[test]
fn test_settings_reject_unknown_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "colour = \"blue\"\n").unwrap();

    let result = Settings::load(Some(path.as_path()));
    assert!(matches!(result, Err(PdfToolsError::InvalidSettings { .. })));
}

#[test]
fn test_settings_missing_explicit_file() {
    let result = Settings::load(Some(Path::new("/nonexistent/config.toml")));
    assert!(matches!(result, Err(PdfToolsError::FileNotFound { .. })));
}
