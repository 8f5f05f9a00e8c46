//! Integration tests for password protection and removal.

use lopdf::Document;
use pdftools::config::{DecryptOptions, EncryptOptions, KeyLength, Operation};
use pdftools::encrypt::{decrypt_file, encrypt_file};
use pdftools::error::PdfToolsError;
use pdftools::io::{PdfReader, is_encrypted};
use pdftools::ops::{Outcome, execute};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{config, create_encrypted_pdf, create_pdf, page_labels};

fn encrypt_operation(input: std::path::PathBuf, password: &str, key_length: KeyLength) -> Operation {
    Operation::Encrypt(EncryptOptions {
        input,
        user_password: password.to_string(),
        owner_password: None,
        key_length,
    })
}

#[rstest]
#[case(KeyLength::Bits40)]
#[case(KeyLength::Bits128)]
#[tokio::test]
async fn test_encrypt_then_decrypt_restores_document(#[case] key_length: KeyLength) {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "plain.pdf", 3);
    let locked = temp_dir.path().join("locked.pdf");
    let unlocked = temp_dir.path().join("unlocked.pdf");

    let outcome = execute(config(
        encrypt_operation(input.clone(), "open sesame", key_length),
        locked.clone(),
    ))
    .await
    .unwrap();
    let Outcome::Encrypt(summary) = outcome else {
        panic!("expected encrypt outcome");
    };
    assert_eq!(summary.page_count, 3);
    assert_eq!(summary.key_length, key_length);
    assert!(!summary.separate_owner_password);

    let loaded = PdfReader::allowing_encrypted().load(&locked).await.unwrap();
    assert!(loaded.encrypted);

    execute(config(
        Operation::Decrypt(DecryptOptions {
            input: locked,
            password: "open sesame".to_string(),
        }),
        unlocked.clone(),
    ))
    .await
    .unwrap();

    let restored = Document::load(&unlocked).unwrap();
    assert!(!is_encrypted(&restored));
    assert_eq!(
        page_labels(&restored),
        page_labels(&Document::load(&input).unwrap())
    );
}

#[tokio::test]
async fn test_encrypted_output_needs_password() {
    let temp_dir = TempDir::new().unwrap();
    let locked = create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret");

    let result = PdfReader::new().load(&locked).await;
    assert!(matches!(result, Err(PdfToolsError::EncryptedPdf { .. })));
}

#[tokio::test]
async fn test_encrypt_already_encrypted() {
    let temp_dir = TempDir::new().unwrap();
    let locked = create_encrypted_pdf(temp_dir.path(), "locked.pdf", 1, "secret");

    let result = encrypt_file(&EncryptOptions {
        input: locked,
        user_password: "another".to_string(),
        owner_password: None,
        key_length: KeyLength::Bits128,
    })
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfToolsError::AlreadyEncrypted { .. }));
    assert!(err.to_string().contains("already encrypted"));
}

#[tokio::test]
async fn test_decrypt_wrong_password() {
    let temp_dir = TempDir::new().unwrap();
    let locked = create_encrypted_pdf(temp_dir.path(), "locked.pdf", 2, "secret");

    let result = decrypt_file(&DecryptOptions {
        input: locked,
        password: "guess".to_string(),
    })
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, PdfToolsError::IncorrectPassword { .. }));
    assert_eq!(err.exit_code(), 7);
}

#[tokio::test]
async fn test_decrypt_plain_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "plain.pdf", 1);

    let result = decrypt_file(&DecryptOptions {
        input,
        password: "secret".to_string(),
    })
    .await;

    assert!(matches!(result, Err(PdfToolsError::NotEncrypted { .. })));
}

#[tokio::test]
async fn test_separate_owner_password() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_pdf(temp_dir.path(), "plain.pdf", 1);
    let locked = temp_dir.path().join("locked.pdf");

    let outcome = execute(config(
        Operation::Encrypt(EncryptOptions {
            input,
            user_password: "reader".to_string(),
            owner_password: Some("author".to_string()),
            key_length: KeyLength::Bits128,
        }),
        locked.clone(),
    ))
    .await
    .unwrap();

    let Outcome::Encrypt(summary) = outcome else {
        panic!("expected encrypt outcome");
    };
    assert!(summary.separate_owner_password);

    let unlocked = decrypt_file(&DecryptOptions {
        input: locked,
        password: "reader".to_string(),
    })
    .await
    .unwrap();
    assert_eq!(unlocked.page_count, 1);
}
