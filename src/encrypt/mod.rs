//! Password protection.
//!
//! [`encrypt_file`] locks a plain PDF behind a user password and
//! [`decrypt_file`] removes the password again. Both return the document
//! in memory; writing it is left to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::{EncryptOptions, KeyLength};
//! use pdftools::encrypt::encrypt_file;
//! use pdftools::io::PdfWriter;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = EncryptOptions {
//!     input: PathBuf::from("report.pdf"),
//!     user_password: "secret".to_string(),
//!     owner_password: None,
//!     key_length: KeyLength::Bits128,
//! };
//! let locked = encrypt_file(&options).await?;
//! PdfWriter::new().save(locked.document, Path::new("locked.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod decryptor;
pub mod encryptor;

pub use decryptor::Decryptor;
pub use encryptor::{Encryptor, ensure_document_id};

use lopdf::Document;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{DecryptOptions, EncryptOptions, KeyLength};
use crate::error::{PdfToolsError, Result};
use crate::io::PdfReader;
use crate::task::run_blocking;

/// A document ready to be written, plus its page count.
#[derive(Debug)]
pub struct ProcessedPdf {
    pub document: Document,
    pub page_count: usize,
}

/// Outcome of an encryption, as reported to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub page_count: usize,
    pub key_length: KeyLength,

    /// Whether a distinct owner password was set.
    pub separate_owner_password: bool,

    /// Size of the written file in bytes.
    pub file_size: u64,
}

/// Outcome of a decryption, as reported to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub page_count: usize,

    /// Size of the written file in bytes.
    pub file_size: u64,
}

/// Load `options.input` and encrypt it in memory.
///
/// # Errors
///
/// - [`PdfToolsError::AlreadyEncrypted`] if the input already has a password
/// - Load errors for missing or unreadable input
pub async fn encrypt_file(options: &EncryptOptions) -> Result<ProcessedPdf> {
    let loaded = PdfReader::allowing_encrypted().load(&options.input).await?;
    if loaded.encrypted {
        return Err(PdfToolsError::already_encrypted(loaded.path));
    }

    let page_count = loaded.page_count;
    let mut document = loaded.document;
    let user_password = options.user_password.clone();
    let owner_password = options.effective_owner_password().to_string();
    let key_length = options.key_length;

    let document = run_blocking(move || {
        Encryptor::new().encrypt_document(&mut document, &user_password, &owner_password, key_length)?;
        Ok(document)
    })
    .await?;

    Ok(ProcessedPdf {
        document,
        page_count,
    })
}

/// Load `options.input` and remove its password in memory.
///
/// # Errors
///
/// - [`PdfToolsError::NotEncrypted`] if the input has no password
/// - [`PdfToolsError::IncorrectPassword`] if the password does not open it
pub async fn decrypt_file(options: &DecryptOptions) -> Result<ProcessedPdf> {
    let loaded = PdfReader::allowing_encrypted().load(&options.input).await?;
    if !loaded.encrypted {
        return Err(PdfToolsError::not_encrypted(loaded.path));
    }

    let path = loaded.path;
    let mut document = loaded.document;
    let password = options.password.clone();

    let document = run_blocking(move || {
        Decryptor::new().decrypt_document(&mut document, &password, &path)?;
        Ok(document)
    })
    .await?;

    Ok(ProcessedPdf {
        page_count: document.get_pages().len(),
        document,
    })
}
