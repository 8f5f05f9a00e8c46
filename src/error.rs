//! Error types for pdftools.
//!
//! Every operation (merge, compress, encrypt, decrypt) reports failures
//! through [`PdfToolsError`]. Messages are meant to be shown to the user
//! as-is, so variants carry the offending path and, where it helps, a hint
//! about how to fix the problem.
//!
//! # Error Categories
//!
//! - **I/O Errors**: File not found, permission denied, etc.
//! - **PDF Errors**: Invalid PDF structure, wrong encryption state
//! - **Validation Errors**: Invalid arguments or configuration
//! - **Operation Errors**: Problems while merging, compressing or encrypting

use std::io;
use std::path::PathBuf;

/// Result type alias for pdftools operations.
pub type Result<T> = std::result::Result<T, PdfToolsError>;

/// Main error type for pdftools operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfToolsError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile { path: PathBuf },

    /// lopdf could not parse the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf { path: PathBuf, reason: String },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf { path: PathBuf, details: String },

    /// Input is encrypted and the operation needs a plain document.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt it first with 'pdftools decrypt'",
        .path.display()
    )]
    EncryptedPdf { path: PathBuf },

    /// Encrypt was asked to lock a document that is already locked.
    #[error("The selected PDF is already encrypted: {}", .path.display())]
    AlreadyEncrypted { path: PathBuf },

    /// Decrypt was asked to unlock a plain document.
    #[error("The selected PDF is not encrypted: {}", .path.display())]
    NotEncrypted { path: PathBuf },

    /// The supplied password does not open the document.
    #[error("Incorrect password for: {}", .path.display())]
    IncorrectPassword { path: PathBuf },

    /// No files were provided (or survived loading) for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists { path: PathBuf },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input list file contains an invalid entry.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        .path.display()
    )]
    InvalidInputList {
        path: PathBuf,
        line_number: usize,
        details: String,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed { reason: String },

    /// Building or applying the encryption filter failed.
    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Bookmark operation failed.
    #[error("Failed to process bookmarks: {reason}")]
    BookmarkFailed { reason: String },

    /// Metadata operation failed.
    #[error("Failed to set metadata: {reason}")]
    MetadataFailed { reason: String },

    /// Settings file could not be read or parsed.
    #[error("Failed to load settings: {}\n  Reason: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    /// The platform launcher could not open the output.
    #[error("Cannot open file: {}\n  Reason: {reason}", .path.display())]
    FailedToOpen { path: PathBuf, reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other { message: String },
}

impl From<lopdf::Error> for PdfToolsError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfToolsError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfToolsError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    pub fn already_encrypted(path: PathBuf) -> Self {
        Self::AlreadyEncrypted { path }
    }

    pub fn not_encrypted(path: PathBuf) -> Self {
        Self::NotEncrypted { path }
    }

    pub fn incorrect_password(path: PathBuf) -> Self {
        Self::IncorrectPassword { path }
    }

    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    pub fn encryption_failed(reason: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            reason: reason.into(),
        }
    }

    pub fn failed_to_open(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToOpen {
            path,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (operation can continue).
    ///
    /// Returns true for per-file errors that `--continue-on-error` may skip
    /// while merging.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::BookmarkFailed { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::AlreadyEncrypted { .. } => 3,
            Self::NotEncrypted { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::EncryptionFailed { .. } => 6,
            Self::BookmarkFailed { .. } => 6,
            Self::MetadataFailed { .. } => 6,
            Self::IncorrectPassword { .. } => 7,
            Self::NoFilesToMerge => 1,
            Self::InvalidInputList { .. } => 1,
            Self::InvalidSettings { .. } => 1,
            Self::FailedToOpen { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // SIGINT convention
            Self::Other { .. } => 1,
        }
    }
}
