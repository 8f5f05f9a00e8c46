//! Input validation for pdftools.
//!
//! This module validates PDF files and configuration before any operation
//! runs. It performs:
//! - File existence and accessibility checks
//! - PDF format validation
//! - Encryption detection, checked against what each operation expects
//! - Page count verification
//! - Output path validation
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};
use lopdf::{Document, Object};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{Config, Operation, OverwriteMode};
use crate::error::{PdfToolsError, Result};
use crate::io::PdfReader;
use crate::utils::{format_file_size, format_megabytes};

/// How far up the page tree to look for an inherited MediaBox.
const MAX_TREE_DEPTH: usize = 64;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Whether the PDF is password protected.
    pub is_encrypted: bool,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// Page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl ValidationResult {
    /// Create a validation result from a loaded PDF document.
    fn from_document(path: PathBuf, doc: &Document, file_size: u64) -> Self {
        let pages = doc.get_pages();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = pages
            .values()
            .next()
            .and_then(|&page_id| media_box(doc, page_id));

        Self {
            path,
            page_count: pages.len(),
            version,
            file_size,
            is_encrypted: crate::io::is_encrypted(doc),
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }

    /// Result for a locked file whose structure could not be read.
    fn locked(path: PathBuf, file_size: u64) -> Self {
        Self {
            path,
            page_count: 0,
            version: None,
            file_size,
            is_encrypted: true,
            object_count: 0,
            page_dimensions: None,
        }
    }

    /// Format the version as "1.7".
    pub fn format_version(&self) -> Option<String> {
        self.version.map(|(major, minor)| format!("{major}.{minor}"))
    }
}

/// Width and height of a page, following the page tree for inherited boxes.
fn media_box(doc: &Document, page_id: lopdf::ObjectId) -> Option<(f32, f32)> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(rect) = node.get(b"MediaBox").and_then(Object::as_array)
            && rect.len() >= 4
        {
            let width = rect[2].as_float().ok()? - rect[0].as_float().ok()?;
            let height = rect[3].as_float().ok()? - rect[1].as_float().ok()?;
            return Some((width.abs(), height.abs()));
        }

        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each file.
    pub results: Vec<ValidationResult>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,

    /// Number of files that passed validation.
    pub files_validated: usize,

    /// Number of files that failed validation.
    pub files_failed: usize,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();
        let files_validated = results.len();

        Self {
            results,
            total_pages,
            total_size,
            files_validated,
            files_failed: 0,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }

    /// Format the total file size in megabytes, e.g. "1.25 MB".
    pub fn format_total_megabytes(&self) -> String {
        format_megabytes(self.total_size)
    }
}

/// Validator for PDF files and configuration.
#[derive(Debug, Clone)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::allowing_encrypted(),
        }
    }

    /// Validate a single PDF file.
    ///
    /// Encrypted files pass with `is_encrypted` set; whether that is
    /// acceptable depends on the operation (see [`Validator::validate_inputs`]).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not accessible or is empty
    /// - File is not a valid PDF
    /// - An unencrypted PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        let file_size = Self::check_readable(path).await?;

        let loaded = self.reader.load(path).await?;
        if !loaded.encrypted && loaded.page_count == 0 {
            return Err(PdfToolsError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        Ok(ValidationResult::from_document(
            path.to_path_buf(),
            &loaded.document,
            file_size,
        ))
    }

    /// Existence, type and size checks; returns the file size.
    async fn check_readable(path: &Path) -> Result<u64> {
        PdfReader::check_path_exists(path)?;

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| PdfToolsError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(PdfToolsError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        Ok(metadata.len())
    }

    /// Validate multiple PDF files.
    ///
    /// # Errors
    ///
    /// Returns an error if any file fails validation and `continue_on_error`
    /// is false, if a failure is not one a merge would skip (such as a
    /// missing file), or if no file passes.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        continue_on_error: bool,
    ) -> Result<ValidationSummary> {
        let mut results = Vec::new();
        let mut failed_count = 0;

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => results.push(result),
                Err(e) if continue_on_error && e.is_recoverable() => {
                    warn!("Skipping {}: {e}", path.display());
                    failed_count += 1;
                }
                Err(e) => return Err(e),
            }
        }

        if results.is_empty() {
            return Err(PdfToolsError::NoFilesToMerge);
        }

        let mut summary = ValidationSummary::from_results(results);
        summary.files_failed = failed_count;

        Ok(summary)
    }

    /// Validate the inputs of the configured operation.
    ///
    /// - merge and compress need plain documents
    /// - encrypt refuses a document that is already encrypted
    /// - decrypt needs an encrypted document, but a locked file whose
    ///   structure cannot be read yet only has its path checked
    pub async fn validate_inputs(&self, config: &Config) -> Result<ValidationSummary> {
        match &config.operation {
            Operation::Merge(options) => {
                let mut summary = self
                    .validate_files(&options.inputs, options.continue_on_error)
                    .await?;

                let locked: Vec<PathBuf> = summary
                    .results
                    .iter()
                    .filter(|r| r.is_encrypted)
                    .map(|r| r.path.clone())
                    .collect();

                if let Some(first) = locked.first()
                    && !options.continue_on_error
                {
                    return Err(PdfToolsError::encrypted_pdf(first.clone()));
                }

                if !locked.is_empty() {
                    for path in &locked {
                        warn!("Skipping {}: file is encrypted", path.display());
                    }

                    let failed = summary.files_failed + locked.len();
                    let kept: Vec<_> = summary
                        .results
                        .into_iter()
                        .filter(|r| !r.is_encrypted)
                        .collect();
                    if kept.is_empty() {
                        return Err(PdfToolsError::NoFilesToMerge);
                    }

                    summary = ValidationSummary::from_results(kept);
                    summary.files_failed = failed;
                }

                Ok(summary)
            }
            Operation::Compress(options) => {
                let result = self.validate_file(&options.input).await?;
                if result.is_encrypted {
                    return Err(PdfToolsError::encrypted_pdf(result.path));
                }
                Ok(ValidationSummary::from_results(vec![result]))
            }
            Operation::Encrypt(options) => {
                let result = self.validate_file(&options.input).await?;
                if result.is_encrypted {
                    return Err(PdfToolsError::already_encrypted(result.path));
                }
                Ok(ValidationSummary::from_results(vec![result]))
            }
            Operation::Decrypt(options) => {
                let file_size = Self::check_readable(&options.input).await?;
                let result = match self.validate_file(&options.input).await {
                    Ok(result) => result,
                    Err(e) => {
                        debug!("Structure of {} not readable yet: {e}", options.input.display());
                        ValidationResult::locked(options.input.clone(), file_size)
                    }
                };
                if !result.is_encrypted {
                    return Err(PdfToolsError::not_encrypted(result.path));
                }
                Ok(ValidationSummary::from_results(vec![result]))
            }
        }
    }

    /// Validate the output path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and no-clobber is set
    /// - Output directory doesn't exist
    /// - Output directory is not writable
    pub async fn validate_output(&self, config: &Config) -> Result<()> {
        let output_path = &config.output;

        if output_path.exists() && config.overwrite_mode == OverwriteMode::NoClobber {
            return Err(PdfToolsError::output_exists(output_path.clone()));
        }

        let parent = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
            PdfToolsError::invalid_config(format!(
                "Output directory does not exist: {}",
                parent.display()
            ))
        })?;

        if !metadata.is_dir() {
            return Err(PdfToolsError::invalid_config(format!(
                "Output directory is not a directory: {}",
                parent.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfToolsError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Validate inputs and output of a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation check fails.
    pub async fn validate_config(&self, config: &Config) -> Result<ValidationSummary> {
        let summary = self.validate_inputs(config).await?;
        self.validate_output(config).await?;
        Ok(summary)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
