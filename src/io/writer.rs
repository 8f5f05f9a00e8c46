//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Creation of missing output directories
//! - Write statistics
//!
//! The writer never rewrites the document it is given. Compression is
//! applied by the operations themselves, and an encrypted document must
//! reach disk exactly as it was encrypted.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_with_stats(doc, Path::new("output.pdf")).await?;
//! println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use log::debug;
use lopdf::Document;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfToolsError, Result};
use crate::utils::{format_file_size, serialize_seconds};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Create missing parent directories of the output path.
    pub create_dirs: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            create_dirs: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteStatistics {
    /// Time taken to write the file.
    #[serde(serialize_with = "serialize_seconds")]
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF on the blocking pool and return statistics about the write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory cannot be created
    /// - The file cannot be created (permissions, disk full)
    /// - Serialization fails
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let writer = self.clone();
        let path = path.to_path_buf();

        task::spawn_blocking(move || writer.save_blocking(doc, &path))
            .await
            .map_err(|e| PdfToolsError::other(format!("Write task failed: {e}")))?
    }

    /// Save a PDF on the current thread.
    pub fn save_blocking(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.create_dirs
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfToolsError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let write_path = if self.options.atomic {
            temp_path_for(path)
        } else {
            path.to_path_buf()
        };

        let result = self.write_document(&mut doc, &write_path);
        if let Err(err) = result {
            if self.options.atomic {
                let _ = std::fs::remove_file(&write_path);
            }
            return Err(err);
        }

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                PdfToolsError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
        };

        debug!(
            "Wrote {} ({}) in {:?}",
            path.display(),
            stats.format_file_size(),
            stats.write_time
        );

        Ok(stats)
    }

    fn write_document(&self, doc: &mut Document, write_path: &Path) -> Result<()> {
        let file = std::fs::File::create(write_path).map_err(|e| {
            PdfToolsError::FailedToCreateOutput {
                path: write_path.to_path_buf(),
                source: e,
            }
        })?;

        let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

        doc.save_to(&mut writer)
            .map_err(|e| PdfToolsError::FailedToWrite {
                path: write_path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| PdfToolsError::FailedToWrite {
            path: write_path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

/// Sibling temp file used for atomic writes, e.g. `out.pdf` -> `out.pdf.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
