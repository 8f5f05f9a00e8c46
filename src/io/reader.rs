//! PDF reading and loading operations.
//!
//! This module provides PDF loading with support for:
//! - Sequential and parallel loading
//! - Detection of password-protected documents
//! - Detailed load statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! # Ok(())
//! # }
//! ```

use log::debug;
use lopdf::xref::XrefEntry;
use lopdf::{Document, Object, ObjectId, Reader};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfToolsError, Result};
use crate::utils::format_file_size;

/// Whether a document carries (or carried, before lopdf unlocked it) an
/// encryption dictionary.
///
/// lopdf transparently decrypts files whose user password is empty and
/// records that in `encryption_state`, so both places are checked.
pub fn is_encrypted(doc: &Document) -> bool {
    doc.is_encrypted() || doc.encryption_state.is_some()
}

/// Parse a PDF from memory, keeping every object of a locked file.
///
/// lopdf unlocks files whose user password is empty while parsing. For any
/// other protected file it only parses the encryption dictionary, so the
/// remaining objects are read here still encrypted. Once the password is
/// known, [`Document::decrypt`] turns them into plain objects.
pub fn parse_document(buffer: &[u8]) -> lopdf::Result<Document> {
    let document = Document::load_mem(buffer)?;
    if !document.is_encrypted() || document.encryption_state.is_some() {
        return Ok(document);
    }

    let ids: Vec<ObjectId> = document
        .reference_table
        .entries
        .iter()
        .filter_map(|(&number, entry)| match *entry {
            XrefEntry::Normal { generation, .. } => Some((number, generation)),
            _ => None,
        })
        .collect();

    let reader = Reader {
        buffer,
        document,
        encryption_state: None,
        raw_objects: BTreeMap::new(),
    };

    let locked: Vec<(ObjectId, Object)> = ids
        .into_iter()
        .filter_map(|id| match reader.get_object(id, &mut HashSet::new()) {
            Ok(object) => Some((id, object)),
            Err(e) => {
                debug!("Skipping unreadable object {} {}: {e}", id.0, id.1);
                None
            }
        })
        .collect();

    debug!("Read {} locked object(s)", locked.len());

    let mut document = reader.document;
    for (id, object) in locked {
        document.objects.entry(id).or_insert(object);
    }

    Ok(document)
}

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,

    /// Whether the file is password protected.
    pub encrypted: bool,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let encrypted = is_encrypted(&document);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
            encrypted,
        }
    }
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Average time per successful load.
    pub average_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let mut success_count = 0;
        let mut failure_count = 0;
        let mut total_size = 0;
        let mut total_pages = 0;
        let mut total_load_time = Duration::ZERO;

        for result in results {
            match result {
                Ok(loaded) => {
                    success_count += 1;
                    total_size += loaded.file_size;
                    total_pages += loaded.page_count;
                    total_load_time += loaded.load_time;
                }
                Err(_) => failure_count += 1,
            }
        }

        let average_time = if success_count > 0 {
            total_load_time / success_count as u32
        } else {
            Duration::ZERO
        };

        Self {
            success_count,
            failure_count,
            total_time,
            average_time,
            total_size,
            total_pages,
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Reject documents without pages.
    verify: bool,
    /// Hand back encrypted documents instead of failing with `EncryptedPdf`.
    allow_encrypted: bool,
}

impl PdfReader {
    /// Create a reader that only accepts plain, non-empty documents.
    pub fn new() -> Self {
        Self {
            verify: true,
            allow_encrypted: false,
        }
    }

    /// Create a reader for the encrypt and decrypt tools.
    ///
    /// Encrypted documents are returned as-is so the caller can decide what
    /// their encryption state means; the page check is skipped because a
    /// locked page tree may not be readable yet.
    pub fn allowing_encrypted() -> Self {
        Self {
            verify: false,
            allow_encrypted: true,
        }
    }

    /// Make sure `path` names an existing regular file.
    pub fn check_path_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let exists = path
            .try_exists()
            .map_err(|e| PdfToolsError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })?;

        if !exists {
            return Err(PdfToolsError::file_not_found(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(PdfToolsError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Load a single PDF document on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted (unless built with [`PdfReader::allowing_encrypted`])
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let reader = self.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || reader.load_blocking(&path))
            .await
            .map_err(|e| PdfToolsError::other(format!("Load task failed: {e}")))?
    }

    /// Load a single PDF document on the current thread.
    pub fn load_blocking(&self, path: &Path) -> Result<LoadedPdf> {
        Self::check_path_exists(path)?;

        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let buffer = std::fs::read(&path_buf).map_err(|e| PdfToolsError::FileNotAccessible {
            path: path_buf.clone(),
            source: e,
        })?;

        let document = parse_document(&buffer).map_err(|e| {
            let err_msg = e.to_string();
            let lowered = err_msg.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                PdfToolsError::encrypted_pdf(path_buf.clone())
            } else {
                PdfToolsError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if !self.allow_encrypted && is_encrypted(&document) {
            return Err(PdfToolsError::encrypted_pdf(path_buf));
        }

        if self.verify && document.get_pages().is_empty() {
            return Err(PdfToolsError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let loaded = LoadedPdf::new(document, path_buf, start.elapsed());
        debug!(
            "Loaded {} ({} pages, {}) in {:?}",
            loaded.path.display(),
            loaded.page_count,
            format_file_size(loaded.file_size),
            loaded.load_time
        );

        Ok(loaded)
    }

    /// Load multiple PDF documents one at a time, in order.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Load multiple PDF documents concurrently.
    ///
    /// At most `workers` files are parsed at once. Results come back in the
    /// same order as `paths`.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        use futures::stream::{self, StreamExt};

        let workers = workers.max(1);

        let tasks: Vec<_> = paths
            .iter()
            .map(|path| {
                let path = path.clone();
                let reader = self.clone();
                async move { reader.load(&path).await }
            })
            .collect();

        stream::iter(tasks).buffered(workers).collect().await
    }

    /// Load all PDFs, choosing sequential loading for small batches.
    ///
    /// Returns the per-file outcomes in input order together with aggregate
    /// statistics.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let stats = LoadStatistics::from_results(&results, start.elapsed());
        (results, stats)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
