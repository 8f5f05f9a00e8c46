//! Core PDF merging implementation.
//!
//! The first document is kept as the base. Every following document is
//! renumbered above the base's highest object id, its objects are moved
//! across, and its pages are hung under the base's root `Pages` node.

use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::compress::{CompressionStatistics, Compressor};
use crate::config::MergeOptions;
use crate::error::{PdfToolsError, Result};
use crate::io::{LoadedPdf, PdfReader};
use crate::merge::bookmarks::{BookmarkManager, BookmarkTarget};
use crate::merge::metadata::MetadataManager;
use crate::task::run_blocking;
use crate::utils::{format_file_size, serialize_seconds};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStatistics {
    /// Number of PDFs successfully merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge, loading included.
    #[serde(serialize_with = "serialize_seconds")]
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    #[serde(serialize_with = "serialize_seconds")]
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,

    /// Number of bookmarks added.
    pub bookmarks_added: usize,

    /// Compression applied to the merged document.
    pub compression: CompressionStatistics,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// An input left out because it could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in page order.
    pub merged_files: Vec<PathBuf>,

    /// Inputs skipped under `continue_on_error`.
    pub skipped: Vec<SkippedFile>,
}

/// Everything the blocking half of a merge produces.
struct Combined {
    document: Document,
    bookmarks_added: usize,
    compression: CompressionStatistics,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    bookmark_manager: BookmarkManager,
    metadata_manager: MetadataManager,
    compressor: Compressor,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every input and merge them into one document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input cannot be loaded and `continue_on_error` is off
    /// - No input could be loaded at all
    /// - The page tree of the base document is malformed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftools::merge::Merger;
    /// # use pdftools::config::MergeOptions;
    /// # async fn example(options: MergeOptions) -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let result = merger.merge(&options).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, options: &MergeOptions) -> Result<MergeResult> {
        let merge_start = Instant::now();

        let (load_results, load_stats) = self
            .reader
            .load_all(&options.inputs, options.effective_jobs())
            .await;

        let mut loaded_pdfs = Vec::with_capacity(load_results.len());
        let mut skipped = Vec::new();
        for (path, result) in options.inputs.iter().zip(load_results) {
            match result {
                Ok(loaded) => loaded_pdfs.push(loaded),
                Err(e) if options.continue_on_error && e.is_recoverable() => {
                    warn!("Skipping {}: {e}", path.display());
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if loaded_pdfs.is_empty() {
            return Err(PdfToolsError::NoFilesToMerge);
        }

        let input_size = loaded_pdfs.iter().map(|p| p.file_size).sum();
        let merged_files: Vec<PathBuf> = loaded_pdfs.iter().map(|p| p.path.clone()).collect();

        let merger = self.clone();
        let options = options.clone();
        let combined = run_blocking(move || merger.merge_documents(loaded_pdfs, &options)).await?;

        let statistics = MergeStatistics {
            files_merged: merged_files.len(),
            total_pages: combined.document.get_pages().len(),
            merge_time: merge_start.elapsed(),
            load_time: load_stats.total_time,
            input_size,
            bookmarks_added: combined.bookmarks_added,
            compression: combined.compression,
        };

        Ok(MergeResult {
            document: combined.document,
            statistics,
            merged_files,
            skipped,
        })
    }

    /// Merge loaded PDF documents on the current thread.
    fn merge_documents(&self, loaded_pdfs: Vec<LoadedPdf>, options: &MergeOptions) -> Result<Combined> {
        let mut inputs = loaded_pdfs.into_iter();
        let Some(base) = inputs.next() else {
            return Err(PdfToolsError::NoFilesToMerge);
        };

        let mut merged = base.document;
        let root_pages_id = root_pages_id(&merged)?;

        let mut targets = Vec::new();
        if let Some(&first_page) = merged.get_pages().values().next() {
            targets.push(BookmarkTarget::for_file(&base.path, first_page));
        }

        for loaded in inputs {
            let first_page = append_document(&mut merged, loaded.document, root_pages_id)?;
            debug!("Appended {} ({} pages)", loaded.path.display(), loaded.page_count);

            if let Some(first_page) = first_page {
                targets.push(BookmarkTarget::for_file(&loaded.path, first_page));
            }
        }

        let bookmarks_added = if options.bookmarks {
            self.bookmark_manager.add_bookmarks(&mut merged, &targets)?
        } else {
            0
        };

        self.metadata_manager
            .set_metadata(&mut merged, &options.metadata)?;
        self.metadata_manager.stamp_producer(&mut merged)?;

        let compression = self.compressor.apply(&mut merged, options.compression);

        Ok(Combined {
            document: merged,
            bookmarks_added,
            compression,
        })
    }
}

/// Id of the root `Pages` node referenced by the catalog.
fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfToolsError::merge_failed(format!("Failed to get pages reference: {e}")))
}

/// Move every page of `doc` into `merged`, below `root_pages_id`.
///
/// Returns the id of the first appended page, if `doc` had any.
fn append_document(
    merged: &mut Document,
    mut doc: Document,
    root_pages_id: ObjectId,
) -> Result<Option<ObjectId>> {
    doc.renumber_objects_with(merged.max_id + 1);

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for &page_id in &page_ids {
        let inherited = inherited_attributes(&doc, page_id);
        let page = doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| PdfToolsError::merge_failed(format!("Invalid page object: {e}")))?;

        for (key, value) in inherited {
            page.set(key, value);
        }
        page.set("Parent", Object::Reference(root_pages_id));
    }

    // The catalog and page tree nodes are replaced by the base document's own.
    let structural: HashSet<ObjectId> = doc
        .objects
        .iter()
        .filter(|(_, object)| is_structural(object))
        .map(|(&id, _)| id)
        .collect();

    merged.max_id = merged.max_id.max(doc.max_id);
    merged.objects.extend(
        doc.objects
            .into_iter()
            .filter(|(id, _)| !structural.contains(id)),
    );

    add_pages_to_tree(merged, root_pages_id, &page_ids)?;

    Ok(page_ids.first().copied())
}

/// Attributes `page_id` inherits from its ancestors and lacks itself.
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .into_iter()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();

    let mut parent = parent_of(page);
    for _ in 0..MAX_TREE_DEPTH {
        if missing.is_empty() {
            break;
        }
        let Some(node) = parent.and_then(|id| doc.get_dictionary(id).ok()) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = parent_of(node);
    }

    found
}

fn parent_of(node: &Dictionary) -> Option<ObjectId> {
    node.get(b"Parent").and_then(Object::as_reference).ok()
}

fn is_structural(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .map(|name| name == b"Catalog" || name == b"Pages")
        .unwrap_or(false)
}

/// Append page references to the root `Pages` node and update its `Count`.
fn add_pages_to_tree(merged: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
    let pages = merged
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfToolsError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let kids = pages
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|_| PdfToolsError::merge_failed("Pages dictionary missing Kids array"))?;
    kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", Object::Integer(current_count + page_ids.len() as i64));

    Ok(())
}
