//! Bookmark (outline) management for merged PDFs.
//!
//! A merge can add one top-level outline entry per source file, pointing
//! at the first page that file contributed.

use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

use crate::error::{PdfToolsError, Result};
use crate::utils::pdf_text_string;

/// One outline entry: a title and the page it jumps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTarget {
    pub title: String,
    pub page_id: ObjectId,
}

impl BookmarkTarget {
    /// Bookmark titled after a source file's name.
    pub fn for_file(path: &Path, page_id: ObjectId) -> Self {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());

        Self { title, page_id }
    }
}

/// Manager for PDF bookmarks (outlines).
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkManager;

impl BookmarkManager {
    pub fn new() -> Self {
        Self
    }

    /// Replace the document outline with one entry per target.
    ///
    /// Returns the number of bookmarks written.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no catalog.
    pub fn add_bookmarks(&self, doc: &mut Document, targets: &[BookmarkTarget]) -> Result<usize> {
        if targets.is_empty() {
            return Ok(0);
        }

        let outline_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = targets.iter().map(|_| doc.new_object_id()).collect();

        for (idx, (target, &item_id)) in targets.iter().zip(&item_ids).enumerate() {
            let dest = vec![
                Object::Reference(target.page_id),
                Object::Name(b"XYZ".to_vec()),
                Object::Null,
                Object::Null,
                Object::Null,
            ];

            let mut item = Dictionary::new();
            item.set("Title", pdf_text_string(&target.title));
            item.set("Parent", Object::Reference(outline_id));
            item.set("Dest", Object::Array(dest));

            if idx > 0 {
                item.set("Prev", Object::Reference(item_ids[idx - 1]));
            }
            if let Some(&next) = item_ids.get(idx + 1) {
                item.set("Next", Object::Reference(next));
            }

            doc.objects.insert(item_id, Object::Dictionary(item));
        }

        let mut outline = Dictionary::new();
        outline.set("Type", Object::Name(b"Outlines".to_vec()));
        outline.set("Count", Object::Integer(item_ids.len() as i64));
        if let (Some(&first), Some(&last)) = (item_ids.first(), item_ids.last()) {
            outline.set("First", Object::Reference(first));
            outline.set("Last", Object::Reference(last));
        }
        doc.objects.insert(outline_id, Object::Dictionary(outline));

        let catalog = doc
            .catalog_mut()
            .map_err(|e| PdfToolsError::BookmarkFailed {
                reason: format!("Failed to get catalog: {e}"),
            })?;
        catalog.set("Outlines", Object::Reference(outline_id));
        catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

        debug!("Added {} bookmark(s)", item_ids.len());
        Ok(item_ids.len())
    }

    /// Check if a document has bookmarks.
    pub fn has_bookmarks(&self, doc: &Document) -> bool {
        doc.catalog().map(|c| c.has(b"Outlines")).unwrap_or(false)
    }
}
