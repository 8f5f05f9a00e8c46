//! PDF merging operations.
//!
//! This module provides the core PDF merging functionality with:
//! - Document concatenation in input order
//! - One bookmark per merged file
//! - Metadata management
//! - Optional compression of the result
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::config::{CompressionLevel, MergeOptions, Metadata};
//! use pdftools::merge::Merger;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = MergeOptions {
//!     inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
//!     bookmarks: true,
//!     compression: CompressionLevel::Standard,
//!     metadata: Metadata::default(),
//!     continue_on_error: false,
//!     jobs: None,
//! };
//!
//! let merger = Merger::new();
//! let result = merger.merge(&options).await?;
//! println!("Merged {} pages", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod bookmarks;
pub mod merger;
pub mod metadata;

pub use bookmarks::{BookmarkManager, BookmarkTarget};
pub use merger::{MergeResult, MergeStatistics, Merger, SkippedFile};
pub use metadata::MetadataManager;

use crate::config::MergeOptions;
use crate::error::Result;
use lopdf::Document;

/// Merge multiple PDF files.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if any merge step fails.
pub async fn merge_pdfs(options: &MergeOptions) -> Result<(Document, MergeStatistics)> {
    let merger = Merger::new();
    let result = merger.merge(options).await?;
    Ok((result.document, result.statistics))
}
