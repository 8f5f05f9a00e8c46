//! PDF compression.
//!
//! Rewrites a document's streams with Flate compression and reports how
//! much smaller the written file became.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::compress::compress_file;
//! use pdftools::config::{CompressOptions, CompressionLevel};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = CompressOptions {
//!     input: PathBuf::from("scan.pdf"),
//!     level: CompressionLevel::Maximum,
//! };
//! let compressed = compress_file(&options).await?;
//! println!("{} streams compressed", compressed.statistics.streams_compressed);
//! # Ok(())
//! # }
//! ```

pub mod compressor;
pub mod report;

pub use compressor::{CompressionStatistics, Compressor};
pub use report::{CompressionReport, EFFECTIVENESS_NOTE, reduction_percent};

use lopdf::Document;

use crate::config::CompressOptions;
use crate::error::Result;
use crate::io::PdfReader;
use crate::task::run_blocking;

/// A compressed document that has not been written yet.
#[derive(Debug)]
pub struct CompressedPdf {
    pub document: Document,
    pub statistics: CompressionStatistics,

    /// Size of the input file in bytes.
    pub original_size: u64,

    pub page_count: usize,
}

/// Load `options.input` and compress it in memory.
///
/// # Errors
///
/// Fails if the input cannot be loaded or is encrypted.
pub async fn compress_file(options: &CompressOptions) -> Result<CompressedPdf> {
    let loaded = PdfReader::new().load(&options.input).await?;
    let level = options.level;
    let original_size = loaded.file_size;
    let page_count = loaded.page_count;
    let mut document = loaded.document;

    let (document, statistics) = run_blocking(move || {
        let statistics = Compressor::new().apply(&mut document, level);
        Ok((document, statistics))
    })
    .await?;

    Ok(CompressedPdf {
        document,
        statistics,
        original_size,
        page_count,
    })
}
