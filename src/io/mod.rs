//! I/O operations for pdftools.
//!
//! This module handles all file I/O operations including:
//! - Loading PDF documents from disk
//! - Writing finished PDFs to disk
//! - Parallel PDF loading for merges
//!
//! lopdf is synchronous, so both directions run their work on Tokio's
//! blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::io::{PdfReader, PdfWriter};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&PathBuf::from("input.pdf")).await?;
//!
//! let writer = PdfWriter::new();
//! writer.save(loaded.document, &PathBuf::from("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader, is_encrypted, parse_document};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
