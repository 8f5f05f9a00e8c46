//! pdftools - Merge, compress, encrypt and decrypt PDF files.
//!
//! This library provides the operations behind the `pdftools` command:
//!
//! - Merging several PDFs in order, with optional bookmarks and metadata
//! - Compressing content streams and pruning unused objects
//! - Password protection with the standard security handler
//! - Password removal
//!
//! Every operation loads and transforms documents on Tokio's blocking
//! pool, so callers stay responsive while work is in progress.
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdftools::merge;
//! use pdftools::config::{CompressionLevel, MergeOptions, Metadata};
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
//! let (document, stats) = merge::merge_pdfs(&options).await?;
//! println!("Created {} page document", stats.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Running a Configured Operation
//!
//! ```no_run
//! use pdftools::config::{CompressOptions, CompressionLevel, Config, OpenMode, Operation, OverwriteMode};
//! use pdftools::ops::{Outcome, execute};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     operation: Operation::Compress(CompressOptions {
//!         input: PathBuf::from("scan.pdf"),
//!         level: CompressionLevel::Maximum,
//!     }),
//!     output: PathBuf::from("scan-small.pdf"),
//!     dry_run: false,
//!     verbose: false,
//!     quiet: true,
//!     overwrite_mode: OverwriteMode::Force,
//!     open_mode: OpenMode::Never,
//!     json: false,
//! };
//!
//! if let Outcome::Compress(report) = execute(config).await? {
//!     println!("Saved {:.2}%", report.reduction_percent);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod cli;
pub mod compress;
pub mod config;
pub mod encrypt;
pub mod error;
pub mod io;
pub mod launcher;
pub mod merge;
pub mod ops;
pub mod output;
pub mod settings;
pub mod task;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfToolsError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
