//! Before/after size report for a compressed file.

use serde::Serialize;
use std::path::PathBuf;

use crate::compress::compressor::CompressionStatistics;
use crate::utils::{format_file_size, format_megabytes};

/// Shown with every compression result.
pub const EFFECTIVENESS_NOTE: &str =
    "Compression effectiveness varies depending on the PDF content.";

/// Size comparison between the input and the written output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Input size in bytes.
    pub original_size: u64,

    /// Output size in bytes, as written to disk.
    pub compressed_size: u64,

    /// Size reduction in percent; negative when the output grew.
    pub reduction_percent: f64,

    pub page_count: usize,

    pub statistics: CompressionStatistics,
}

impl CompressionReport {
    pub fn new(
        input: PathBuf,
        output: PathBuf,
        original_size: u64,
        compressed_size: u64,
        page_count: usize,
        statistics: CompressionStatistics,
    ) -> Self {
        Self {
            input,
            output,
            original_size,
            compressed_size,
            reduction_percent: reduction_percent(original_size, compressed_size),
            page_count,
            statistics,
        }
    }

    /// Lines of the human-readable summary.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Original Size: {} ({})",
                format_megabytes(self.original_size),
                format_file_size(self.original_size)
            ),
            format!(
                "Compressed Size: {} ({})",
                format_megabytes(self.compressed_size),
                format_file_size(self.compressed_size)
            ),
            format!("Compression: {:.2}%", self.reduction_percent),
        ]
    }
}

/// Percentage by which `compressed` is smaller than `original`.
///
/// Zero when the original is empty.
pub fn reduction_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }

    (original as f64 - compressed as f64) / original as f64 * 100.0
}
