//! Output formatting and display for pdftools.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The loading animation shown while an operation runs
//! - Validation, dry-run and result reports
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::output::OutputFormatter;
//! use pdftools::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting operation");
//! formatter.success("Operation completed successfully");
//! # }
//! ```

pub mod animation;
pub mod formatter;

pub use animation::{FRAME_INTERVAL, LoadingAnimation};
pub use formatter::{MessageLevel, OutputFormatter};

use std::path::Path;

use crate::compress::EFFECTIVENESS_NOTE;
use crate::config::{Config, Operation};
use crate::ops::Outcome;
use crate::utils::format_megabytes;
use crate::validation::{ValidationResult, ValidationSummary};

/// Display validation summary to the user.
///
/// In verbose mode every file is listed with its version, dimensions and
/// object count.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    if summary.files_failed > 0 {
        formatter.warning(&format!(
            "Warning: {} file(s) failed validation",
            summary.files_failed
        ));
    }

    formatter.info(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.files_validated,
        summary.total_pages,
        summary.format_total_size()
    ));

    if formatter.is_verbose() {
        for result in &summary.results {
            display_file_details(formatter, result);
        }
    }
}

fn display_file_details(formatter: &OutputFormatter, result: &ValidationResult) {
    formatter.section(&display_name(&result.path));
    formatter.detail("Pages", &result.page_count.to_string());
    if let Some(version) = result.format_version() {
        formatter.detail("Version", &version);
    }
    if let Some((width, height)) = result.page_dimensions {
        formatter.detail("Page size", &format!("{width:.0} x {height:.0} pt"));
    }
    formatter.detail("Objects", &result.object_count.to_string());
    formatter.detail("Encrypted", if result.is_encrypted { "Yes" } else { "No" });
}

/// List what the operation would read and write, for dry runs.
///
/// Every input is listed as `"1. name: 3 pages (0.50 MB)"`; merges add the
/// totals.
pub fn display_plan(formatter: &OutputFormatter, config: &Config, summary: &ValidationSummary) {
    formatter.section(&format!("Plan: {}", config.operation.name()));

    for (index, entry) in plan_entries(summary).iter().enumerate() {
        formatter.list_item(index + 1, entry);
    }

    for line in plan_totals(config, summary) {
        formatter.info(&line);
    }
}

/// One line per input file, with its page count and size.
pub fn plan_entries(summary: &ValidationSummary) -> Vec<String> {
    summary
        .results
        .iter()
        .map(|result| {
            let pages = match result.page_count {
                1 => "1 page".to_string(),
                n => format!("{n} pages"),
            };
            format!(
                "{}: {pages} ({})",
                display_name(&result.path),
                format_megabytes(result.file_size)
            )
        })
        .collect()
}

/// Totals and settings printed after the file list.
pub fn plan_totals(config: &Config, summary: &ValidationSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if let Operation::Merge(options) = &config.operation {
        lines.push(format!("Total size: {}", summary.format_total_megabytes()));
        lines.push(format!("Total pages: {}", summary.total_pages));
        lines.push(format!(
            "Bookmarks: {}, compression: {}",
            if options.bookmarks { "yes" } else { "no" },
            options.compression
        ));
    }

    lines.push(format!("Output would be: {}", config.output.display()));
    lines
}

/// Report a finished operation.
pub fn display_outcome(formatter: &OutputFormatter, outcome: &Outcome) {
    match outcome {
        Outcome::Merge(summary) => {
            formatter.success(&format!(
                "PDFs have been merged and saved to: {} ({})",
                summary.output.display(),
                summary.write.format_file_size()
            ));
            formatter.info(&format!(
                "Merged {} file(s) into {} pages in {:.2}s",
                summary.statistics.files_merged,
                summary.statistics.total_pages,
                summary.statistics.merge_time.as_secs_f64()
            ));

            if formatter.is_verbose() {
                let stats = &summary.statistics;
                formatter.section("Statistics");
                formatter.detail("Input size", &stats.format_input_size());
                formatter.detail("Output size", &summary.write.format_file_size());
                formatter.detail("Load time", &format!("{:.2}s", stats.load_time.as_secs_f64()));
                formatter.detail(
                    "Write time",
                    &format!("{:.2}s", summary.write.write_time.as_secs_f64()),
                );
                formatter.detail("Bookmarks", &stats.bookmarks_added.to_string());
                formatter.detail("Skipped files", &summary.skipped.len().to_string());
                formatter.detail("Compression", &stats.compression.level.to_string());
            }
        }
        Outcome::Compress(report) => {
            formatter.success(&format!(
                "PDF has been compressed and saved to: {}",
                report.output.display()
            ));
            for line in report.summary_lines() {
                formatter.info(&line);
            }
            formatter.info(&format!("Note: {EFFECTIVENESS_NOTE}"));

            if formatter.is_verbose() {
                let stats = &report.statistics;
                formatter.section("Statistics");
                formatter.detail("Level", &stats.level.to_string());
                formatter.detail("Streams compressed", &stats.streams_compressed.to_string());
                formatter.detail("Objects before", &stats.objects_before.to_string());
                formatter.detail("Objects after", &stats.objects_after.to_string());
                formatter.detail("Objects pruned", &stats.objects_pruned.to_string());
            }
        }
        Outcome::Encrypt(summary) => {
            formatter.success(&format!(
                "PDF has been encrypted and saved as: {}",
                summary.output.display()
            ));
            formatter.detail("Pages", &summary.page_count.to_string());
            formatter.detail("Key length", &format!("{} bits", summary.key_length.bits()));
            formatter.detail(
                "Owner password",
                if summary.separate_owner_password {
                    "separate"
                } else {
                    "same as user password"
                },
            );
        }
        Outcome::Decrypt(summary) => {
            formatter.success(&format!(
                "PDF has been decrypted and saved as: {}",
                summary.output.display()
            ));
            formatter.detail("Pages", &summary.page_count.to_string());
        }
    }
}

/// File name for display, falling back to the whole path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
