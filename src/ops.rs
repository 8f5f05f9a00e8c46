//! Running one configured operation end to end.
//!
//! [`execute`] loads the inputs, transforms them on the blocking pool and
//! writes the output, returning an [`Outcome`] for display. It does not
//! validate, prompt or open anything; the binary does that around it.

use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::compress::{CompressionReport, compress_file};
use crate::config::{Config, Operation};
use crate::encrypt::{DecryptionSummary, EncryptionSummary, decrypt_file, encrypt_file};
use crate::error::Result;
use crate::io::{PdfWriter, WriteStatistics};
use crate::merge::{MergeStatistics, Merger, SkippedFile};

/// Outcome of a merge, as reported to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub output: PathBuf,

    /// Files whose pages ended up in the output, in order.
    pub merged_files: Vec<PathBuf>,

    pub skipped: Vec<SkippedFile>,
    pub statistics: MergeStatistics,
    pub write: WriteStatistics,
}

/// What a finished operation produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Outcome {
    Merge(MergeSummary),
    Compress(CompressionReport),
    Encrypt(EncryptionSummary),
    Decrypt(DecryptionSummary),
}

impl Outcome {
    /// Path of the written file.
    pub fn output_path(&self) -> &Path {
        match self {
            Self::Merge(summary) => &summary.output,
            Self::Compress(report) => &report.output,
            Self::Encrypt(summary) => &summary.output,
            Self::Decrypt(summary) => &summary.output,
        }
    }
}

/// Run the operation in `config` and write its output.
///
/// # Errors
///
/// Returns the first load, transformation or write error.
pub async fn execute(config: Config) -> Result<Outcome> {
    let writer = PdfWriter::new();
    let output = config.output;

    info!("Starting {} into {}", config.operation.name(), output.display());

    match config.operation {
        Operation::Merge(options) => {
            let result = Merger::new().merge(&options).await?;
            let write = writer.save_with_stats(result.document, &output).await?;

            Ok(Outcome::Merge(MergeSummary {
                output,
                merged_files: result.merged_files,
                skipped: result.skipped,
                statistics: result.statistics,
                write,
            }))
        }
        Operation::Compress(options) => {
            let compressed = compress_file(&options).await?;
            let write = writer.save_with_stats(compressed.document, &output).await?;

            Ok(Outcome::Compress(CompressionReport::new(
                options.input,
                output,
                compressed.original_size,
                write.file_size,
                compressed.page_count,
                compressed.statistics,
            )))
        }
        Operation::Encrypt(options) => {
            let encrypted = encrypt_file(&options).await?;
            let write = writer.save_with_stats(encrypted.document, &output).await?;
            let separate_owner_password = options.effective_owner_password() != options.user_password;

            Ok(Outcome::Encrypt(EncryptionSummary {
                input: options.input,
                output,
                page_count: encrypted.page_count,
                key_length: options.key_length,
                separate_owner_password,
                file_size: write.file_size,
            }))
        }
        Operation::Decrypt(options) => {
            let decrypted = decrypt_file(&options).await?;
            let write = writer.save_with_stats(decrypted.document, &output).await?;

            Ok(Outcome::Decrypt(DecryptionSummary {
                input: options.input,
                output,
                page_count: decrypted.page_count,
                file_size: write.file_size,
            }))
        }
    }
}
