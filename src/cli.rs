//! CLI argument parsing for pdftools.
//!
//! This module defines the command-line interface using `clap`: global
//! flags shared by every tool and one subcommand per tool. [`Cli::to_config`]
//! turns the parsed arguments, together with the optional settings file,
//! into a validated [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use pdftools::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Running {}", cli.command.name());
//! ```

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{
    CompressOptions, CompressionLevel, Config, DecryptOptions, EncryptOptions, KeyLength,
    MergeOptions, Metadata, OpenMode, Operation, OverwriteMode,
};
use crate::error::{PdfToolsError, Result};
use crate::settings::Settings;
use crate::utils::collect_paths_for_patterns;

/// Environment variable consulted when `--password` is not given.
pub const PASSWORD_ENV: &str = "PDFTOOLS_PASSWORD";

/// Merge, compress, encrypt and decrypt PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdftools")]
#[command(version)]
#[command(about = "Merge, compress, encrypt and decrypt PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    ///
    /// A single -v also shows per-file details and statistics.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed. An existing output file
    /// is never overwritten without --force in this mode.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing output file without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite an existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Open the result with the default application without asking
    #[arg(long, global = true)]
    pub open: bool,

    /// Never offer to open the result
    #[arg(long, global = true, conflicts_with = "open")]
    pub no_open: bool,

    /// Print the outcome as JSON
    ///
    /// Human-readable output is suppressed; errors still go to stderr.
    #[arg(long, global = true)]
    pub json: bool,

    /// Dry run - validate inputs and show what would be done
    ///
    /// Validates that all input files exist and are readable PDFs,
    /// then displays the plan without writing the output file.
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Settings file with defaults (TOML)
    ///
    /// Defaults to <config dir>/pdftools/config.toml when present.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// The tools pdftools offers.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Combine several PDFs into one, in the given order
    ///
    /// Examples:
    ///   pdftools merge a.pdf b.pdf -o combined.pdf
    ///   pdftools merge 'chapters/*.pdf' -o book.pdf --bookmarks
    Merge(MergeArgs),

    /// Rewrite a PDF with compressed content streams
    ///
    /// Example:
    ///   pdftools compress scan.pdf -o scan-small.pdf
    Compress(CompressArgs),

    /// Protect a PDF with a password
    ///
    /// Example:
    ///   pdftools encrypt report.pdf -o locked.pdf -p secret
    Encrypt(EncryptArgs),

    /// Remove the password from a PDF
    ///
    /// Example:
    ///   pdftools decrypt locked.pdf -o report.pdf -p secret
    Decrypt(DecryptArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge",
            Self::Compress(_) => "compress",
            Self::Encrypt(_) => "encrypt",
            Self::Decrypt(_) => "decrypt",
        }
    }
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Glob patterns are expanded; matches of one pattern are sorted.
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Read additional input paths from a file (one path per line)
    ///
    /// Blank lines and lines starting with '#' are ignored.
    /// Use '-' to read from stdin. Paths are appended after direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Add a bookmark at the first page of each merged file
    ///
    /// Bookmarks are titled with the file name and replace any outline
    /// inherited from the inputs.
    #[arg(short, long)]
    pub bookmarks: bool,

    /// Compression level for the merged PDF (none, standard, maximum)
    #[arg(short, long, value_name = "LEVEL")]
    pub compression: Option<CompressionLevel>,

    /// Set title metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Set author metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub author: Option<String>,

    /// Set subject metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,

    /// Set keywords metadata for output PDF (comma-separated)
    #[arg(long, value_name = "TEXT")]
    pub keywords: Option<String>,

    /// Skip PDFs that fail to load instead of stopping
    ///
    /// Skipped files are reported as warnings. Missing files still
    /// stop the merge.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of PDFs to load in parallel
    ///
    /// Default is number of CPU cores. Use 1 for sequential loading.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// PDF file to compress
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Compression level (standard, maximum)
    ///
    /// maximum also drops objects that nothing refers to.
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<CompressionLevel>,
}

#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// PDF file to protect
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Password required to open the output
    #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,

    /// Separate owner password (defaults to the user password)
    #[arg(long, value_name = "PASSWORD")]
    pub owner_password: Option<String>,

    /// RC4 key length in bits (40 or 128)
    #[arg(long, value_name = "BITS")]
    pub key_length: Option<KeyLength>,
}

#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Password-protected PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Password that opens the input
    #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Values missing on the command line fall back to `settings`, then to
    /// built-in defaults. Merge inputs are glob-expanded and extended with
    /// the contents of `--input-list`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A glob pattern matches nothing
    /// - The input list cannot be read
    /// - No merge inputs remain
    /// - Configuration validation fails
    pub async fn to_config(&self, settings: &Settings) -> Result<Config> {
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            settings.overwrite.unwrap_or_default()
        };

        let open_mode = if self.open {
            OpenMode::Always
        } else if self.no_open {
            OpenMode::Never
        } else {
            settings.open.unwrap_or_default()
        };

        let (operation, output) = match &self.command {
            Command::Merge(args) => {
                let inputs = args.all_inputs().await?;
                let options = MergeOptions {
                    inputs,
                    bookmarks: args.bookmarks,
                    compression: args
                        .compression
                        .or(settings.compression)
                        .unwrap_or_default(),
                    metadata: Metadata::new(
                        args.title.clone(),
                        args.author.clone(),
                        args.subject.clone(),
                        args.keywords.clone(),
                    ),
                    continue_on_error: args.continue_on_error,
                    jobs: args.jobs.or(settings.jobs),
                };
                (Operation::Merge(options), args.output.clone())
            }
            Command::Compress(args) => {
                let level = args
                    .level
                    .or(settings.compression)
                    .filter(|level| *level != CompressionLevel::None || args.level.is_some())
                    .unwrap_or_default();
                let options = CompressOptions {
                    input: args.input.clone(),
                    level,
                };
                (Operation::Compress(options), args.output.clone())
            }
            Command::Encrypt(args) => {
                let options = EncryptOptions {
                    input: args.input.clone(),
                    user_password: args.password.clone(),
                    owner_password: args.owner_password.clone(),
                    key_length: args.key_length.or(settings.key_length).unwrap_or_default(),
                };
                (Operation::Encrypt(options), args.output.clone())
            }
            Command::Decrypt(args) => {
                let options = DecryptOptions {
                    input: args.input.clone(),
                    password: args.password.clone(),
                };
                (Operation::Decrypt(options), args.output.clone())
            }
        };

        let config = Config {
            operation,
            output,
            dry_run: self.dry_run,
            verbose: self.verbose > 0,
            quiet: self.quiet,
            overwrite_mode,
            open_mode,
            json: self.json,
        };

        config
            .validate()
            .map_err(|e| PdfToolsError::invalid_config(e.to_string()))?;

        Ok(config)
    }
}

impl MergeArgs {
    /// Expanded direct inputs followed by the entries of `--input-list`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfToolsError::NoFilesToMerge`] if nothing is left.
    pub async fn all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = collect_paths_for_patterns(&self.inputs)
            .map_err(|e| PdfToolsError::invalid_config(e.to_string()))?;

        if let Some(ref input_list_path) = self.input_list {
            all_inputs.extend(read_input_list(input_list_path).await?);
        }

        if all_inputs.is_empty() {
            return Err(PdfToolsError::NoFilesToMerge);
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the list cannot be read.
pub async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    if path.as_os_str() == "-" {
        return parse_input_list(BufReader::new(tokio::io::stdin()), path).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| PdfToolsError::FailedToReadInputList {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_input_list(BufReader::new(file), path).await
}

/// Parse one path per line, skipping blanks and `#` comments.
///
/// `source` names the list in error messages.
async fn parse_input_list<R>(reader: R, source: &Path) -> Result<Vec<PathBuf>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| PdfToolsError::FailedToReadInputList {
                path: source.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfToolsError::InvalidInputList {
                path: source.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
