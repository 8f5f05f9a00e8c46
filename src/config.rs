//! Configuration module for pdftools.
//!
//! This module holds the validated, normalized configuration that drives
//! one run of the tool. The CLI layer and the optional settings file both
//! feed into it; once built, [`Config::validate`] rejects inconsistent
//! combinations before any file is touched.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::PdfToolsError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Flate-compress every uncompressed stream.
    #[default]
    Standard,
    /// Standard compression plus removal of unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfToolsError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Standard => "standard",
            Self::Maximum => "maximum",
        };
        f.write_str(name)
    }
}

/// RC4 key length used when encrypting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum KeyLength {
    /// 40-bit key (PDF 1.1 compatible).
    Bits40,
    /// 128-bit key.
    #[default]
    Bits128,
}

impl KeyLength {
    /// Key length in bits.
    pub fn bits(&self) -> usize {
        match self {
            Self::Bits40 => 40,
            Self::Bits128 => 128,
        }
    }
}

impl TryFrom<u16> for KeyLength {
    type Error = PdfToolsError;

    fn try_from(bits: u16) -> crate::Result<Self> {
        match bits {
            40 => Ok(Self::Bits40),
            128 => Ok(Self::Bits128),
            _ => Err(PdfToolsError::invalid_config(format!(
                "Invalid key length: {bits}. Must be 40 or 128"
            ))),
        }
    }
}

impl From<KeyLength> for u16 {
    fn from(key_length: KeyLength) -> Self {
        key_length.bits() as u16
    }
}

impl FromStr for KeyLength {
    type Err = PdfToolsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let bits: u16 = s.trim().parse().map_err(|_| {
            PdfToolsError::invalid_config(format!("Invalid key length: {s}. Must be 40 or 128"))
        })?;
        Self::try_from(bits)
    }
}

/// PDF metadata to set on the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    pub keywords: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }

    /// Create metadata from optional strings, trimming whitespace.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        let to_string_opt = |opt: Option<String>| {
            opt.filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
        };

        Self {
            title: to_string_opt(title),
            author: to_string_opt(author),
            subject: to_string_opt(subject),
            keywords: to_string_opt(keywords),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// What to do with the output once an operation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Ask whether to open the output with the default application.
    #[default]
    Prompt,
    /// Open without asking.
    Always,
    /// Never open.
    Never,
}

/// Settings for concatenating several PDFs.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Add a bookmark at the first page of each merged document.
    pub bookmarks: bool,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Metadata to set on output document.
    pub metadata: Metadata,

    /// Skip unreadable inputs instead of stopping.
    pub continue_on_error: bool,

    /// Number of parallel load jobs (None = auto-detect).
    pub jobs: Option<usize>,
}

impl MergeOptions {
    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Settings for rewriting one PDF with compressed streams.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    pub input: PathBuf,
    pub level: CompressionLevel,
}

/// Settings for password-protecting one PDF.
#[derive(Clone)]
pub struct EncryptOptions {
    pub input: PathBuf,
    /// Password required to open the document.
    pub user_password: String,
    /// Password granting full permissions; falls back to the user password.
    pub owner_password: Option<String>,
    pub key_length: KeyLength,
}

impl EncryptOptions {
    /// The owner password that will be written into the encryption dictionary.
    pub fn effective_owner_password(&self) -> &str {
        self.owner_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.user_password)
    }
}

impl fmt::Debug for EncryptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptOptions")
            .field("input", &self.input)
            .field("user_password", &"<redacted>")
            .field("owner_password", &self.owner_password.as_ref().map(|_| "<redacted>"))
            .field("key_length", &self.key_length)
            .finish()
    }
}

/// Settings for removing the password from one PDF.
#[derive(Clone)]
pub struct DecryptOptions {
    pub input: PathBuf,
    pub password: String,
}

impl fmt::Debug for DecryptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptOptions")
            .field("input", &self.input)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The tool selected for this run.
#[derive(Debug, Clone)]
pub enum Operation {
    Merge(MergeOptions),
    Compress(CompressOptions),
    Encrypt(EncryptOptions),
    Decrypt(DecryptOptions),
}

impl Operation {
    /// Short lowercase name, as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge",
            Self::Compress(_) => "compress",
            Self::Encrypt(_) => "encrypt",
            Self::Decrypt(_) => "decrypt",
        }
    }

    /// Status text shown while the operation runs ("Merging", ...).
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::Merge(_) => "Merging",
            Self::Compress(_) => "Compressing",
            Self::Encrypt(_) => "Encrypting",
            Self::Decrypt(_) => "Decrypting",
        }
    }

    /// Adjective describing the output ("merged", ...).
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merged",
            Self::Compress(_) => "compressed",
            Self::Encrypt(_) => "encrypted",
            Self::Decrypt(_) => "decrypted",
        }
    }

    /// Every input path the operation reads.
    pub fn inputs(&self) -> Vec<&Path> {
        match self {
            Self::Merge(options) => options.inputs.iter().map(PathBuf::as_path).collect(),
            Self::Compress(options) => vec![options.input.as_path()],
            Self::Encrypt(options) => vec![options.input.as_path()],
            Self::Decrypt(options) => vec![options.input.as_path()],
        }
    }
}

/// Complete configuration for one pdftools run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The operation and its settings.
    pub operation: Operation,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Whether to open the output afterwards.
    pub open_mode: OpenMode,

    /// Print the outcome as JSON instead of human-readable text.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A merge has no input files
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also an input
    /// - A password is empty
    /// - Compression is requested with level `none`
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        match &self.operation {
            Operation::Merge(options) => {
                if options.inputs.is_empty() {
                    bail!("No input files specified");
                }

                if let Some(jobs) = options.jobs
                    && jobs == 0
                {
                    bail!("Number of jobs must be at least 1");
                }
            }
            Operation::Compress(options) => {
                if options.level == CompressionLevel::None {
                    bail!("Compression level 'none' would leave the file unchanged");
                }
            }
            Operation::Encrypt(options) => {
                if options.user_password.is_empty() {
                    bail!("Please enter a password.");
                }
            }
            Operation::Decrypt(options) => {
                if options.password.is_empty() {
                    bail!("Please enter a password.");
                }
            }
        }

        if self.output.as_os_str().is_empty() {
            bail!("Please select an output file.");
        }

        for input in self.operation.inputs() {
            if input.as_os_str().is_empty() {
                bail!("Please select an input file.");
            }

            if same_file(input, &self.output) {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Check if human-readable output should be displayed.
    ///
    /// Dry runs always print; otherwise quiet and JSON modes silence output.
    pub fn should_print(&self) -> bool {
        self.dry_run || !(self.quiet || self.json)
    }
}

/// Whether two paths name the same file.
///
/// Paths that exist are compared after resolving `.`, `..` and symlinks;
/// anything else is compared as written.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
