//! Optional settings file with user defaults.
//!
//! Settings live in `<config_dir>/pdftools/config.toml` unless `--config`
//! points elsewhere. Every key is optional; command-line flags win over
//! anything set here.
//!
//! ```toml
//! compression = "maximum"
//! key_length = 128
//! overwrite = "no-clobber"
//! open = "never"
//! jobs = 4
//! ```

use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CompressionLevel, KeyLength, OpenMode, OverwriteMode};
use crate::error::{PdfToolsError, Result};

/// Defaults read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default compression level for merge and compress.
    pub compression: Option<CompressionLevel>,

    /// Default RC4 key length for encrypt.
    pub key_length: Option<KeyLength>,

    /// Default overwrite behavior.
    pub overwrite: Option<OverwriteMode>,

    /// Default open-after-success behavior.
    pub open: Option<OpenMode>,

    /// Default number of parallel load jobs.
    pub jobs: Option<usize>,
}

impl Settings {
    /// Default settings file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pdftools").join("config.toml"))
    }

    /// Load settings from an explicit path or the default location.
    ///
    /// A missing default file yields empty settings; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PdfToolsError::file_not_found(path.to_path_buf()));
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a settings file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|e| PdfToolsError::FileNotAccessible {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Self =
            toml::from_str(&contents).map_err(|e| PdfToolsError::InvalidSettings {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            })?;

        if settings.jobs == Some(0) {
            return Err(PdfToolsError::InvalidSettings {
                path: path.to_path_buf(),
                reason: "jobs must be at least 1".to_string(),
            });
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "compression = \"maximum\"\nkey_length = 40\noverwrite = \"no-clobber\"\nopen = \"never\"\njobs = 2\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.compression, Some(CompressionLevel::Maximum));
        assert_eq!(settings.key_length, Some(KeyLength::Bits40));
        assert_eq!(settings.overwrite, Some(OverwriteMode::NoClobber));
        assert_eq!(settings.open, Some(OpenMode::Never));
        assert_eq!(settings.jobs, Some(2));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(Settings::load(Some(path.as_path())).unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();

        let err = Settings::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, PdfToolsError::InvalidSettings { .. }));
    }

    #[test]
    fn test_invalid_key_length_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "key_length = 64\n").unwrap();

        assert!(Settings::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "jobs = 0\n").unwrap();

        assert!(Settings::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/pdftools.toml"))).unwrap_err();
        assert!(matches!(err, PdfToolsError::FileNotFound { .. }));
    }
}
