//! Opening output files with the platform's default application.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{PdfToolsError, Result};
use crate::task::run_blocking;

/// Build the command that hands `path` to the default application.
pub fn open_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // `start` treats its first quoted argument as the window title.
        command.args(["/C", "start", ""]).arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Open `path` with the default application and wait for the launcher.
///
/// # Errors
///
/// Returns [`PdfToolsError::FailedToOpen`] if the file is missing, the
/// launcher cannot be started, or it exits unsuccessfully.
pub fn open_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfToolsError::failed_to_open(
            path.to_path_buf(),
            "file does not exist",
        ));
    }

    let mut command = open_command(path);
    debug!("Launching {:?}", command);

    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| PdfToolsError::failed_to_open(path.to_path_buf(), e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(PdfToolsError::failed_to_open(
            path.to_path_buf(),
            format!("launcher exited with {status}"),
        ))
    }
}

/// Run [`open_path`] on the blocking pool.
pub async fn open_path_async(path: PathBuf) -> Result<()> {
    run_blocking(move || open_path(&path)).await
}
