//! Hand-off to an external updater binary.
//!
//! After an update script has run, the host can pass control to a separate
//! updater executable, giving it the update-file path as its only argument.
//! On Unix the current process image is replaced with `exec`, so a successful
//! hand-off never returns. Elsewhere the updater is spawned and the current
//! process exits immediately.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

/// Errors that can occur when handing off to the updater.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Replacing the process image failed.
    #[error("cannot exec updater {}: {source}", updater.display())]
    Exec {
        updater: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spawning the updater process failed.
    #[error("cannot spawn updater {}: {source}", updater.display())]
    Spawn {
        updater: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Build the command line `<updater> <update_file>`.
fn updater_command(updater: &Path, update_file: &Path) -> Command {
    let mut cmd = Command::new(updater);
    cmd.arg(update_file);
    cmd
}

/// Replace the running process with `updater`, passing `update_file`.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn hand_off(updater: &Path, update_file: &Path) -> LaunchError {
    use std::os::unix::process::CommandExt;

    info!(updater = %updater.display(), update_file = %update_file.display(), "exec updater");
    let source = updater_command(updater, update_file).exec();
    LaunchError::Exec {
        updater: updater.to_path_buf(),
        source,
    }
}

/// Spawn `updater` with `update_file` and exit the current process.
///
/// Only returns on failure.
#[cfg(not(unix))]
pub fn hand_off(updater: &Path, update_file: &Path) -> LaunchError {
    info!(updater = %updater.display(), update_file = %update_file.display(), "spawn updater");
    match updater_command(updater, update_file).spawn() {
        Ok(_) => std::process::exit(0),
        Err(source) => LaunchError::Spawn {
            updater: updater.to_path_buf(),
            source,
        },
    }
}
