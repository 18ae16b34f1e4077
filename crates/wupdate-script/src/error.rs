use std::path::PathBuf;

use thiserror::Error;

use wupdate_core::download::DownloadError;
use wupdate_core::launcher::LaunchError;

/// Errors that stop the runner before or after a script executes.
///
/// Nothing in here can be raised by a directive: statement-level failures
/// are logged and the run continues.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Setup(#[from] DownloadError),

    #[error("{0}")]
    Launch(#[from] LaunchError),
}

impl ScriptError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ScriptError::NotFound(_) => -1,
            ScriptError::Io(_) => 4,
            ScriptError::Setup(_) => 5,
            ScriptError::Launch(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ScriptError::NotFound(PathBuf::from("update.wus"));
        assert_eq!(err.to_string(), "update.wus: no such file or directory");
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_io_exit_code() {
        let err = ScriptError::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("boom"));
    }
}
