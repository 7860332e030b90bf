//! External tool detection and availability checking.
//!
//! The interpreter is the only tool looked up on `PATH`; pip, venv and
//! PyInstaller all run as its modules.

use crate::bundler::{
    error::{Error, Result},
    utils::ToolCommand,
};
use std::path::{Path, PathBuf};

/// Resolves the configured interpreter to an executable path.
///
/// Bare names are searched on `PATH`; anything containing a separator is
/// checked in place.
pub fn locate_interpreter(program: &str) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {program} at: {}", path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{program} not found: {e}");
            Err(Error::ToolNotFound {
                tool: program.to_string(),
                hint: "install Python 3 and make sure it is on PATH, or pass --python <path>"
                    .into(),
            })
        }
    }
}

/// Logs the interpreter version. A failing probe only warns; the install
/// step reports the real failure if the interpreter is unusable.
pub async fn probe_interpreter(path: &Path) -> Option<String> {
    match ToolCommand::new(path).arg("--version").capture().await {
        Ok(version) => {
            log::info!("✓ python available: {version}");
            Some(version)
        }
        Err(e) => {
            log::warn!(
                "{} found but --version check failed: {e}",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_interpreter_is_reported() {
        let err = locate_interpreter("definitely-not-python-xyz").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "definitely-not-python-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn finds_shell_on_path() {
        assert!(locate_interpreter("sh").unwrap().is_absolute());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_probe_is_not_fatal() {
        assert_eq!(probe_interpreter(Path::new("false")).await, None);
    }
}
