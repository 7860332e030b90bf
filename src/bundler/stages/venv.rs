//! Isolated virtual environment for builds.

use crate::bundler::{
    Error, Result,
    utils::{ToolCommand, fs},
};
use crate::cli::OutputManager;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interpreter inside a virtual environment.
pub fn venv_python(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("python.exe")
    } else {
        venv_dir.join("bin").join("python")
    }
}

/// Returns the venv interpreter, creating the environment on first use.
pub async fn ensure_venv(
    base_python: &Path,
    venv_dir: &Path,
    timeout: Option<Duration>,
    output: &OutputManager,
) -> Result<PathBuf> {
    let python = venv_python(venv_dir);
    if fs::is_file(&python).await {
        log::debug!("Reusing virtual environment at {}", venv_dir.display());
        output.verbose(&format!("Reusing virtual environment {}", venv_dir.display()));
        return Ok(python);
    }

    output.progress(&format!(
        "Creating virtual environment {}",
        venv_dir.display()
    ));
    ToolCommand::new(base_python)
        .args(["-m", "venv"])
        .arg(venv_dir)
        .run(timeout, output)
        .await?;

    if !fs::is_file(&python).await {
        return Err(Error::ToolNotFound {
            tool: python.display().to_string(),
            hint: "venv finished but did not create an interpreter; is the venv module complete?"
                .into(),
        });
    }
    Ok(python)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpreter_location() {
        let py = venv_python(Path::new(".packager-venv"));
        if cfg!(windows) {
            assert!(py.ends_with("Scripts/python.exe"));
        } else {
            assert!(py.ends_with("bin/python"));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn existing_environment_is_reused_without_running_python() {
        let dir = tempfile::tempdir().unwrap();
        let venv = dir.path().join("venv");
        fs::write_file(&venv_python(&venv), "").await.unwrap();

        // The base interpreter does not exist; reuse must not invoke it.
        let python = ensure_venv(
            Path::new("/nonexistent/python"),
            &venv,
            None,
            &OutputManager::new(false, true),
        )
        .await
        .unwrap();
        assert_eq!(python, venv_python(&venv));
    }
}
