//! Tool-driven pipeline stages.
//!
//! [`Toolchain`] is the seam between the orchestrator and the external tools.
//! [`PythonToolchain`] drives pip and PyInstaller through one interpreter;
//! tests substitute a recording implementation.
//!
//! - [`installer`] - `pip install -r <manifest>`
//! - [`venv`] - optional isolated environment
//! - [`pyinstaller`] - single-file executable bundling
//! - [`reporter`] - completion report and acknowledgment

pub mod installer;
pub mod pyinstaller;
pub mod reporter;
pub mod venv;

pub use reporter::CompletionReporter;

use crate::bundler::{
    Result, Settings,
    builder::tool_detection,
    error::Context,
    manifest::BuildManifest,
};
use crate::cli::OutputManager;
use std::path::PathBuf;

/// External tools the pipeline delegates to.
///
/// Calls arrive strictly in order: `install` once, then `bundle` once, and
/// only if `install` succeeded.
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Makes the environment satisfy `manifest`.
    async fn install(
        &mut self,
        manifest: &BuildManifest,
        settings: &Settings,
        output: &OutputManager,
    ) -> Result<()>;

    /// Produces the executable and returns its expected path.
    async fn bundle(&mut self, settings: &Settings, output: &OutputManager) -> Result<PathBuf>;
}

/// pip + PyInstaller driven by a single Python interpreter.
#[derive(Debug, Default)]
pub struct PythonToolchain {
    /// Interpreter chosen during `install`; the venv one in isolated mode.
    interpreter: Option<PathBuf>,
}

impl PythonToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter in use once `install` has run.
    pub fn interpreter(&self) -> Option<&PathBuf> {
        self.interpreter.as_ref()
    }
}

impl Toolchain for PythonToolchain {
    async fn install(
        &mut self,
        manifest: &BuildManifest,
        settings: &Settings,
        output: &OutputManager,
    ) -> Result<()> {
        let mut python = tool_detection::locate_interpreter(settings.python())?;
        if let Some(version) = tool_detection::probe_interpreter(&python).await {
            output.verbose(&format!("Using {version} at {}", python.display()));
        }

        if let Some(venv_dir) = settings.environment().venv_dir() {
            python = venv::ensure_venv(&python, venv_dir, settings.timeout(), output).await?;
        }
        self.interpreter = Some(python.clone());

        installer::install_requirements(&python, manifest, settings.timeout(), output).await
    }

    async fn bundle(&mut self, settings: &Settings, output: &OutputManager) -> Result<PathBuf> {
        let python = self
            .interpreter
            .clone()
            .context("bundling requires a prior successful install")?;
        pyinstaller::bundle_project(&python, settings, output).await
    }
}
