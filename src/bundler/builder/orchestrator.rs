//! Main pipeline orchestration.
//!
//! This module provides the [`Pipeline`] orchestrator that runs the three
//! stages in order and stops at the first failure.

use super::{
    BuildResult, PipelineFailure, PipelineState, checksum::calculate_sha256,
};
use crate::bundler::{
    Error, Result, Settings,
    manifest::BuildManifest,
    stages::{CompletionReporter, Toolchain},
    utils::fs,
};
use crate::cli::OutputManager;
use chrono::Utc;

/// Sequential packaging pipeline.
///
/// Drives `Start → InstallingDeps → Bundling → Reporting → Done`; an error in
/// either tool stage moves straight to `Failed` and nothing after it runs.
/// Each stage awaits its subprocess to completion before the next begins.
///
/// # Examples
///
/// ```no_run
/// use app_packager::bundler::{Pipeline, PythonToolchain, SettingsBuilder};
/// use app_packager::cli::OutputManager;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SettingsBuilder::new().pause(false).build()?;
/// let output = OutputManager::new(false, false);
///
/// let mut pipeline = Pipeline::new(&settings, PythonToolchain::new(), &output);
/// let result = pipeline.run().await?;
/// println!("Built {}", result.artifact.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pipeline<'a, T> {
    settings: &'a Settings,
    toolchain: T,
    output: &'a OutputManager,
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl<'a, T: Toolchain> Pipeline<'a, T> {
    /// Creates a pipeline in the `Start` state.
    pub fn new(settings: &'a Settings, toolchain: T, output: &'a OutputManager) -> Self {
        Self {
            settings,
            toolchain,
            output,
            state: PipelineState::Start,
            history: vec![PipelineState::Start],
        }
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Every state visited so far, in order.
    pub fn history(&self) -> &[PipelineState] {
        &self.history
    }

    /// The toolchain, e.g. to inspect what it was asked to do.
    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Runs all stages.
    ///
    /// # Errors
    ///
    /// [`PipelineFailure`] naming the stage that failed. The pipeline is then
    /// in [`PipelineState::Failed`].
    pub async fn run(&mut self) -> std::result::Result<BuildResult, PipelineFailure> {
        if self.state != PipelineState::Start {
            return Err(PipelineFailure {
                stage: self.state,
                error: Error::GenericError("pipeline has already run".into()),
            });
        }

        self.advance();
        if let Err(error) = self.install_dependencies().await {
            return Err(self.fail(error));
        }

        self.advance();
        let result = match self.bundle().await {
            Ok(result) => result,
            Err(error) => return Err(self.fail(error)),
        };

        self.advance();
        self.header("Finishing");
        CompletionReporter::new(self.output, self.settings.pause())
            .report(&result)
            .await;

        self.advance();
        debug_assert!(self.state.is_terminal());
        Ok(result)
    }

    /// Stage 1: validate the manifest and install it.
    async fn install_dependencies(&mut self) -> Result<()> {
        self.header("Installing dependencies");

        let manifest = BuildManifest::load(self.settings.manifest_path()).await?;
        self.output.progress(&format!(
            "{} lists {} package(s)",
            manifest.path().display(),
            manifest.requirements().count()
        ));
        if manifest.is_empty() {
            self.output.warn(&format!(
                "{} lists no packages; only the interpreter's current packages will be bundled",
                manifest.path().display()
            ));
        }
        for requirement in manifest.requirements() {
            self.output.verbose(&format!("  {requirement}"));
        }

        self.toolchain
            .install(&manifest, self.settings, self.output)
            .await?;
        self.output.success("Dependencies installed");
        Ok(())
    }

    /// Stage 2: bundle the entry point and describe the artifact.
    async fn bundle(&mut self) -> Result<BuildResult> {
        self.header("Building executable");

        let entry_point = self.settings.entry_point();
        if !fs::is_file(entry_point).await {
            return Err(Error::EntryPointMissing(entry_point.to_path_buf()));
        }
        if let Some(icon) = self.settings.icon() {
            if !fs::is_file(icon).await {
                return Err(Error::IconMissing(icon.to_path_buf()));
            }
        }

        let artifact = self.toolchain.bundle(self.settings, self.output).await?;
        if !fs::is_file(&artifact).await {
            return Err(Error::ArtifactMissing(artifact));
        }

        let result = BuildResult {
            display_name: self.settings.display_name().to_string(),
            entry_point: entry_point.to_path_buf(),
            size: fs::file_size(&artifact).await?,
            sha256: calculate_sha256(&artifact).await?,
            artifact: fs::absolute(&artifact),
            finished_at: Utc::now(),
        };

        let receipt = self.settings.receipt_path();
        match result.write_receipt(&receipt).await {
            Ok(()) => log::debug!("Wrote build receipt {}", receipt.display()),
            Err(e) => {
                self.output
                    .warn(&format!("Could not write build receipt: {e}"));
            }
        }

        self.output.success("Executable built");
        Ok(result)
    }

    fn header(&self, title: &str) {
        let n = self.state.stage_number().unwrap_or_default();
        self.output.section(&format!(
            "[{n}/{}] {title}",
            PipelineState::STAGE_COUNT
        ));
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.on_success() {
            log::debug!("Pipeline: {} -> {}", self.state, next);
            self.enter(next);
        }
    }

    fn fail(&mut self, error: Error) -> PipelineFailure {
        let stage = self.state;
        log::info!("Pipeline stopped during {stage}: {error}");
        self.output.error(&format!("{stage} failed"));
        self.enter(stage.on_failure().unwrap_or(PipelineState::Failed));
        debug_assert!(self.state.is_terminal());
        PipelineFailure { stage, error }
    }

    fn enter(&mut self, state: PipelineState) {
        self.state = state;
        self.history.push(state);
    }
}
