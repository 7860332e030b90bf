//! Build results and pipeline failures.

use super::PipelineState;
use crate::bundler::{Error, Result, utils::fs};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outcome of a successful bundling stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
    /// Executable name without extension.
    pub display_name: String,
    /// Entry point that was bundled.
    pub entry_point: PathBuf,
    /// Absolute path of the produced executable.
    pub artifact: PathBuf,
    /// Artifact size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the artifact.
    pub sha256: String,
    pub finished_at: DateTime<Utc>,
}

impl BuildResult {
    /// Writes the result as pretty JSON to `path`.
    pub async fn write_receipt(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        fs::write_file(path, json).await
    }
}

/// A stage failed; the pipeline stopped in [`PipelineState::Failed`].
#[derive(Debug, Error)]
#[error("{stage} failed: {error}")]
pub struct PipelineFailure {
    /// Stage that was running when the error occurred.
    pub stage: PipelineState,
    #[source]
    pub error: Error,
}

impl PipelineFailure {
    /// True for dependency / interpreter problems.
    pub fn is_environment_error(&self) -> bool {
        self.stage == PipelineState::InstallingDeps
    }

    /// True for entry point / bundler / artifact problems.
    pub fn is_build_error(&self) -> bool {
        self.stage == PipelineState::Bundling
    }
}
