//! Top-level error types and process exit codes.

use crate::bundler::PipelineFailure;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Pipeline reached `Done`.
pub const EXIT_SUCCESS: i32 = 0;
/// Configuration could not be loaded or validated, or an internal error.
pub const EXIT_CONFIG: i32 = 1;
/// Dependency installation failed.
pub const EXIT_ENVIRONMENT: i32 = 2;
/// Bundling failed.
pub const EXIT_BUILD: i32 = 3;

/// Main error type for a packager run
#[derive(Error, Debug)]
pub enum PackagerError {
    /// Bad configuration or arguments
    #[error("{0}")]
    Cli(#[from] CliError),

    /// A pipeline stage failed
    #[error("{0}")]
    Pipeline(#[from] PipelineFailure),

    /// Errors carrying ad-hoc context (config loading)
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Options combine into an unusable build configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pipeline(failure) if failure.is_environment_error() => EXIT_ENVIRONMENT,
            Self::Pipeline(failure) if failure.is_build_error() => EXIT_BUILD,
            _ => EXIT_CONFIG,
        }
    }
}
