//! Packaging pipeline: dependency installation, bundling, and reporting.
//!
//! ```no_run
//! use app_packager::bundler::{Pipeline, PythonToolchain, SettingsBuilder};
//! use app_packager::cli::OutputManager;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new().build()?;
//! let output = OutputManager::new(false, false);
//! Pipeline::new(&settings, PythonToolchain::new(), &output)
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod manifest;
pub mod settings;
pub mod stages;
pub mod utils;

pub use builder::{BuildResult, Pipeline, PipelineFailure, PipelineState};
pub use error::{Error, Result};
pub use manifest::{BuildManifest, ManifestEntry, Requirement, VersionConstraint};
pub use settings::{
    ConsoleMode, DisplayName, EnvironmentMode, OutputMode, Settings, SettingsBuilder, defaults,
};
pub use stages::{PythonToolchain, Toolchain};
