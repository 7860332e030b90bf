//! Pipeline orchestration and coordination.
//!
//! The [`Pipeline`]:
//! 1. Reads the build manifest and installs it through the [`Toolchain`]
//! 2. Checks the entry point and has the toolchain bundle it
//! 3. Verifies the artifact, hashes it, and writes a build receipt
//! 4. Hands the [`BuildResult`] to the completion reporter
//!
//! # Module Organization
//!
//! - `checksum` - SHA256 checksum calculation for artifacts
//! - `orchestrator` - Main [`Pipeline`] struct and stage sequencing
//! - `result` - [`BuildResult`] and [`PipelineFailure`]
//! - `state` - [`PipelineState`] transitions
//! - `tool_detection` - Interpreter lookup
//!
//! [`Toolchain`]: crate::bundler::Toolchain

mod checksum;
mod orchestrator;
mod result;
mod state;
pub(crate) mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::Pipeline;
pub use result::{BuildResult, PipelineFailure};
pub use state::PipelineState;
