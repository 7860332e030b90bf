//! Packaging pipeline for single-file Python desktop applications
//!
//! Turns an application entry point into a standalone executable for users
//! without a Python installation:
//! 1. install the requirements manifest with pip
//! 2. bundle the entry point with PyInstaller (single file, no console)
//! 3. report the artifact location and wait for acknowledgment
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
