//! Shared helpers for subprocesses and the filesystem.

pub mod fs;
pub mod process;

pub use process::ToolCommand;
