//! Error types for pipeline stages.
//!
//! Every stage failure maps onto one [`Error`] variant. The variants split into
//! the two families operators care about: environment problems (manifest,
//! interpreter, package resolution) and build problems (entry point, bundler,
//! artifact). The orchestrator attaches the failing stage separately.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for stage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stage-level error
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest could not be opened or read
    #[error("manifest {} is unreadable: {source}", path.display())]
    ManifestUnreadable {
        /// Manifest path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A manifest line is not a valid requirement
    #[error("manifest {}:{line}: {reason} (`{content}`)", path.display())]
    InvalidRequirement {
        /// Manifest path
        path: PathBuf,
        /// 1-based line number where the entry starts
        line: usize,
        /// Offending entry text
        content: String,
        /// Why it was rejected
        reason: String,
    },

    /// Display name cannot be used as a file name
    #[error("invalid display name {name:?}: {reason}")]
    InvalidDisplayName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Required external tool is not installed
    #[error("{tool} not found: {hint}")]
    ToolNotFound {
        /// Tool name or path as configured
        tool: String,
        /// What to do about it
        hint: String,
    },

    /// Spawning or waiting on a subprocess failed
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// Subprocess exited unsuccessfully
    #[error("{command} exited with {}{}", display_code(*code), display_tail(stderr_tail))]
    ToolExited {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Last lines written to stderr
        stderr_tail: Vec<String>,
    },

    /// Subprocess exceeded the configured timeout and was killed
    #[error("{command} timed out after {secs}s and was terminated")]
    TimedOut {
        /// Command line that timed out
        command: String,
        /// Timeout in seconds
        secs: u64,
    },

    /// Application entry point does not exist
    #[error("entry point {} does not exist", .0.display())]
    EntryPointMissing(PathBuf),

    /// Configured icon does not exist
    #[error("icon {} does not exist", .0.display())]
    IconMissing(PathBuf),

    /// Bundler exited successfully but the artifact is not where expected
    #[error("bundler reported success but no artifact exists at {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Filesystem operation failed
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

fn display_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn display_tail(tail: &[String]) -> String {
    if tail.is_empty() {
        String::new()
    } else {
        format!(":\n  {}", tail.join("\n  "))
    }
}

/// Attach a path and description to IO errors.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] carrying `context` and `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Turn an absent value into a [`Error::GenericError`].
pub trait Context<T> {
    /// Fail with `msg` when the value is missing.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.into()))
    }
}
