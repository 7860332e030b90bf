//! Bundler output and environment modes.

use std::path::{Path, PathBuf};

/// How the bundler lays out the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything packed into one self-extracting executable.
    #[default]
    OneFile,
    /// Executable plus its support files in a folder named after it.
    OneDir,
}

impl OutputMode {
    /// PyInstaller flag selecting this mode.
    pub fn flag(self) -> &'static str {
        match self {
            Self::OneFile => "--onefile",
            Self::OneDir => "--onedir",
        }
    }
}

/// Whether the executable opens a console window next to its GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMode {
    /// Windowed application, no console.
    #[default]
    Hidden,
    /// Console window shown alongside the application.
    Visible,
}

impl ConsoleMode {
    /// PyInstaller flag selecting this mode.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Hidden => "--windowed",
            Self::Visible => "--console",
        }
    }
}

/// Where dependencies are installed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvironmentMode {
    /// Install into whatever environment the configured interpreter uses.
    #[default]
    Shared,
    /// Install into a dedicated virtual environment.
    Isolated {
        /// Virtual environment directory, created on first use.
        venv_dir: PathBuf,
    },
}

impl EnvironmentMode {
    /// Virtual environment directory when isolated.
    pub fn venv_dir(&self) -> Option<&Path> {
        match self {
            Self::Shared => None,
            Self::Isolated { venv_dir } => Some(venv_dir),
        }
    }
}
