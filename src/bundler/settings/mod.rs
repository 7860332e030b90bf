//! Configuration structures for the packaging pipeline.
//!
//! The build options the tool ships with live in [`defaults`]; a
//! [`SettingsBuilder`] layers overrides on top and validates the result into
//! an immutable [`Settings`].

mod builder;
mod core;
mod display_name;
mod modes;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use display_name::DisplayName;
pub use modes::{ConsoleMode, EnvironmentMode, OutputMode};

/// Fixed configuration used when nothing overrides it.
pub mod defaults {
    /// Executable name shown to end users.
    pub const DISPLAY_NAME: &str = "출석관리시스템";

    /// Application script, relative to the working directory.
    pub const ENTRY_POINT: &str = "attendance_app.py";

    /// Requirements file, relative to the working directory.
    pub const MANIFEST: &str = "requirements.txt";

    /// Interpreter that runs pip and PyInstaller.
    #[cfg(windows)]
    pub const PYTHON: &str = "python";
    /// Interpreter that runs pip and PyInstaller.
    #[cfg(not(windows))]
    pub const PYTHON: &str = "python3";

    pub const DIST_DIR: &str = "dist";
    pub const WORK_DIR: &str = "build";
    pub const SPEC_DIR: &str = ".";

    /// Virtual environment used in isolated mode.
    pub const VENV_DIR: &str = ".packager-venv";
}
