//! Core Settings struct and implementations.

use super::{ConsoleMode, DisplayName, EnvironmentMode, OutputMode};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Build configuration for one pipeline run.
///
/// Constructed once via [`SettingsBuilder`](super::SettingsBuilder) and never
/// mutated afterwards. Every stage reads from the same instance.
///
/// # Examples
///
/// ```
/// use app_packager::bundler::SettingsBuilder;
///
/// # fn example() -> app_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .display_name("DisplayName")
///     .entry_point("app_entry.py")
///     .build()?;
///
/// assert!(settings.artifact_path().starts_with("dist"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Executable name.
    display_name: DisplayName,

    /// Application script handed to the bundler.
    entry_point: PathBuf,

    /// Requirements file read by the installer.
    manifest_path: PathBuf,

    /// Optional executable icon.
    icon: Option<PathBuf>,

    output_mode: OutputMode,
    console_mode: ConsoleMode,

    /// Interpreter program, resolved through `PATH` unless it contains a separator.
    python: String,

    /// Final artifact directory.
    dist_dir: PathBuf,

    /// Bundler staging directory; also receives the build receipt.
    work_dir: PathBuf,

    /// Directory for the generated `.spec` file.
    spec_dir: PathBuf,

    environment: EnvironmentMode,

    /// Per-subprocess timeout. `None` blocks until the tool exits.
    timeout: Option<Duration>,

    /// Wait for an operator keystroke after reporting.
    pause: bool,
}

impl Settings {
    /// Returns the display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Returns the application entry point.
    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    /// Returns the manifest path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the icon, if any.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Returns the output mode.
    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Returns the console mode.
    pub fn console_mode(&self) -> ConsoleMode {
        self.console_mode
    }

    /// Returns the configured interpreter program.
    pub fn python(&self) -> &str {
        &self.python
    }

    /// Returns the artifact directory.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the staging directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the spec file directory.
    pub fn spec_dir(&self) -> &Path {
        &self.spec_dir
    }

    /// Returns the environment mode.
    pub fn environment(&self) -> &EnvironmentMode {
        &self.environment
    }

    /// Returns the subprocess timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the reporter waits for acknowledgment.
    pub fn pause(&self) -> bool {
        self.pause
    }

    /// Deterministic location of the executable the bundler produces.
    ///
    /// - single file: `<dist>/<name><EXE_SUFFIX>`
    /// - directory: `<dist>/<name>/<name><EXE_SUFFIX>`
    pub fn artifact_path(&self) -> PathBuf {
        let file_name = self.display_name.executable_file_name();
        match self.output_mode {
            OutputMode::OneFile => self.dist_dir.join(file_name),
            OutputMode::OneDir => self
                .dist_dir
                .join(self.display_name.as_str())
                .join(file_name),
        }
    }

    /// Location of the JSON build receipt.
    pub fn receipt_path(&self) -> PathBuf {
        self.work_dir
            .join(format!("{}.receipt.json", self.display_name))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        display_name: DisplayName,
        entry_point: PathBuf,
        manifest_path: PathBuf,
        icon: Option<PathBuf>,
        output_mode: OutputMode,
        console_mode: ConsoleMode,
        python: String,
        dist_dir: PathBuf,
        work_dir: PathBuf,
        spec_dir: PathBuf,
        environment: EnvironmentMode,
        timeout: Option<Duration>,
        pause: bool,
    ) -> Self {
        Self {
            display_name,
            entry_point,
            manifest_path,
            icon,
            output_mode,
            console_mode,
            python,
            dist_dir,
            work_dir,
            spec_dir,
            environment,
            timeout,
            pause,
        }
    }
}
