//! Builder for constructing Settings.

use super::{ConsoleMode, DisplayName, EnvironmentMode, OutputMode, Settings, defaults};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for constructing [`Settings`].
///
/// Every field starts unset and falls back to the defaults in
/// [`defaults`](super::defaults) at [`build`](Self::build) time, so a bare
/// `SettingsBuilder::new().build()` reproduces the fixed configuration the
/// tool ships with. Setters can be applied in layers (config file, then
/// command line); later calls win.
///
/// # Examples
///
/// ```
/// use app_packager::bundler::{OutputMode, SettingsBuilder};
///
/// # fn example() -> app_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .display_name("Attendance")
///     .entry_point("attendance_app.py")
///     .manifest("requirements.txt")
///     .output_mode(OutputMode::OneFile)
///     .pause(false)
///     .build()?;
/// assert_eq!(settings.display_name().as_str(), "Attendance");
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug, Clone)]
pub struct SettingsBuilder {
    display_name: Option<String>,
    entry_point: Option<PathBuf>,
    manifest: Option<PathBuf>,
    icon: Option<PathBuf>,
    output_mode: Option<OutputMode>,
    console_mode: Option<ConsoleMode>,
    python: Option<String>,
    dist_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    spec_dir: Option<PathBuf>,
    isolated: Option<bool>,
    venv_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
    pause: Option<bool>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the executable display name.
    ///
    /// Default: [`defaults::DISPLAY_NAME`]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the application entry point.
    ///
    /// Default: [`defaults::ENTRY_POINT`]
    pub fn entry_point<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_point = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the requirements manifest.
    ///
    /// Default: [`defaults::MANIFEST`]
    pub fn manifest<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the executable icon.
    ///
    /// Default: None
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: [`OutputMode::OneFile`]
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = Some(mode);
        self
    }

    /// Default: [`ConsoleMode::Hidden`]
    pub fn console_mode(mut self, mode: ConsoleMode) -> Self {
        self.console_mode = Some(mode);
        self
    }

    /// Sets the interpreter used for both pip and PyInstaller.
    ///
    /// Default: [`defaults::PYTHON`]
    pub fn python(mut self, program: impl Into<String>) -> Self {
        self.python = Some(program.into());
        self
    }

    /// Default: [`defaults::DIST_DIR`]
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: [`defaults::WORK_DIR`]
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: [`defaults::SPEC_DIR`]
    pub fn spec_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.spec_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Installs dependencies into a private virtual environment.
    ///
    /// Default: false (shared environment)
    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = Some(isolated);
        self
    }

    /// Virtual environment location for isolated mode.
    ///
    /// Default: [`defaults::VENV_DIR`]
    pub fn venv_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.venv_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Kills any subprocess running longer than `secs`.
    ///
    /// Default: None (wait indefinitely)
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Default: true
    pub fn pause(mut self, pause: bool) -> Self {
        self.pause = Some(pause);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDisplayName`] if the name is not a valid file name
    /// - [`Error::GenericError`] for a zero timeout
    pub fn build(self) -> Result<Settings> {
        let display_name = DisplayName::new(
            self.display_name
                .unwrap_or_else(|| defaults::DISPLAY_NAME.to_string()),
        )?;

        let timeout = match self.timeout_secs {
            Some(0) => {
                return Err(Error::GenericError(
                    "timeout must be at least one second".into(),
                ));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let environment = if self.isolated.unwrap_or(false) {
            EnvironmentMode::Isolated {
                venv_dir: self
                    .venv_dir
                    .unwrap_or_else(|| PathBuf::from(defaults::VENV_DIR)),
            }
        } else {
            EnvironmentMode::Shared
        };

        Ok(Settings::new(
            display_name,
            self.entry_point
                .unwrap_or_else(|| PathBuf::from(defaults::ENTRY_POINT)),
            self.manifest
                .unwrap_or_else(|| PathBuf::from(defaults::MANIFEST)),
            self.icon,
            self.output_mode.unwrap_or_default(),
            self.console_mode.unwrap_or_default(),
            self.python.unwrap_or_else(|| defaults::PYTHON.to_string()),
            self.dist_dir
                .unwrap_or_else(|| PathBuf::from(defaults::DIST_DIR)),
            self.work_dir
                .unwrap_or_else(|| PathBuf::from(defaults::WORK_DIR)),
            self.spec_dir
                .unwrap_or_else(|| PathBuf::from(defaults::SPEC_DIR)),
            environment,
            timeout,
            self.pause.unwrap_or(true),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_builder_reproduces_fixed_configuration() {
        let settings = SettingsBuilder::new().build().unwrap();
        assert_eq!(settings.display_name().as_str(), "출석관리시스템");
        assert_eq!(settings.entry_point(), Path::new("attendance_app.py"));
        assert_eq!(settings.manifest_path(), Path::new("requirements.txt"));
        assert_eq!(settings.icon(), None);
        assert_eq!(settings.output_mode(), OutputMode::OneFile);
        assert_eq!(settings.console_mode(), ConsoleMode::Hidden);
        assert_eq!(settings.environment(), &EnvironmentMode::Shared);
        assert_eq!(settings.timeout(), None);
        assert!(settings.pause());
        assert_eq!(
            settings.artifact_path(),
            Path::new("dist").join(format!("출석관리시스템{}", std::env::consts::EXE_SUFFIX))
        );
    }

    #[test]
    fn later_setters_win() {
        let settings = SettingsBuilder::new()
            .display_name("First")
            .display_name("Second")
            .build()
            .unwrap();
        assert_eq!(settings.display_name().as_str(), "Second");
    }

    #[test]
    fn onedir_artifact_lives_in_named_folder() {
        let settings = SettingsBuilder::new()
            .display_name("App")
            .output_mode(OutputMode::OneDir)
            .dist_dir("out")
            .build()
            .unwrap();
        assert_eq!(
            settings.artifact_path(),
            Path::new("out")
                .join("App")
                .join(format!("App{}", std::env::consts::EXE_SUFFIX))
        );
    }

    #[test]
    fn isolated_uses_default_venv_dir() {
        let settings = SettingsBuilder::new().isolated(true).build().unwrap();
        assert_eq!(
            settings.environment().venv_dir(),
            Some(Path::new(defaults::VENV_DIR))
        );

        let shared = SettingsBuilder::new()
            .venv_dir("ignored")
            .build()
            .unwrap();
        assert_eq!(shared.environment().venv_dir(), None);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(SettingsBuilder::new().timeout_secs(0).build().is_err());
        let settings = SettingsBuilder::new().timeout_secs(90).build().unwrap();
        assert_eq!(settings.timeout(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn invalid_display_name_fails_build() {
        let err = SettingsBuilder::new()
            .display_name("out/app")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDisplayName { .. }));
    }

    #[test]
    fn receipt_goes_to_work_dir() {
        let settings = SettingsBuilder::new()
            .display_name("App")
            .work_dir("staging")
            .build()
            .unwrap();
        assert_eq!(
            settings.receipt_path(),
            Path::new("staging").join("App.receipt.json")
        );
    }
}
