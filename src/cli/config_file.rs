//! Optional TOML configuration file.
//!
//! ```toml
//! display_name = "출석관리시스템"
//! entry_point = "attendance_app.py"
//! manifest = "requirements.txt"
//! icon = "assets/app.ico"
//! onefile = true
//! windowed = true
//! isolated = false
//! timeout_secs = 1800
//! pause = true
//! ```

use crate::bundler::{ConsoleMode, OutputMode, SettingsBuilder};
use anyhow::Context as _;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "packager.toml";

/// Settings overrides read from a config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub display_name: Option<String>,
    pub entry_point: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub icon: Option<PathBuf>,
    pub python: Option<String>,
    pub dist_dir: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub spec_dir: Option<PathBuf>,
    pub onefile: Option<bool>,
    pub windowed: Option<bool>,
    pub isolated: Option<bool>,
    pub venv_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub pause: Option<bool>,
}

impl FileConfig {
    /// Loads the config to use for this run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used if present and an empty config otherwise.
    pub async fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path).await,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if tokio::fs::try_exists(path).await.unwrap_or(false) {
                    Self::load(path).await
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE}; using built-in configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and parses `path`.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Layers these values on top of `builder`.
    pub fn apply(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(name) = &self.display_name {
            builder = builder.display_name(name.clone());
        }
        if let Some(path) = &self.entry_point {
            builder = builder.entry_point(path);
        }
        if let Some(path) = &self.manifest {
            builder = builder.manifest(path);
        }
        if let Some(path) = &self.icon {
            builder = builder.icon(path);
        }
        if let Some(python) = &self.python {
            builder = builder.python(python.clone());
        }
        if let Some(dir) = &self.dist_dir {
            builder = builder.dist_dir(dir);
        }
        if let Some(dir) = &self.work_dir {
            builder = builder.work_dir(dir);
        }
        if let Some(dir) = &self.spec_dir {
            builder = builder.spec_dir(dir);
        }
        if let Some(onefile) = self.onefile {
            builder = builder.output_mode(if onefile {
                OutputMode::OneFile
            } else {
                OutputMode::OneDir
            });
        }
        if let Some(windowed) = self.windowed {
            builder = builder.console_mode(if windowed {
                ConsoleMode::Hidden
            } else {
                ConsoleMode::Visible
            });
        }
        if let Some(isolated) = self.isolated {
            builder = builder.isolated(isolated);
        }
        if let Some(dir) = &self.venv_dir {
            builder = builder.venv_dir(dir);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout_secs(secs);
        }
        if let Some(pause) = self.pause {
            builder = builder.pause(pause);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let config: FileConfig = toml::from_str(
            r#"
            display_name = "Attendance"
            entry_point = "src/app.py"
            onefile = false
            windowed = false
            isolated = true
            venv_dir = "env"
            timeout_secs = 600
            pause = false
            "#,
        )
        .unwrap();

        let settings = config.apply(SettingsBuilder::new()).build().unwrap();
        assert_eq!(settings.display_name().as_str(), "Attendance");
        assert_eq!(settings.entry_point(), Path::new("src/app.py"));
        assert_eq!(settings.output_mode(), OutputMode::OneDir);
        assert_eq!(settings.console_mode(), ConsoleMode::Visible);
        assert_eq!(settings.environment().venv_dir(), Some(Path::new("env")));
        assert_eq!(settings.timeout().map(|t| t.as_secs()), Some(600));
        assert!(!settings.pause());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("displayname = \"x\"").is_err());
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::discover(Some(&dir.path().join("nope.toml")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[tokio::test]
    async fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packager.toml");
        std::fs::write(&path, "display_name = \"FromFile\"\n").unwrap();
        let config = FileConfig::load(&path).await.unwrap();
        assert_eq!(config.display_name.as_deref(), Some("FromFile"));
    }
}
