//! Command line argument parsing and validation.
//!
//! Every option is optional. With none given the tool builds exactly the
//! configuration it ships with.

use crate::bundler::{ConsoleMode, OutputMode, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Package a Python desktop application into a standalone executable
#[derive(Parser, Debug, Default)]
#[command(
    name = "app_packager",
    version,
    about = "Package a Python desktop application into a standalone executable",
    long_about = "Installs the application's requirements with pip, bundles the entry point into a \
single windowed executable with PyInstaller, then reports where the executable is.

Run with no arguments to build attendance_app.py from requirements.txt into dist/.

Usage:
  app_packager
  app_packager --name Attendance --entry app.py --icon app.ico
  app_packager --isolated --timeout 1800 --no-pause

Exit codes: 0 done, 1 configuration error, 2 dependency installation failed, 3 bundling failed."
)]
pub struct Args {
    /// TOML config file (default: packager.toml if present)
    #[arg(short = 'c', long, value_name = "PATH", env = "APP_PACKAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Executable display name
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Application entry point script
    #[arg(short = 'e', long, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Requirements manifest
    #[arg(short = 'r', long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Executable icon
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Python interpreter that runs pip and PyInstaller
    #[arg(long, value_name = "PROGRAM", env = "APP_PACKAGER_PYTHON")]
    pub python: Option<String>,

    /// Directory receiving the executable
    #[arg(long, value_name = "PATH")]
    pub dist_dir: Option<PathBuf>,

    /// Bundler staging directory
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Directory for the generated .spec file
    #[arg(long, value_name = "PATH")]
    pub spec_dir: Option<PathBuf>,

    /// Produce a folder instead of a single file
    #[arg(long)]
    pub onedir: bool,

    /// Show a console window next to the application
    #[arg(long)]
    pub console: bool,

    /// Install dependencies into a private virtual environment
    #[arg(long)]
    pub isolated: bool,

    /// Virtual environment directory for --isolated
    #[arg(long, value_name = "PATH")]
    pub venv_dir: Option<PathBuf>,

    /// Kill any tool running longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Exit without waiting for a keypress
    #[arg(long)]
    pub no_pause: bool,

    /// Show extra detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors and tool diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layers command line overrides on top of `builder`.
    ///
    /// Flags only override when given; an absent switch keeps whatever the
    /// config file chose.
    pub fn apply(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(name) = &self.name {
            builder = builder.display_name(name.clone());
        }
        if let Some(entry) = &self.entry {
            builder = builder.entry_point(entry);
        }
        if let Some(manifest) = &self.manifest {
            builder = builder.manifest(manifest);
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon);
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
        if self.onedir {
            builder = builder.output_mode(OutputMode::OneDir);
        }
        if self.console {
            builder = builder.console_mode(ConsoleMode::Visible);
        }
        if self.isolated {
            builder = builder.isolated(true);
        }
        if let Some(dir) = &self.venv_dir {
            builder = builder.venv_dir(dir);
        }
        if let Some(secs) = self.timeout {
            builder = builder.timeout_secs(secs);
        }
        if self.no_pause {
            builder = builder.pause(false);
        }
        builder
    }
}
