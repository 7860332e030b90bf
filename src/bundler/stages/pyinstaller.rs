//! Executable bundling through PyInstaller.

use crate::bundler::{Result, Settings, utils::ToolCommand};
use crate::cli::OutputManager;
use std::path::{Path, PathBuf};

/// Full PyInstaller invocation for `settings`.
///
/// `--noconfirm` lets a rerun replace the previous artifact in place.
pub fn pyinstaller_command(python: &Path, settings: &Settings) -> ToolCommand {
    let mut cmd = ToolCommand::new(python)
        .args(["-m", "PyInstaller", "--noconfirm"])
        .arg(settings.output_mode().flag())
        .arg(settings.console_mode().flag())
        .arg("--name")
        .arg(settings.display_name().as_str())
        .arg("--distpath")
        .arg(settings.dist_dir())
        .arg("--workpath")
        .arg(settings.work_dir())
        .arg("--specpath")
        .arg(settings.spec_dir());

    if let Some(icon) = settings.icon() {
        cmd = cmd.arg("--icon").arg(icon);
    }

    cmd.arg(settings.entry_point())
}

/// Runs PyInstaller and returns where the artifact should now be.
///
/// The caller checks that the file actually exists.
pub async fn bundle_project(
    python: &Path,
    settings: &Settings,
    output: &OutputManager,
) -> Result<PathBuf> {
    log::info!(
        "Bundling {} as {}",
        settings.entry_point().display(),
        settings.display_name()
    );
    pyinstaller_command(python, settings)
        .run(settings.timeout(), output)
        .await?;
    Ok(settings.artifact_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{ConsoleMode, OutputMode, SettingsBuilder};

    #[test]
    fn default_invocation_is_onefile_windowed() {
        let settings = SettingsBuilder::new()
            .display_name("DisplayName")
            .entry_point("app_entry.py")
            .build()
            .unwrap();
        let cmd = pyinstaller_command(Path::new("python3"), &settings);
        assert_eq!(
            cmd.display(),
            "python3 -m PyInstaller --noconfirm --onefile --windowed --name DisplayName \
             --distpath dist --workpath build --specpath . app_entry.py"
        );
    }

    #[test]
    fn icon_and_modes_are_forwarded() {
        let settings = SettingsBuilder::new()
            .display_name("App")
            .entry_point("main.py")
            .icon("app.ico")
            .output_mode(OutputMode::OneDir)
            .console_mode(ConsoleMode::Visible)
            .build()
            .unwrap();
        let cmd = pyinstaller_command(Path::new("python"), &settings);
        let args: Vec<String> = cmd
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"--onedir".to_string()));
        assert!(args.contains(&"--console".to_string()));
        let icon = args.iter().position(|a| a == "--icon").unwrap();
        assert_eq!(args[icon + 1], "app.ico");
        assert_eq!(args.last().map(String::as_str), Some("main.py"));
    }
}
