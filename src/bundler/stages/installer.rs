//! Dependency installation through pip.

use crate::bundler::{Result, manifest::BuildManifest, utils::ToolCommand};
use crate::cli::OutputManager;
use std::path::Path;
use std::time::Duration;

/// `<python> -m pip install --disable-pip-version-check -r <manifest>`
pub fn pip_install_command(python: &Path, manifest: &BuildManifest) -> ToolCommand {
    ToolCommand::new(python)
        .args(["-m", "pip", "install", "--disable-pip-version-check", "-r"])
        .arg(manifest.path())
}

/// Installs everything the manifest lists into the interpreter's environment.
///
/// pip resolves versions and sources; any resolution failure surfaces as a
/// non-zero exit.
pub async fn install_requirements(
    python: &Path,
    manifest: &BuildManifest,
    timeout: Option<Duration>,
    output: &OutputManager,
) -> Result<()> {
    log::info!(
        "Installing {} requirement(s) from {}",
        manifest.requirements().count(),
        manifest.path().display()
    );
    pip_install_command(python, manifest)
        .run(timeout, output)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pip_reads_the_manifest_file() {
        let manifest =
            BuildManifest::parse(Path::new("requirements.txt"), "library-a>=1.0\n").unwrap();
        let cmd = pip_install_command(Path::new("python3"), &manifest);
        assert_eq!(
            cmd.display(),
            "python3 -m pip install --disable-pip-version-check -r requirements.txt"
        );
    }
}
