//! End-to-end runs of the binary against a fake interpreter.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;

const FAKE_PYTHON: &str = include_str!("fixtures/fake_python.sh");

struct Project {
    dir: TempDir,
}

impl Project {
    /// Temp project with the fake interpreter, a manifest, and optionally an entry point.
    fn new(manifest: &str, with_entry: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let python = dir.path().join("tools/python");
        std::fs::create_dir_all(python.parent().unwrap()).unwrap();
        std::fs::write(&python, FAKE_PYTHON).unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        std::fs::write(dir.path().join("requirements.txt"), manifest).unwrap();
        if with_entry {
            std::fs::write(
                dir.path().join("app_entry.py"),
                "import sys\nprint('attendance')\n",
            )
            .unwrap();
        }
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn calls(&self) -> String {
        std::fs::read_to_string(self.path("calls.log")).unwrap_or_default()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("app_packager").unwrap();
        cmd.current_dir(self.dir.path())
            .env("FAKE_PYTHON_LOG", self.path("calls.log"))
            .env_remove("APP_PACKAGER_CONFIG")
            .env_remove("APP_PACKAGER_PYTHON")
            .arg("--python")
            .arg(self.path("tools/python"));
        cmd
    }

    fn build(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--name", "DisplayName", "--entry", "app_entry.py", "--no-pause"]);
        cmd
    }
}

#[test]
#[serial]
fn builds_artifact_and_reports_it() {
    let project = Project::new("library-a>=1.0\n", true);

    project
        .build()
        .assert()
        .success()
        .stdout(predicate::str::contains("Build complete: DisplayName"))
        .stdout(predicate::str::contains("dist/DisplayName"));

    assert!(project.path("dist/DisplayName").is_file());
    assert!(project.path("build/DisplayName.receipt.json").is_file());

    let calls = project.calls();
    let pip = calls.find("-m pip install").expect("pip was called");
    let bundler = calls.find("-m PyInstaller").expect("PyInstaller was called");
    assert!(pip < bundler, "install must precede bundling");
    assert!(calls.contains("--onefile --windowed --name DisplayName"));
}

#[test]
#[serial]
fn unresolvable_package_halts_before_bundling() {
    let project = Project::new("nonexistent-pkg-xyz\n", true);

    project
        .build()
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "No matching distribution found for nonexistent-pkg-xyz",
        ));

    assert!(!project.calls().contains("PyInstaller"));
    assert!(!project.path("dist").exists());
}

#[test]
#[serial]
fn invalid_manifest_never_reaches_pip() {
    let project = Project::new("library-a >=\n", true);

    project
        .build()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requirements.txt:1"));

    assert!(!project.calls().contains("pip"));
}

#[test]
#[serial]
fn missing_entry_point_writes_no_artifact() {
    let project = Project::new("library-a\n", false);

    project
        .build()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("entry point"));

    assert!(!project.calls().contains("PyInstaller"));
    assert!(!project.path("dist").exists());
}

#[test]
#[serial]
fn rerun_overwrites_in_place() {
    let project = Project::new("library-a\n", true);

    project.build().assert().success();
    project.build().assert().success();

    let entries: Vec<_> = std::fs::read_dir(project.path("dist"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("DisplayName")]);
    assert_eq!(project.calls().matches("-m PyInstaller").count(), 2);
}

#[test]
#[serial]
fn waits_for_acknowledgment_by_default() {
    let project = Project::new("library-a\n", true);

    project
        .cmd()
        .args(["--name", "DisplayName", "--entry", "app_entry.py"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Press any key to continue"));
}

#[test]
#[serial]
fn missing_interpreter_is_an_environment_error() {
    let project = Project::new("library-a\n", true);

    Command::cargo_bin("app_packager")
        .unwrap()
        .current_dir(project.dir.path())
        .args(["--python", "/nonexistent/python3", "--no-pause"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
#[serial]
fn invalid_display_name_is_a_configuration_error() {
    let project = Project::new("library-a\n", true);

    project
        .cmd()
        .args(["--name", "bad/name", "--no-pause"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));

    assert!(project.calls().is_empty());
}

#[test]
#[serial]
fn config_file_is_picked_up() {
    let project = Project::new("library-a\n", true);
    std::fs::write(
        project.path("packager.toml"),
        "display_name = \"FromConfig\"\nentry_point = \"app_entry.py\"\npause = false\n",
    )
    .unwrap();

    project.cmd().assert().success();

    assert!(project.path("dist/FromConfig").is_file());
}

#[test]
#[serial]
fn isolated_mode_builds_through_the_venv() {
    let project = Project::new("library-a\n", true);

    project
        .build()
        .args(["--isolated", "--venv-dir", "env"])
        .assert()
        .success();

    let venv_python = project.path("env/bin/python");
    assert!(venv_python.is_file());
    let calls = project.calls();
    assert!(calls.contains("-m venv env"));
    assert_eq!(calls.matches("-m PyInstaller").count(), 1);
    assert!(project.path("dist/DisplayName").is_file());
}

#[test]
#[serial]
fn onedir_mode_puts_executable_in_folder() {
    let project = Project::new("library-a\n", true);

    project.build().arg("--onedir").assert().success();

    assert!(project.path("dist/DisplayName/DisplayName").is_file());
}

#[test]
#[serial]
fn closed_stdout_does_not_fail_the_build() {
    let project = Project::new("library-a\n", true);

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("app_packager"))
        .current_dir(project.dir.path())
        .env("FAKE_PYTHON_LOG", project.path("calls.log"))
        .env_remove("APP_PACKAGER_CONFIG")
        .env_remove("APP_PACKAGER_PYTHON")
        .arg("--python")
        .arg(project.path("tools/python"))
        .args(["--name", "DisplayName", "--entry", "app_entry.py", "--no-pause"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    drop(child.stdout.take());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0));
    assert!(project.path("dist/DisplayName").is_file());
}
