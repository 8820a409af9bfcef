//! CLI integration tests for zigchain.
//!
//! These tests drive the binary against a fake `zig` script that prints a
//! canned `zig targets` document, so they don't need zig installed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const ZIG_TARGETS: &str = r#".{
 .arch = .{
  "aarch64",
  "x86_64",
 },
 .os = .{
  "linux",
  "macos",
  "windows",
 },
 .libc = .{
  "aarch64-linux-gnu",
  "aarch64-macos-none",
  "x86_64-linux-gnu",
  "x86_64-windows-gnu",
 },
 .native = .{
  .triple = "x86_64-linux.6.1...6.1-gnu.2.36",
  .os = "linux",
  .abi = "gnu",
 },
}"#;

/// Get the zigchain binary command, isolated from the user's environment.
fn zigchain(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zigchain").unwrap();
    cmd.env_remove("ZIG").env("HOME", home);
    cmd
}

/// Write an executable shell script named `zig` into `dir`.
fn write_zig(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("zig");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A fake zig that answers `zig targets` with the fixture above.
fn fake_zig(dir: &Path) -> PathBuf {
    write_zig(
        dir,
        &format!(
            "[ \"$1\" = targets ] || exit 64\ncat <<'EOF'\n{}\nEOF",
            ZIG_TARGETS
        ),
    )
}

fn cmake_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".cmake"))
        .collect();
    names.sort();
    names
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_no_targets_lists_universe() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::eq(
            "Available targets:\n\
             aarch64-linux-gnu\n\
             aarch64-macos-none\n\
             x86_64-linux-gnu\n\
             x86_64-windows-gnu\n",
        ));

    assert!(cmake_files(tmp.path()).is_empty());
}

#[test]
fn test_list_json() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());

    let output = zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .arg("--json")
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names.len(), 4);
    assert_eq!(names[0], "aarch64-linux-gnu");
}

#[test]
fn test_zig_from_environment() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());

    zigchain(tmp.path())
        .env("ZIG", &zig)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("x86_64-windows-gnu"));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generate_selected_targets() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    let out = tmp.path().join("cmake").join("toolchains");

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .args(["-t", "x86_64-windows-gnu", "-t", "x86_64-windows-gnu"])
        .args(["--target", "aarch64-macos-none"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished 2 toolchain file(s)"));

    assert_eq!(
        cmake_files(&out),
        vec!["aarch64-macos-none.cmake", "x86_64-windows-gnu.cmake"]
    );

    let windows = fs::read_to_string(out.join("x86_64-windows-gnu.cmake")).unwrap();
    assert!(windows.starts_with("if ( NOT CMAKE_GENERATOR STREQUAL \"Ninja\" )\n"));
    assert!(windows.contains("set ( CMAKE_C_COMPILER_ARG1 \"cc\" )"));
    assert!(windows.contains("set ( ZIG_LIBC \"gnu\" )"));
    assert!(windows.contains("set ( CMAKE_SYSTEM_NAME \"Windows\" )"));
    assert!(windows.ends_with("set ( CMAKE_SYSTEM_PROCESSOR \"AMD64\" )"));

    let macos = fs::read_to_string(out.join("aarch64-macos-none.cmake")).unwrap();
    assert!(macos.contains("set ( CMAKE_SYSTEM_NAME \"Darwin\" )"));
    assert!(macos.contains("set ( CMAKE_SYSTEM_PROCESSOR \"aarch64\" )"));
}

#[test]
fn test_generate_all_ignores_targets() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    let out = tmp.path().join("out");

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .args(["--all", "--target", "not-a-target", "-j", "2"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        cmake_files(&out),
        vec![
            "aarch64-linux-gnu.cmake",
            "aarch64-macos-none.cmake",
            "x86_64-linux-gnu.cmake",
            "x86_64-windows-gnu.cmake",
        ]
    );
}

#[test]
fn test_generate_defaults_to_current_directory() {
    let tmp = TempDir::new().unwrap();
    let bin = tmp.path().join("bin");
    fs::create_dir(&bin).unwrap();
    let zig = fake_zig(&bin);

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .args(["-t", "x86_64-linux-gnu"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("x86_64-linux-gnu.cmake").is_file());
}

#[test]
fn test_generate_is_reproducible() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");

    for out in [&first, &second] {
        zigchain(tmp.path())
            .arg("--zig")
            .arg(&zig)
            .arg("-a")
            .arg("-o")
            .arg(out)
            .assert()
            .success();
    }

    for name in cmake_files(&first) {
        assert_eq!(
            fs::read(first.join(&name)).unwrap(),
            fs::read(second.join(&name)).unwrap()
        );
    }
}

#[test]
fn test_project_config_output_dir() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    fs::create_dir(tmp.path().join(".zigchain")).unwrap();
    fs::write(
        tmp.path().join(".zigchain").join("config.toml"),
        format!(
            "[frontend]\npath = \"{}\"\n\n[output]\ndir = \"toolchains\"\n",
            zig.display()
        ),
    )
    .unwrap();

    zigchain(tmp.path())
        .args(["-t", "aarch64-linux-gnu"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp
        .path()
        .join("toolchains")
        .join("aarch64-linux-gnu.cmake")
        .is_file());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_invalid_targets_are_all_reported() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    let out = tmp.path().join("out");

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .args(["-t", "z", "-t", "x86_64-linux-gnu", "-t", "riscv64-linux-musl"])
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("2 invalid targets"))
        .stderr(predicate::str::contains("  z\n"))
        .stderr(predicate::str::contains("  riscv64-linux-musl\n"));

    // Nothing written, not even the output directory
    assert!(!out.exists());
}

#[test]
fn test_zig_failure_is_reported() {
    let tmp = TempDir::new().unwrap();
    let zig = write_zig(tmp.path(), "echo 'error: out of memory' >&2\nexit 1");

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .arg("--all")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("`zig targets` failed with exit code 1"))
        .stderr(predicate::str::contains("error: out of memory"));
}

#[test]
fn test_unexpected_zig_output_is_reported() {
    let tmp = TempDir::new().unwrap();
    let zig = write_zig(tmp.path(), "echo '.{ .arch = .{ \"x86_64\" } }'");

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not read the target list from `zig targets`",
        ));
}

#[test]
fn test_missing_zig_is_reported() {
    let tmp = TempDir::new().unwrap();

    zigchain(tmp.path())
        .arg("--zig")
        .arg(tmp.path().join("no-such-zig"))
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("configured zig executable not found"));
}

#[test]
fn test_unwritable_output_is_reported() {
    let tmp = TempDir::new().unwrap();
    let zig = fake_zig(tmp.path());
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "file in the way").unwrap();

    zigchain(tmp.path())
        .arg("--zig")
        .arg(&zig)
        .args(["-t", "x86_64-linux-gnu"])
        .arg("-o")
        .arg(&blocker)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create directory"))
        .stderr(predicate::str::contains("blocker"));
}

// ============================================================================
// zigchain completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    zigchain(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zigchain"));
}
