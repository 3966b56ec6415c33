//! Integration tests for the depprobe binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A project probing in search mode against its own `include/` directory.
///
/// Headers live under `depprobe_cli/` so nothing on the host's system
/// include path can satisfy them.
fn setup_project(headers: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let include = temp.path().join("include");
    fs::create_dir_all(include.join("depprobe_cli")).unwrap();
    for header in headers {
        fs::write(include.join("depprobe_cli").join(header), "").unwrap();
    }

    let dir = temp.path().join(".depprobe");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.yml"),
        format!(
            r#"
options:
  includedirs: ["{}"]
toolchain:
  mode: search
dependencies:
  - name: curl
    header: depprobe_cli/curl.h
    language: c
  - name: asio
    header: depprobe_cli/asio.hpp
  - name: icu
    header: depprobe_cli/icu.h
"#,
            include.display()
        ),
    )
    .unwrap();
    temp
}

fn depprobe(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env_remove("DEPPROBE_OS")
        .env_remove("DEPPROBE_LIBDIRS")
        .env_remove("DEPPROBE_INCLUDEDIRS")
        .env_remove("DEPPROBE_BOOSTSUFFIX")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("third-party libraries"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h", "asio.hpp", "icu.h"]);
    depprobe(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 dependencies found"));
    Ok(())
}

#[test]
fn cli_missing_dependency_exits_one_naming_it() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h", "icu.h"]);
    depprobe(&temp)
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing dependency: asio"))
        .stderr(predicate::str::contains("curl").not());
    Ok(())
}

#[test]
fn cli_stops_at_first_missing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h"]);
    depprobe(&temp)
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("asio"))
        .stderr(predicate::str::contains("icu").not());
    Ok(())
}

#[test]
fn cli_keep_going_names_every_miss() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h"]);
    depprobe(&temp)
        .args(["check", "--keep-going"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing dependency: asio"))
        .stderr(predicate::str::contains("Missing dependency: icu"));
    Ok(())
}

#[test]
fn cli_json_report_on_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h", "asio.hpp", "icu.h"]);
    let output = depprobe(&temp).args(["check", "--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["mode"], "search");
    assert_eq!(report["results"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["missing"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn cli_includedirs_assignment_finds_header() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&["curl.h", "asio.hpp"]);
    let extra = temp.path().join("extra");
    fs::create_dir_all(extra.join("depprobe_cli"))?;
    fs::write(extra.join("depprobe_cli/icu.h"), "")?;

    depprobe(&temp)
        .arg("check")
        .arg(format!("includedirs={}", extra.display()))
        .assert()
        .success();
    Ok(())
}

#[test]
fn cli_no_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    depprobe(&temp)
        .arg("--project")
        .arg(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn cli_unknown_option_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(&[]);
    depprobe(&temp)
        .args(["check", "prefix=/usr"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("prefix"));
    Ok(())
}

#[test]
fn cli_list_shows_preset_dependencies() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    depprobe(&temp)
        .args(["--project"])
        .arg(temp.path())
        .args(["--os", "linux", "list", "--preset", "spep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xerces-c"))
        .stdout(predicate::str::contains("asio"));
    Ok(())
}

#[test]
fn cli_env_reads_os_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    depprobe(&temp)
        .env("DEPPROBE_OS", "win32")
        .arg("--project")
        .arg(temp.path())
        .args(["env", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"platform\": \"windows\""));
    Ok(())
}

#[test]
fn cli_completions_generate() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("depprobe"));
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.args(["--debug", "--help"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("depprobe"));
    cmd.arg("bootstrap");
    cmd.assert().failure();
    Ok(())
}
