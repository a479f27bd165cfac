//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn crytic_compile(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("crytic-compile"));
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

/// A truffle project under `<root>/project` with prebuilt artifacts.
fn write_truffle_project(root: &Path) {
    let project = root.join("project");
    fs::create_dir_all(project.join("contracts")).expect("mkdir contracts");
    fs::create_dir_all(project.join("build/contracts")).expect("mkdir build");
    fs::write(project.join("truffle-config.js"), "module.exports = {};").expect("write config");

    let source = project.join("contracts/MetaCoin.sol");
    fs::write(&source, "pragma solidity ^0.5.0;\ncontract MetaCoin {}\n").expect("write source");

    for (name, bytecode) in [("MetaCoin", "0x6080604052"), ("ConvertLib", "0x6056")] {
        let artifact = json!({
            "contractName": name,
            "abi": [],
            "bytecode": bytecode,
            "deployedBytecode": "0x6080",
            "sourceMap": "25:100:0",
            "deployedSourceMap": "25:50:0",
            "sourcePath": source.to_string_lossy(),
            "ast": {"nodeType": "SourceUnit", "absolutePath": "contracts/MetaCoin.sol"},
            "compiler": {"name": "solc", "version": "0.5.16+commit.9c3226ce.Emscripten.clang"}
        });
        fs::write(project.join(format!("build/contracts/{name}.json")), artifact.to_string())
            .expect("write artifact");
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read export")).expect("parse export")
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().expect("tmp");
    crytic_compile(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crytic-compile"));
}

#[test]
fn test_cli_help_lists_export_flags() {
    let tmp = TempDir::new().expect("tmp");
    crytic_compile(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--export-format"))
        .stdout(predicate::str::contains("--print-filenames"))
        .stdout(predicate::str::contains("--truffle-ignore-compile"));
}

#[test]
fn test_no_arguments_prints_help_and_exits_1() {
    let tmp = TempDir::new().expect("tmp");
    crytic_compile(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: crytic-compile contract.sol [flag]"));
    assert!(!tmp.path().join("crytic-export").exists());
}

#[test]
fn test_unresolved_target_exits_255_without_export() {
    let tmp = TempDir::new().expect("tmp");
    crytic_compile(tmp.path())
        .arg("missing/*.sol")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Unresolved target: missing/*.sol"));
    assert!(!tmp.path().join("crytic-export").exists());
}

#[test]
fn test_truffle_project_standard_export() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());

    crytic_compile(tmp.path())
        .args(["project", "--truffle-ignore-compile", "--export-src"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Compiling project with truffle"));

    let export = read_json(&tmp.path().join("crytic-export/project.json"));
    assert_eq!(export["type"], "truffle");
    assert_eq!(export["compiler"]["version"], "0.5.16");
    let source = tmp.path().join("project/contracts/MetaCoin.sol");
    let source = source.to_string_lossy();
    assert_eq!(export["contracts"][source.as_ref()]["MetaCoin"]["bin"], "6080604052");
    assert_eq!(
        export["contracts"][source.as_ref()]["MetaCoin"]["filenames"]["short"],
        "contracts/MetaCoin.sol"
    );
    assert!(export["sources"][source.as_ref()]["content"]
        .as_str()
        .is_some_and(|s| s.contains("contract MetaCoin")));
}

#[test]
fn test_print_filenames_lists_each_contract_once() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());

    let output = crytic_compile(tmp.path())
        .args(["project", "--truffle-ignore-compile", "--print-filenames"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).expect("utf8 stdout");

    assert_eq!(stdout.matches("MetaCoin -> ").count(), 1);
    assert_eq!(stdout.matches("ConvertLib -> ").count(), 1);
    assert!(stdout.contains("\tShort: contracts/MetaCoin.sol"));
    assert!(stdout.contains("\tRelative: project/contracts/MetaCoin.sol"));
}

#[test]
fn test_truffle_export_format_writes_artifacts() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());

    crytic_compile(tmp.path())
        .args(["project", "--truffle-ignore-compile", "--export-format", "truffle"])
        .args(["--export-dir", "out"])
        .assert()
        .success();

    let artifact = read_json(&tmp.path().join("out/MetaCoin.json"));
    assert_eq!(artifact["bytecode"], "0x6080604052");
    assert_eq!(artifact["ast"]["nodeType"], "SourceUnit");
    assert!(tmp.path().join("out/ConvertLib.json").is_file());
}

#[test]
fn test_solc_export_format_writes_combined_json() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());

    crytic_compile(tmp.path())
        .args(["project", "--truffle-ignore-compile", "--export-format", "solc"])
        .assert()
        .success();

    let combined = read_json(&tmp.path().join("crytic-export/combined_solc.json"));
    let key = format!(
        "{}:MetaCoin",
        tmp.path().join("project/contracts/MetaCoin.sol").to_string_lossy()
    );
    assert_eq!(combined["contracts"][key.as_str()]["bin"], "6080604052");
    assert_eq!(combined["version"], "0.5.16");
}

#[test]
fn test_remove_metadata_from_config() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());
    let hash = "ab".repeat(32);
    let artifact = tmp.path().join("project/build/contracts/MetaCoin.json");
    let mut value = read_json(&artifact);
    value["bytecode"] = Value::String(format!("0x6080a165627a7a72305820{hash}0029"));
    fs::write(&artifact, value.to_string()).expect("rewrite artifact");
    fs::write(
        tmp.path().join("crytic.config.json"),
        r#"{"compile_remove_metadata": true, "truffle_ignore_compile": true}"#,
    )
    .expect("write config");

    crytic_compile(tmp.path()).arg("project").assert().success();

    let export = read_json(&tmp.path().join("crytic-export/project.json"));
    let source = tmp.path().join("project/contracts/MetaCoin.sol");
    assert_eq!(export["contracts"][source.to_string_lossy().as_ref()]["MetaCoin"]["bin"], "6080");
}

#[test]
fn test_config_file_applies_when_cli_is_silent() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());
    fs::write(
        tmp.path().join("crytic.config.json"),
        r#"{"export_dir": "from-config", "truffle_ignore_compile": true}"#,
    )
    .expect("write config");

    crytic_compile(tmp.path()).arg("project").assert().success();

    assert!(tmp.path().join("from-config/project.json").is_file());
    assert!(!tmp.path().join("crytic-export").exists());
}

#[test]
fn test_cli_flag_beats_config_file() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());
    fs::write(
        tmp.path().join("settings.json"),
        r#"{"export_dir": "from-config", "truffle_ignore_compile": true}"#,
    )
    .expect("write config");

    crytic_compile(tmp.path())
        .args(["project", "--config-file", "settings.json", "--export-dir", "from-cli"])
        .assert()
        .success();

    assert!(tmp.path().join("from-cli/project.json").is_file());
    assert!(!tmp.path().join("from-config").exists());
}

#[test]
fn test_unknown_config_key_is_logged_and_ignored() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());
    fs::write(
        tmp.path().join("crytic.config.json"),
        r#"{"truffle_ignore_compile": true, "hardhat_cache_directory": "cache"}"#,
    )
    .expect("write config");

    crytic_compile(tmp.path())
        .arg("project")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "crytic.config.json has an unknown key: hardhat_cache_directory : \"cache\"",
        ));
}

#[test]
fn test_malformed_config_is_logged_and_run_continues() {
    let tmp = TempDir::new().expect("tmp");
    write_truffle_project(tmp.path());
    fs::write(tmp.path().join("crytic.config.json"), "{ \"export_dir\": ").expect("write config");

    crytic_compile(tmp.path())
        .args(["project", "--truffle-ignore-compile"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Impossible to read crytic.config.json"));

    assert!(tmp.path().join("crytic-export/project.json").is_file());
}

/// A `solc` stand-in at `<root>/bin/solc` that prints `output` with `$target`
/// replaced by the compiled file and `$dir` by its parent directory name.
#[cfg(unix)]
fn write_fake_solc(root: &Path, output: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("bin");
    fs::create_dir_all(&bin).expect("mkdir bin");
    let solc = bin.join("solc");
    let script = format!(
        "#!/bin/sh\nfor target; do :; done\ndir=$(basename \"$(dirname \"$target\")\")\ncat <<JSON\n{output}\nJSON\n"
    );
    fs::write(&solc, script).expect("write solc");
    fs::set_permissions(&solc, fs::Permissions::from_mode(0o755)).expect("chmod solc");
    solc
}

#[cfg(unix)]
#[test]
fn test_glob_targets_sharing_a_file_name_are_all_exported() {
    let tmp = TempDir::new().expect("tmp");
    for dir in ["a", "b"] {
        fs::create_dir_all(tmp.path().join(dir)).expect("mkdir");
        fs::write(tmp.path().join(dir).join("Token.sol"), "contract C {}").expect("write");
    }
    let solc = write_fake_solc(
        tmp.path(),
        r#"{"contracts": {"$target:C_$dir": {"abi": [], "bin": "6080"}}, "version": "0.8.19+commit.7dd6d404"}"#,
    );

    crytic_compile(tmp.path())
        .arg("**/Token.sol")
        .arg("--solc")
        .arg(&solc)
        .assert()
        .success();

    let first = read_json(&tmp.path().join("crytic-export/Token.sol.json"));
    let second = read_json(&tmp.path().join("crytic-export/Token.sol_1.json"));
    let a = tmp.path().join("a/Token.sol");
    let b = tmp.path().join("b/Token.sol");
    assert!(first["contracts"][a.to_string_lossy().as_ref()].get("C_a").is_some());
    assert!(second["contracts"][b.to_string_lossy().as_ref()].get("C_b").is_some());
}

#[cfg(unix)]
#[test]
fn test_malformed_solc_abi_exits_255() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("A.sol"), "contract A {}").expect("write");
    let solc = write_fake_solc(
        tmp.path(),
        r#"{"contracts": {"$target:A": {"abi": "[not json", "bin": ""}}, "version": "0.4.25"}"#,
    );

    crytic_compile(tmp.path())
        .arg("A.sol")
        .arg("--solc")
        .arg(&solc)
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Unable to parse abi of A.sol:A"));
    assert!(!tmp.path().join("crytic-export").exists());
}
