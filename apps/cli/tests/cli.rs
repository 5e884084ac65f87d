//! Exercises the `tl2swift` binary end to end

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn sample_schema() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../libs/tl-codegen/tests/fixtures/td_api_sample.tl")
}

fn tl2swift(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tl2swift"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = tl2swift(&[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_help_flag_prints_usage() {
    let output = tl2swift(&[OsStr::new("--help")]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--no-async-api"));
}

#[test]
fn test_generates_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let schema = sample_schema();

    let output = tl2swift(&[schema.as_os_str(), dir.path().as_os_str()]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("TdApi.swift").is_file());
    assert!(dir.path().join("AsyncTdApi.swift").is_file());
    assert!(dir.path().join("Models/User.swift").is_file());
    assert!(dir.path().join("Functions/SetOption.swift").is_file());
    assert!(!dir.path().join("schema.json").exists());
}

#[test]
fn test_flags_shape_output() {
    let dir = tempfile::tempdir().unwrap();
    let schema = sample_schema();

    let output = tl2swift(&[
        schema.as_os_str(),
        dir.path().as_os_str(),
        OsStr::new("--no-async-api"),
        OsStr::new("--no-docs"),
        OsStr::new("--emit-ir"),
    ]);

    assert!(output.status.success());
    assert!(dir.path().join("TdApi.swift").is_file());
    assert!(!dir.path().join("AsyncTdApi.swift").exists());
    assert!(dir.path().join("schema.json").is_file());
    let user = fs::read_to_string(dir.path().join("Models/User.swift")).unwrap();
    assert!(!user.contains("/// First name of the user"));
}

#[test]
fn test_malformed_schema_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("broken.tl");
    fs::write(&schema, "ok = Ok\n").unwrap();
    let out = dir.path().join("out");

    let output = tl2swift(&[schema.as_os_str(), out.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing ';' terminator"));
    assert!(!out.exists());
}

#[test]
fn test_missing_schema_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.tl");

    let output = tl2swift(&[missing.as_os_str(), dir.path().as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("generating Swift sources"));
}
