//! Tests of the `geonorm` binary: exit codes and stderr
//!
//! Every run happens in a temporary directory that also serves as `HOME`, so
//! no `geonorm.toml` from the machine running the tests is picked up.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn geonorm(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geonorm"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("USERPROFILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run geonorm")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace_with(name: &str, contents: &[u8]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(name), contents).unwrap();
    dir
}

#[test]
fn test_scale_succeeds() {
    let dir = workspace_with("model.obj", b"v 1 2 3\nv -1 0 1\n");
    let output = geonorm(dir.path(), &["transform", "model.obj", "2"]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("max  1.0000   2.0000   3.0000"), "{err}");
    assert!(err.contains("Created file"), "{err}");
    assert_eq!(
        fs::read_to_string(dir.path().join("model_.obj")).unwrap(),
        "v  2.000000   4.000000   6.000000\nv -2.000000   0.000000   2.000000\n"
    );
}

#[test]
fn test_report_only_writes_nothing() {
    let dir = workspace_with("model.obj", b"v 1 2 3\n");
    let output = geonorm(dir.path(), &["transform", "model.obj"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.path().join("model_.obj").exists());
}

#[test]
fn test_bad_scale_factor_exits_2() {
    for factor in ["0", "-2", "nan"] {
        // no input file exists: arguments are checked first
        let dir = tempfile::tempdir().unwrap();
        let output = geonorm(dir.path(), &["transform", "model.obj", factor]);
        assert_eq!(output.status.code(), Some(2), "factor {factor}");
        assert!(stderr(&output).starts_with("ERROR! "), "factor {factor}");
    }
}

#[test]
fn test_unknown_extension_exits_2() {
    let dir = workspace_with("figure.txt", b"*\n0 0 1 1\n0\n");
    let output = geonorm(dir.path(), &["transform", "figure.txt"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_usage_error_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = geonorm(dir.path(), &["transform", "model.obj", "1", "2", "3", "4"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_input_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let output = geonorm(dir.path(), &["unitize", "absent.obj"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).starts_with("ERROR! "));
}

#[test]
fn test_existing_output_exits_5() {
    let dir = workspace_with("model.obj", b"v 1 2 3\n");
    fs::write(dir.path().join("model_.obj"), "keep").unwrap();
    let output = geonorm(dir.path(), &["transform", "model.obj", "2"]);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(
        fs::read_to_string(dir.path().join("model_.obj")).unwrap(),
        "keep"
    );
}

#[test]
fn test_unitize_without_vertices_exits_8() {
    let dir = workspace_with("faces.obj", b"f 1 2 3\n");
    let output = geonorm(dir.path(), &["unitize", "faces.obj"]);
    assert_eq!(output.status.code(), Some(8));
    assert!(!dir.path().join("faces_.obj").exists());
}

#[test]
fn test_invalid_config_exits_9() {
    let dir = workspace_with("model.obj", b"v 1 2 3\n");
    fs::write(dir.path().join("bad.toml"), "mesh_precision = 99\n").unwrap();
    let output = geonorm(dir.path(), &["transform", "model.obj", "-c", "bad.toml"]);
    assert_eq!(output.status.code(), Some(9));
    assert!(stderr(&output).starts_with("ERROR! "));
}

#[test]
fn test_non_utf8_passthrough_round_trips() {
    let input: &[u8] = b"# caf\xe9 model\nv 1 2 3\ng r\xf6hre\n";
    let dir = workspace_with("model.obj", input);
    let output = geonorm(dir.path(), &["transform", "model.obj", "1"]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        fs::read(dir.path().join("model_.obj")).unwrap(),
        b"# caf\xe9 model\nv  1.000000   2.000000   3.000000\ng r\xf6hre\n"
    );
}

#[test]
fn test_silent_suppresses_report() {
    let dir = workspace_with("model.obj", b"v 1 2 3\n");
    let output = geonorm(dir.path(), &["transform", "model.obj", "2", "-S"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).is_empty());
}
