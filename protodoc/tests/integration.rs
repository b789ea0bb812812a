use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const STALE: &str = "stale contents\n";

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_protodoc")));
    cmd.env("RUST_LOG", "info").env_remove("PROTODOC_LOG_FORMAT");
    cmd
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Temporary directory holding an existing output document.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("configuration.rst");
    fs::write(&output, STALE).unwrap();
    (dir, output)
}

fn write_proto(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// -- generation --

#[test]
fn generates_expected_document() {
    let (_dir, output) = workspace();

    cmd()
        .arg("--root")
        .arg(fixture_path("tree"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let actual = fs::read_to_string(&output).unwrap();
    let expected = fs::read_to_string(fixture_path("configuration.expected.rst")).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn second_run_is_byte_identical() {
    let (_dir, output) = workspace();

    let run = || {
        cmd()
            .arg("-r")
            .arg(fixture_path("tree"))
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        fs::read(&output).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn trajectory_example_renders_placeholder() {
    let (dir, output) = workspace();
    let root = dir.path().join("src");
    write_proto(
        &root,
        "demo.proto",
        "package proto.demo;\n\n// Speed in meters.\nmessage TrajectoryOptions {\n  optional double speed = 1;\n}\n",
    );

    cmd().arg("-r").arg(&root).arg("-o").arg(&output).assert().success();

    let actual = fs::read_to_string(&output).unwrap();
    assert!(actual.contains(
        "proto.demo.Trajectory\n=====================\n\nSpeed in meters.\n\nspeed\n  Not yet documented.\n"
    ));
    assert!(!actual.contains(STALE));
}

#[test]
fn groups_are_sorted_across_files() {
    let (dir, output) = workspace();
    let root = dir.path().join("src");
    write_proto(&root, "z/b.proto", "package b;\nmessage ZOptions {\n}\n");
    write_proto(
        &root,
        "a.proto",
        "package a;\nmessage YOptions {\n}\nmessage XOptions {\n}\n",
    );

    cmd().arg("-r").arg(&root).arg("-o").arg(&output).assert().success();

    let actual = fs::read_to_string(&output).unwrap();
    let x = actual.find("a.X\n===").unwrap();
    let y = actual.find("a.Y\n===").unwrap();
    let z = actual.find("b.Z\n===").unwrap();
    assert!(x < y && y < z);
}

#[test]
fn next_id_markers_never_reach_output() {
    let (_dir, output) = workspace();

    cmd()
        .arg("-r")
        .arg(fixture_path("tree"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let actual = fs::read_to_string(&output).unwrap();
    assert!(!actual.contains("NEXT ID"));
}

#[test]
fn custom_prefix_replaces_preamble() {
    let (dir, output) = workspace();
    let prefix = dir.path().join("prefix.rst");
    fs::write(&prefix, "Options\n=======\n\n").unwrap();

    cmd()
        .arg("-r")
        .arg(fixture_path("tree"))
        .arg("-o")
        .arg(&output)
        .arg("-p")
        .arg(&prefix)
        .assert()
        .success();

    let actual = fs::read_to_string(&output).unwrap();
    assert!(actual.starts_with("Options\n=======\n\ncartographer.mapping.proto.MapBuilder\n"));
}

#[test]
fn progress_is_logged_to_stderr() {
    let (_dir, output) = workspace();

    cmd()
        .arg("-r")
        .arg(fixture_path("tree"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("found definition file"))
        .stderr(predicate::str::contains("wrote configuration reference"));
}

// -- failures leave the output untouched --

#[test]
fn duplicate_groups_abort_without_writing() {
    let (_dir, output) = workspace();

    cmd()
        .arg("-r")
        .arg(fixture_path("duplicate"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "duplicate option message `cartographer.mapping.proto.Submaps`",
        ));

    assert_eq!(fs::read_to_string(&output).unwrap(), STALE);
}

#[test]
fn required_field_aborts_without_writing() {
    let (dir, output) = workspace();
    let root = dir.path().join("src");
    write_proto(&root, "good.proto", "package a;\nmessage GoodOptions {\n}\n");
    write_proto(
        &root,
        "bad.proto",
        "package a;\nmessage BadOptions {\n  required int32 count = 1;\n}\n",
    );

    cmd()
        .arg("-r")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.proto:3"))
        .stderr(predicate::str::contains("required fields are not supported"));

    assert_eq!(fs::read_to_string(&output).unwrap(), STALE);
}

#[test]
fn unterminated_package_aborts_without_writing() {
    let (dir, output) = workspace();
    let root = dir.path().join("src");
    write_proto(&root, "bad.proto", "syntax = \"proto2\";\npackage a\n");

    cmd()
        .arg("-r")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not end with ';'"));

    assert_eq!(fs::read_to_string(&output).unwrap(), STALE);
}

// -- preconditions --

#[test]
fn missing_output_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("configuration.rst");

    cmd()
        .arg("-r")
        .arg(fixture_path("tree"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid output document"))
        .stderr(predicate::str::contains("does not exist"));

    assert!(!output.exists());
}

#[test]
fn root_must_be_a_directory() {
    let (_dir, output) = workspace();

    cmd()
        .arg("-r")
        .arg(&output)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));

    assert_eq!(fs::read_to_string(&output).unwrap(), STALE);
}

#[cfg(unix)]
#[test]
fn symlinked_output_is_refused() {
    let (dir, output) = workspace();
    let link = dir.path().join("link.rst");
    std::os::unix::fs::symlink(&output, &link).unwrap();

    cmd()
        .arg("-r")
        .arg(fixture_path("tree"))
        .arg("-o")
        .arg(&link)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a symbolic link"));

    assert_eq!(fs::read_to_string(&output).unwrap(), STALE);
}
