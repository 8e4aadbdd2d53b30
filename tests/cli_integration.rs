//! CLI integration tests for buildopts.
//!
//! These tests run the binary against small projects on disk and check the
//! report and value output.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[option]]
name = "greeting"
description = "a greeting"
default = "hello"

[[option]]
name = "debug"
type = "boolean"
description = "enable debug"
default = false
"#;

/// Get the buildopts binary command, isolated from the host environment.
fn buildopts(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("buildopts").unwrap();
    cmd.env_clear().current_dir(dir);
    cmd
}

/// Create a temporary project with the given root manifest.
fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("buildopts.toml"), manifest).unwrap();
    tmp
}

// ============================================================================
// buildopts report
// ============================================================================

#[test]
fn test_report_defaults() {
    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["--color", "never", "report"])
        .assert()
        .success()
        .stdout(
            "Configurable build options in : (the root project)\n\
             \n\
             debug    = false    # enable debug (type: boolean)\n\
             greeting = hello    # a greeting\n\
             \n\
             Option values color coded: default value, computed value, overridden value, no value\n",
        );
}

#[test]
fn test_report_environment_override() {
    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["report"])
        .env("BUILDOPTS_DEBUG", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "debug    = true     # enable debug (type: boolean, source: environment variable)",
        ));
}

#[test]
fn test_report_ignores_ambient_environment() {
    let tmp = project(
        r#"
[[option]]
name = "path"
description = "search path"
default = "lib"
"#,
    );

    buildopts(tmp.path())
        .args(["report"])
        .env("PATH", "/usr/bin:/bin")
        .assert()
        .success()
        .stdout(predicate::str::contains("path = lib      # search path\n"));
}

#[cfg(unix)]
#[test]
fn test_report_with_non_utf8_environment() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["report"])
        .env("UNRELATED", OsStr::from_bytes(b"\xff\xfe"))
        .env("BUILDOPTS_DEBUG", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("debug    = true"));
}

#[test]
fn test_report_member_outside_root_fails() {
    let tmp = project("[project]\nmembers = [\"../x\"]\n");

    buildopts(tmp.path())
        .args(["report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "members must be subdirectories of the root project",
        ));
}

#[test]
fn test_report_property_beats_options_file() {
    let tmp = project(MANIFEST);
    fs::write(tmp.path().join("build-options.toml"), "greeting = \"from-file\"\n").unwrap();

    buildopts(tmp.path())
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "greeting = from-file # a greeting (source: build-options.toml file)",
        ));

    buildopts(tmp.path())
        .args(["-P", "greeting=hi", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "greeting = hi       # a greeting (source: project property)",
        ));
}

#[test]
fn test_report_bad_boolean_fails() {
    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["-D", "debug=maybe", "report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Build option 'debug' is of type BOOLEAN and expects a 'true' or 'false' value but was: maybe",
        ));
}

#[test]
fn test_report_grouping() {
    let tmp = project(
        r#"
[[option]]
name = "tests.jvms"
description = "test JVMs"
default = "4"

[[option]]
name = "debug"
type = "boolean"
default = true

[[report.group]]
label = "Test options"
pattern = "tests\\..*"
"#,
    );

    buildopts(tmp.path())
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test options\n============\n"))
        .stdout(predicate::str::contains("Other options\n=============\n"));
}

#[test]
fn test_report_members() {
    let tmp = project(
        r#"
[project]
members = ["cli"]

[[option]]
name = "shared"
default = "x"
"#,
    );
    fs::create_dir_all(tmp.path().join("cli")).unwrap();
    fs::write(
        tmp.path().join("cli/buildopts.toml"),
        "[[option]]\nname = \"shared\"\ndefault = \"x\"\n",
    )
    .unwrap();

    buildopts(tmp.path())
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Configurable build options in 2 projects:\n",
        ))
        .stdout(predicate::str::contains("(in 2 projects)"));
}

#[test]
fn test_report_from_subdirectory() {
    let tmp = project(MANIFEST);
    let nested = tmp.path().join("src");
    fs::create_dir_all(&nested).unwrap();

    buildopts(&nested)
        .args(["report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting = hello"));
}

#[test]
fn test_missing_manifest() {
    let tmp = TempDir::new().unwrap();

    buildopts(tmp.path())
        .args(["report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `buildopts.toml`"))
        .stderr(predicate::str::contains("  1. Create a `buildopts.toml`"));
}

// ============================================================================
// buildopts value
// ============================================================================

#[test]
fn test_value_prints_current_value() {
    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["-P", "debug=TRUE", "value", "debug", "--source"])
        .assert()
        .success()
        .stdout("true (PROJECT_PROPERTY)\n");
}

#[test]
fn test_value_unknown_option() {
    let tmp = project(MANIFEST);

    buildopts(tmp.path())
        .args(["value", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build option 'nope' not found"))
        .stderr(predicate::str::contains("declared options: greeting, debug"))
        .stderr(predicate::str::contains(
            "  1. Run `buildopts report` to list all options",
        ));
}

#[test]
fn test_value_with_directory_flag() {
    let tmp = project(MANIFEST);

    buildopts(Path::new("/"))
        .args(["-C"])
        .arg(tmp.path())
        .args(["value", "greeting"])
        .assert()
        .success()
        .stdout("hello\n");
}

// ============================================================================
// buildopts completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    buildopts(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildopts"));
}
