//! Integration tests for the `ascend` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const REQUIRED: [(&str, &str); 7] = [
    ("--property-name", "Oak Manor"),
    ("--year-of-construction", "1925"),
    ("--size-of-the-property", "2"),
    ("--size-of-the-home", "180"),
    ("--number-of-rooms", "6"),
    ("--nearby-amenities", "schools"),
    ("--geographical-features", "near a lake"),
];

fn ascend() -> Command {
    let mut cmd = Command::cargo_bin("ascend").expect("binary exists");
    cmd.env("RUST_LOG", "info");
    cmd
}

fn with_required(cmd: &mut Command) -> &mut Command {
    for (flag, value) in REQUIRED {
        cmd.arg(flag).arg(value);
    }
    cmd
}

#[test]
fn version_prints_package() {
    ascend()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ascend_cli"));
}

#[test]
fn prompt_contains_every_value() {
    let mut cmd = ascend();
    cmd.arg("prompt");
    with_required(&mut cmd)
        .args(["--architectural-style", "Tudor Revival"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales Description Request for Oak Manor"))
        .stdout(predicate::str::contains("- Year of Construction: 1925"))
        .stdout(predicate::str::contains("near a lake"))
        .stdout(predicate::str::contains("- Architectural Style: Tudor Revival"));
}

#[test]
fn prompt_reports_missing_required_fields() {
    ascend()
        .args(["prompt", "--property-name", "Oak Manor"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("yearOfConstruction"))
        .stderr(predicate::str::contains("Geographical Features is required."))
        .stderr(predicate::str::contains("propertyName:").not());
}

#[test]
fn generate_validates_before_contacting_server() {
    // Nothing listens on the discard port; a validation failure must come first.
    ascend()
        .args(["generate", "--server", "http://127.0.0.1:9"])
        .args(["--property-name", "Oak Manor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Number of Rooms is required."))
        .stderr(predicate::str::contains("Http::").not());
}

#[test]
fn generate_reports_unreachable_server() {
    let mut cmd = ascend();
    cmd.args(["generate", "--server", "http://127.0.0.1:9"]);
    with_required(&mut cmd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Http::"));
}
