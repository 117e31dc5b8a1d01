
use std::fs;

use navigation_support::NavigationTestHarness;
use predicates::prelude::*;
use regex::Regex;
use serde_json::Value;

const EXIT_FROM_LANDING: &str = "DOWN,ENTER";
const CANCEL: &str = "END";
const FORWARD: &str = "END,UP,UP,ENTER";

#[test]
fn help_flag_prints_usage() {
    let harness = NavigationTestHarness::new();
    harness
        .command()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: image_wizard_cli"));
}

#[test]
fn landing_lists_create_and_exit() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(&[EXIT_FROM_LANDING], &[]);
    assert!(output.stdout.contains("=== Image Builder ==="));
    assert!(output.stdout.contains("Create a new image"));
    assert!(output.stdout.contains("Exit"));
}

#[test]
fn cancel_from_first_step_returns_to_landing() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(&["ENTER", CANCEL, EXIT_FROM_LANDING], &[]);
    assert!(
        output.stdout.contains("Image creation cancelled."),
        "Expected cancellation notice\n{}",
        output.stdout
    );
    assert_eq!(output.stdout.matches("=== Image Builder ===").count(), 2);
    assert!(!harness.requests_dir().exists());
}

#[test]
fn release_step_renders_sidebar_and_disabled_back() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(&["ENTER", CANCEL, EXIT_FROM_LANDING], &[]);
    assert!(output.stdout.contains("Create a new image"));
    assert!(output.stdout.contains("> Release"));
    assert!(output.stdout.contains("  Target environment"));
    assert!(output
        .stdout
        .contains("[ Next ]  [ Back (disabled) ]  [ Cancel ]"));
}

#[test]
fn back_on_first_step_is_reported_and_ignored() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(
        &["ENTER", "END,UP,ENTER", CANCEL, EXIT_FROM_LANDING],
        &[],
    );
    assert!(output
        .stdout
        .contains("WARNING: Back is disabled on the first step."));
    assert!(output.stdout.contains("Image creation cancelled."));
}

#[test]
fn sidebar_jump_reaches_review_without_data() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(
        &["ENTER", "DOWN,DOWN,DOWN,DOWN,ENTER", CANCEL, EXIT_FROM_LANDING],
        &[],
    );
    assert!(output
        .stdout
        .contains("Review the information and click Create image"));
    assert!(output.stdout.contains("[ Create ]  [ Back ]  [ Cancel ]"));
    assert!(output.stdout.contains("[unfilled]"));
}

#[test]
fn incomplete_create_keeps_wizard_open() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(
        &[
            "ENTER",
            "DOWN,DOWN,DOWN,DOWN,ENTER",
            FORWARD,
            CANCEL,
            EXIT_FROM_LANDING,
        ],
        &[],
    );
    assert!(
        output.stdout.contains("Image request is incomplete"),
        "Expected incomplete request error\n{}",
        output.stdout
    );
    assert!(output.stdout.contains("Image creation cancelled."));
    assert!(!harness.requests_dir().exists());
}

#[test]
fn full_walkthrough_writes_request_file() {
    let harness = NavigationTestHarness::new();
    let output = harness.run_interactive(
        &[
            "ENTER",
            // Release: open the select and take the first release.
            "ENTER",
            "ENTER",
            FORWARD,
            // Target environment: access key, secret, bucket.
            "DOWN,ENTER",
            "DOWN,DOWN,ENTER",
            "DOWN,DOWN,DOWN,ENTER",
            FORWARD,
            // Registration keeps the default (register later).
            FORWARD,
            // Review: Create.
            FORWARD,
            EXIT_FROM_LANDING,
        ],
        &["AKIAEXAMPLE", "s3cr3t", "images"],
    );

    let saved = Regex::new(r"SUCCESS: Image request [0-9a-f-]{36} saved to")
        .expect("valid regex");
    assert!(
        saved.is_match(&output.stdout),
        "Expected success message\n{}",
        output.stdout
    );
    assert!(!output.stdout.contains("s3cr3t"), "secret leaked to output");

    let entries: Vec<_> = fs::read_dir(harness.requests_dir())
        .expect("requests directory")
        .collect::<Result<_, _>>()
        .expect("read entries");
    assert_eq!(entries.len(), 1);
    let raw = fs::read_to_string(entries[0].path()).expect("read request");
    let stored: Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(stored["request"]["distribution"], "rhel-8");
    let upload = &stored["request"]["image_requests"][0]["upload_request"];
    assert_eq!(upload["type"], "aws");
    assert_eq!(upload["options"]["bucket"], "images");
    assert!(stored["request"].get("customizations").is_none());
}
