use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// The binary with no user configuration in play.
fn insights() -> Command {
    let mut cmd = Command::cargo_bin("insights").unwrap();
    cmd.env_remove("INSIGHTS_CONFIG")
        .env_remove("RUST_LOG")
        .args(["--config", "/nonexistent/campaign-insights/config.toml"]);
    cmd
}

#[test]
fn compare_prints_the_winner() {
    insights()
        .args(["compare", &fixture("variants.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Handwritten letter"))
        .stdout(predicate::str::contains("Recommended winner: Oversized postcard"))
        .stdout(predicate::str::contains("differ significantly from the control"));
}

#[test]
fn compare_emits_camel_case_json() {
    insights()
        .args(["--output", "json", "compare", &fixture("variants.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recommendedWinner\""))
        .stdout(predicate::str::contains("\"liftVsControl\""))
        .stdout(predicate::str::contains("\"selection\": \"flagged\""));
}

#[test]
fn compare_rejects_a_lone_variant() {
    insights()
        .args(["compare", &fixture("single_variant.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InsufficientVariants"));
}

#[test]
fn compare_reports_missing_file() {
    insights()
        .args(["compare", &fixture("does_not_exist.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Io"));
}

#[test]
fn what_changed_explains_a_decline() {
    insights()
        .args([
            "what-changed",
            &fixture("declining.json"),
            "--now",
            "2024-06-30T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notable declines:"))
        .stdout(predicate::str::contains("TELEPHONY_ISSUE"))
        .stdout(predicate::str::contains("Recommendations"))
        .stdout(predicate::str::contains("OFFER_CHANGE skipped"));
}

#[test]
fn what_changed_json_is_stable_for_a_fixed_now() {
    let run = || {
        insights()
            .args([
                "-o",
                "json",
                "what-changed",
                &fixture("declining.json"),
                "--now",
                "2024-06-30T12:00:00Z",
            ])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8(first.stdout).unwrap();
    assert!(stdout.contains("\"generatedAt\": \"2024-06-30T12:00:00Z\""));
    assert!(stdout.contains("\"previousPeriod\""));
    assert!(stdout.contains("\"skippedGenerators\""));
}

#[test]
fn what_changed_steady_account_has_nothing_to_explain() {
    insights()
        .args([
            "what-changed",
            &fixture("steady.json"),
            "--now",
            "2024-06-30T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notable declines"));
}

#[test]
fn what_changed_rejects_bad_now() {
    insights()
        .args(["what-changed", &fixture("steady.json"), "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInput"));
}

#[test]
fn sample_size_prints_pieces_per_arm() {
    insights()
        .args(["sample-size", "--base-rate", "0.02", "--lift", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delivered pieces per arm"));
}

#[test]
fn sample_size_yaml_output() {
    insights()
        .args([
            "-o",
            "yaml",
            "sample-size",
            "--base-rate",
            "0.02",
            "--lift",
            "0.5",
            "--power",
            "0.9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("piecesPerArm:"))
        .stdout(predicate::str::contains("power: 0.9"));
}

#[test]
fn config_shows_defaults_when_file_is_missing() {
    insights()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha = 0.05"))
        .stdout(predicate::str::contains("recommendation_min_confidence = 0.7"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[comparator]\nalpha = 0.01\n").unwrap();

    Command::cargo_bin("insights")
        .unwrap()
        .env_remove("INSIGHTS_CONFIG")
        .args(["--config", path.to_str().unwrap(), "-o", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"alpha\": 0.01"));
}
