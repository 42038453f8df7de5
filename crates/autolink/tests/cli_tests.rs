//! Command line tests
//!
//! Runs the built binary with colors off and a clean autolink environment.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn autolink_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("autolink"));
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("AUTOLINK_LOG")
        .env_remove("AUTOLINK_TRUNCATE")
        .env_remove("AUTOLINK_TRUNCATE_CHARS")
        .env_remove("AUTOLINK_TRUNCATE_LOCATION")
        .env_remove("AUTOLINK_MAX_INPUT");
    cmd
}

fn json_output(args: &[&str]) -> Value {
    let output = autolink_cmd().args(args).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// link
// =============================================================================

#[test]
fn test_link_prints_display_text() {
    autolink_cmd()
        .args(["link", "docs at https://www.rust-lang.org/ and mail ops@example.com"])
        .assert()
        .success()
        .stdout("docs at rust-lang.org and mail ops@example.com\n");
}

#[test]
fn test_link_verbose_shows_targets() {
    autolink_cmd()
        .args(["-v", "link", "--phone", "sms", "call 555-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("555-1234 <sms:5551234>"));
}

#[test]
fn test_link_phone_text_alias_uses_sms() {
    autolink_cmd()
        .args(["-v", "link", "--phone", "text", "call 5551234567"])
        .assert()
        .success()
        .stdout("call 5551234567 <sms:5551234567>\n");
}

#[test]
fn test_link_kind_gating_in_json() {
    let json = json_output(&[
        "--json",
        "link",
        "--phone",
        "off",
        "call 555-1234 or visit test@x.com",
    ]);
    let segments = json.as_array().unwrap();
    let links: Vec<&Value> = segments.iter().filter(|s| s["type"] == "link").collect();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["record"]["kind"], "email");
    assert_eq!(links[0]["href"], "mailto:test%40x.com");
    assert_eq!(segments[0]["content"], "call 555-1234 or visit ");
}

#[test]
fn test_link_latlng_with_apple_maps() {
    let json = json_output(&[
        "--format",
        "json",
        "link",
        "--latlng",
        "--map-provider",
        "apple",
        "meet me at 40.7128, -74.0060 tomorrow",
    ]);
    let link = &json[1];
    assert_eq!(link["record"]["kind"], "latlng");
    assert_eq!(link["record"]["matched_text"], "40.7128, -74.0060");
    assert_eq!(link["record"]["offset"], 11);
    assert_eq!(
        link["target"]["url"],
        "http://maps.apple.com/?q=40.7128%2C%20-74.0060&ll=40.7128,-74.0060"
    );
}

#[test]
fn test_link_truncates_long_display_text() {
    autolink_cmd()
        .args([
            "link",
            "--truncate",
            "20",
            "--truncate-location",
            "end",
            "see https://example.com/a/really/long/path/segment",
        ])
        .assert()
        .success()
        .stdout("see example.com/a/real..\n");
}

#[test]
fn test_link_truncation_from_environment() {
    autolink_cmd()
        .env("AUTOLINK_TRUNCATE", "10")
        .env("AUTOLINK_TRUNCATE_LOCATION", "end")
        .args(["link", "https://example.com/path"])
        .assert()
        .success()
        .stdout("example...\n");
}

#[test]
fn test_link_reads_stdin() {
    autolink_cmd()
        .args(["link", "--hashtag", "twitter", "-v"])
        .write_stdin("loving #rustlang\n")
        .assert()
        .success()
        .stdout("loving #rustlang <twitter://search?query=%23rustlang>\n");
}

#[test]
fn test_link_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ping @ferris").unwrap();

    autolink_cmd()
        .args(["-v", "link", "--mention", "twitter", "--web-fallback", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("ping @ferris <https://twitter.com/ferris>\n");
}

#[test]
fn test_link_missing_file_fails_with_ioerr() {
    autolink_cmd()
        .args(["link", "--file", "/nonexistent/autolink-input.txt"])
        .assert()
        .code(74)
        .stderr(predicate::str::contains("Failed to read /nonexistent/autolink-input.txt"));
}

#[test]
fn test_link_input_too_large() {
    autolink_cmd()
        .env("AUTOLINK_MAX_INPUT", "4")
        .args(["link", "hello world"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("exceeds the detector limit"));
}

#[test]
fn test_link_error_as_json() {
    let output = autolink_cmd()
        .env("AUTOLINK_MAX_INPUT", "4")
        .args(["--json", "link", "hello world"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(64));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["category"], "invalid_input");
}

#[test]
fn test_link_seed_is_accepted() {
    autolink_cmd()
        .args(["link", "--seed", "42", "a@b.io"])
        .assert()
        .success()
        .stdout("a@b.io\n");
}

#[test]
fn test_link_rejects_unknown_service() {
    autolink_cmd()
        .args(["link", "--hashtag", "myspace", "#tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// truncate, matchers, completions
// =============================================================================

#[test]
fn test_truncate_smart_keeps_host() {
    autolink_cmd()
        .args([
            "truncate",
            "-n",
            "25",
            "http://www.yahoo.com/some/long/path/to/a/file",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("http://www.yahoo.com"))
        .stdout(predicate::str::contains(".."));
}

#[test]
fn test_truncate_short_text_is_unchanged() {
    autolink_cmd()
        .args(["truncate", "-n", "10", "short"])
        .assert()
        .success()
        .stdout("short\n");
}

#[test]
fn test_truncate_zero_length_is_usage_error() {
    autolink_cmd()
        .args(["truncate", "-n", "0", "anything"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_matchers_lists_latlng() {
    let json = json_output(&["--json", "matchers"]);
    assert_eq!(json["matchers"], serde_json::json!(["latlng"]));

    autolink_cmd()
        .arg("matchers")
        .assert()
        .success()
        .stdout(predicate::str::contains("latlng"));
}

#[test]
fn test_completions_bash() {
    autolink_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("autolink"));
}
