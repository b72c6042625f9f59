//! Integration tests for CLI behavior.
//!
//! These exercise the actual binary. Turns that would reach the completion
//! endpoint are avoided here since they need an API key and network access;
//! the orchestration itself is covered by the core crate's tests.

use std::io::Write;
use std::process::Command;

#[test]
fn integration_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_kawaraban"))
        .arg("-h")
        .output()
        .expect("failed to run kawaraban");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kawaraban"));
    assert!(stdout.contains("Usage"));
}

#[test]
fn integration_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_kawaraban"))
        .arg("--version")
        .output()
        .expect("failed to run kawaraban");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kawaraban"));
}

#[test]
fn integration_missing_config_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_kawaraban"))
        .args(["--config", "/nonexistent/config.toml", "hello"])
        .output()
        .expect("failed to run kawaraban");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config.toml"));
}

#[test]
fn integration_missing_news_file_is_reported() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, "api_key = \"k\"\nmodel = \"m\"").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_kawaraban"))
        .args(["--config"])
        .arg(config.path())
        .args(["--news", "/nonexistent/news.tsv", "hello"])
        .output()
        .expect("failed to run kawaraban");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("news"));
}
