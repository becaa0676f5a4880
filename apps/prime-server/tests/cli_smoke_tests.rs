#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the prime-server binary

use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_prime_server(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_prime-server"));
    cmd.args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute prime-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_prime_server(&["--help"], &[]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "{stdout}");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--print-config"));
}

#[test]
fn test_cli_version_command() {
    let output = run_prime_server(&["--version"], &[]);
    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prime-server"), "{stdout}");
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_prime_server(&["invalid-command"], &[]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "{stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_prime_server(&["--config", "/nonexistent/config.yaml", "check"], &[]);
    assert!(!output.status.success(), "Should fail when config file doesn't exist");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_prime_server(&["--config", &path, "check"], &[]);
    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse"), "{stderr}");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &temp_dir,
        "valid.yaml",
        r"
server:
  bind_addr: 127.0.0.1
  port: 8087

logging:
  level: warn
  format: json

prime_counter:
  max_bound: 1000000
",
    );

    let output = run_prime_server(&["--config", &path, "check"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration is valid"), "{stdout}");
    assert!(stdout.contains("8087"), "{stdout}");
}

#[test]
fn test_cli_check_rejects_zero_max_bound() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "zero.yaml", "prime_counter:\n  max_bound: 0\n");

    let output = run_prime_server(&["--config", &path, "check"], &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_bound"), "{stderr}");
}

#[test]
fn test_cli_run_rejects_invalid_bind_addr() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "bad.yaml", "server:\n  bind_addr: nowhere\n");

    let output = run_prime_server(&["--config", &path, "run"], &[]);
    assert!(!output.status.success(), "Run should fail before binding");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid bind address"), "{stderr}");
}

#[test]
fn test_cli_print_config_layers_env_and_cli() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&temp_dir, "layers.yaml", "server:\n  port: 8081\n");

    let output = run_prime_server(
        &["--config", &path, "--port", "9999", "--print-config"],
        &[("APP__PRIME_COUNTER__MAX_BOUND", "4242")],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let printed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(printed["server"]["port"], 9999);
    assert_eq!(printed["prime_counter"]["max_bound"], 4242);
    assert_eq!(printed["logging"]["level"], "info");
}
