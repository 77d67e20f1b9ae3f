//! CLI smoke tests for the users-server binary.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_users_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(args)
        .env_remove("APP__SERVER__PORT")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute users-server")
}

fn write_config(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("Failed to write config file");
    path.to_string_lossy().into_owned()
}

fn base_config(home: &Path, port: u16, modules: &str) -> String {
    format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: {port}

logging:
  default:
    console_level: info
    file: "logs/users-server.log"
    file_level: debug
    max_backups: 1
    max_size_mb: 1
{modules}
"#,
        home = home.display().to_string().replace('\\', "/"),
    )
}

#[test]
fn test_cli_help_command() {
    let output = run_users_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--port"), "Should mention port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_users_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server 0.1.0"), "got: {stdout}");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_users_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report an error: {stderr}");
}

#[test]
fn test_cli_config_missing_file() {
    let output = run_users_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "invalid.yaml",
        "invalid: yaml: content: [unclosed",
    );

    let output = run_users_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to extract config"),
        "Should mention parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = base_config(
        temp_dir.path(),
        8087,
        "modules:\n  users:\n    expose_reset: false\n  api_ingress:\n    cors_enabled: true\n",
    );
    let config_path = write_config(temp_dir.path(), "valid.yaml", &body);

    let output = run_users_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Should succeed with valid config\nSTDOUT: {stdout}\nSTDERR: {stderr}"
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("expose_reset: false"));
}

#[test]
fn test_cli_check_rejects_invalid_module_section() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = base_config(
        temp_dir.path(),
        8087,
        "modules:\n  users:\n    expose_reset: \"sometimes\"\n",
    );
    let config_path = write_config(temp_dir.path(), "bad-module.yaml", &body);

    let output = run_users_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should reject invalid module config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration for module 'users'"),
        "got: {stderr}"
    );
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = base_config(temp_dir.path(), 8087, "");
    let config_path = write_config(temp_dir.path(), "print.yaml", &body);

    let output = run_users_server(&["--config", &config_path, "--port", "9191", "--print-config"]);

    assert!(output.status.success(), "print-config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"), "got: {stdout}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_users_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Start the server"));

    let output = run_users_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Check configuration"));
}

#[tokio::test]
async fn test_cli_run_serves_until_stopped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let port = {
        let free = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
        free.local_addr().expect("free port addr").port()
    };
    let body = base_config(temp_dir.path(), port, "");
    let config_path = write_config(temp_dir.path(), "run.yaml", &body);

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(["--config", &config_path, "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to start users-server");

    // Poll until the listener accepts a connection or the process exits.
    let connected = timeout(Duration::from_secs(10), async {
        loop {
            if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                return true;
            }
            if let Ok(Some(_)) = child.try_wait() {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .unwrap_or(false);

    assert!(connected, "server should accept connections on port {port}");
    child.kill().await.expect("Failed to stop users-server");
}
