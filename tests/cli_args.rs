//! Tests for CLI argument parsing and the offline subcommands, run against
//! the compiled binary.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::temp_config;
use std::process::Command;

fn studio_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_diagram-studio"));
    cmd.env_remove("DIAGRAM_STUDIO_LOG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let output = studio_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for sub in ["generate", "models", "templates", "providers"] {
        assert!(stdout.contains(sub), "missing {} in help: {}", sub, stdout);
    }
}

#[test]
fn test_templates_lists_all() {
    let output = studio_cmd()
        .arg("templates")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 7);
    assert!(stdout.lines().any(|l| l == "USERJOURNEY\tUser Journey"));
}

#[test]
fn test_providers_show_mode() {
    let output = studio_cmd()
        .arg("providers")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "openai\tlist"));
    assert!(stdout.lines().any(|l| l == "ollama\tmanual"));
}

#[test]
fn test_unknown_provider_exits_with_error() {
    let output = studio_cmd()
        .args(["models", "--provider", "bard"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown provider 'bard'"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_dir, path) = temp_config("[defaults]\nmax_tokens = 0\n");
    let output = studio_cmd()
        .arg("--config")
        .arg(&path)
        .arg("templates")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_tokens"), "stderr: {}", stderr);
}

#[test]
fn test_generate_without_model_prints_validation_toast() {
    let (_dir, path) = temp_config("");
    let output = studio_cmd()
        .arg("--config")
        .arg(&path)
        .args(["--api-url", "http://127.0.0.1:9"])
        .args(["generate", "a login flow", "--provider", "ollama"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[error] Validation Error: Please fill in all required fields."),
        "stderr: {}",
        stderr
    );
}

#[tokio::test]
async fn test_models_prints_value_and_label() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"[{"value": "gpt-4o", "label": "GPT-4o"}]"#,
        ))
        .await;
    let (_dir, path) = temp_config("");

    let mut cmd = studio_cmd();
    cmd.arg("--config")
        .arg(&path)
        .args(["--api-url", &backend.base_url()])
        .args(["models", "--provider", "openai"]);
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "gpt-4o\tGPT-4o\n");
}
