#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests run the binary against an empty config directory and never
//! reach a model endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn llm(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("llm").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_MODEL")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_prompts(config_home: &TempDir, json: &str) {
    let dir = config_home.path().join("cli-llm");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("system_prompts.json"), json).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--role"))
        .stdout(predicate::str::contains("--temp"))
        .stdout(predicate::str::contains("--no-stream"))
        .stdout(predicate::str::contains("--output-codes"))
        .stdout(predicate::str::contains("--count-tokens"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_roles_lists_builtin_roles() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("coder"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("creative"));
}

#[test]
fn test_roles_reads_prompts_file() {
    let home = TempDir::new().unwrap();
    write_prompts(
        &home,
        r#"{"reviewer": {"content": "Review code.", "description": "Code review",
            "temperature": 0.2}}"#,
    );

    llm(&home)
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("reviewer"))
        .stdout(predicate::str::contains("Code review"))
        .stdout(predicate::str::contains("creative").not());
}

#[test]
fn test_unknown_startup_role_warns() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .args(["roles", "--role", "bogus"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown role: bogus"));
}

#[test]
fn test_empty_stdin_enters_interactive_mode() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM Interactive Mode"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_chat_commands_without_endpoint() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .arg("chat")
        .write_stdin("/help\n/role chat\n/role bogus\n@some context\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("Switched role from 'coder' to 'chat'"))
        .stdout(predicate::str::contains("Unknown role: bogus"))
        .stdout(predicate::str::contains("Referenced text: some context"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_invalid_temperature_is_rejected() {
    let home = TempDir::new().unwrap();
    llm(&home)
        .args(["--temp", "5", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--temp"));
}

#[test]
fn test_metadata_prompts_and_reasoner_variant() {
    let home = TempDir::new().unwrap();
    write_prompts(
        &home,
        r#"{
            "coder": {
                "content": {"ROLE": "engineer"},
                "metadata": {"description": "Writes code", "temperature": 0.0,
                             "model_name": "role-coder-model"}
            }
        }"#,
    );

    llm(&home)
        .arg("chat")
        .write_stdin("/role coder-R\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("role-coder-model"))
        .stdout(predicate::str::contains("Switched role from 'coder' to 'coder-R'"))
        .stdout(predicate::str::contains("o3-mini"));
}
