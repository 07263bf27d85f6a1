#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every test runs against empty config and data directories, and none of
//! them reach the network: each command either needs no backend or fails
//! before a request is sent.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    #[allow(deprecated)]
    fn lingo(&self) -> Command {
        let mut cmd = Command::cargo_bin("lingo").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("NO_COLOR", "1")
            .env_remove("DEEPSEEK_API_KEY")
            .env_remove("DASHSCOPE_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("LINGO_LOG");
        cmd
    }
}

#[test]
fn test_help_displays_usage() {
    Sandbox::new()
        .lingo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_version_displays_version() {
    Sandbox::new()
        .lingo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    Sandbox::new()
        .lingo()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"))
        .stdout(predicate::str::contains("ja"))
        .stdout(predicate::str::contains("zh"));
}

#[test]
fn test_providers_list_without_config() {
    Sandbox::new()
        .lingo()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("google"))
        .stdout(predicate::str::contains("deepseek"))
        .stdout(predicate::str::contains("not required"))
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("DASHSCOPE_API_KEY"));
}

#[test]
fn test_providers_sees_environment_key() {
    Sandbox::new()
        .lingo()
        .env("OPENAI_API_KEY", "sk-test")
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("(set)"));
}

#[test]
fn test_invalid_language_code() {
    Sandbox::new()
        .lingo()
        .args(["--to", "invalid_lang_xyz"])
        .write_stdin("hello")
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_unknown_provider() {
    Sandbox::new()
        .lingo()
        .args(["-p", "bing", "hello"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("bing"));
}

#[test]
fn test_ask_translation_only_provider() {
    Sandbox::new()
        .lingo()
        .args(["ask", "-p", "google", "why?"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("translation-only"));
}

#[test]
fn test_ask_without_credential() {
    Sandbox::new()
        .lingo()
        .args(["ask", "-p", "deepseek", "why?"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("DEEPSEEK_API_KEY"));
}

#[test]
fn test_empty_input_is_rejected() {
    Sandbox::new()
        .lingo()
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_configure_flags_then_show() {
    let sandbox = Sandbox::new();

    sandbox
        .lingo()
        .args(["configure", "--provider", "qwen", "--to", "ja"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));

    sandbox
        .lingo()
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qwen"))
        .stdout(predicate::str::contains("ja"));

    // The saved provider is now the default and needs a key.
    sandbox
        .lingo()
        .arg("hello")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("DASHSCOPE_API_KEY"));
}

#[test]
fn test_history_starts_empty() {
    let sandbox = Sandbox::new();

    sandbox
        .lingo()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));

    sandbox
        .lingo()
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 entries"));
}

#[test]
fn test_chat_help() {
    Sandbox::new()
        .lingo()
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--model"));
}
