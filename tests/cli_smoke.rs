#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every run gets its own config and state directories so nothing from the
//! developer's machine leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Sandbox {
    config: TempDir,
    data: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            config: TempDir::new().unwrap(),
            data: TempDir::new().unwrap(),
        }
    }

    #[allow(deprecated)]
    fn quip(&self) -> Command {
        let mut cmd = Command::cargo_bin("quip").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env("NO_COLOR", "1")
            .env_remove("QUIP_API_URL")
            .env_remove("RUST_LOG");
        cmd
    }

    fn state_path(&self) -> std::path::PathBuf {
        self.data.path().join("quip").join("state.json")
    }

    fn write_session(&self) {
        fs::create_dir_all(self.state_path().parent().unwrap()).unwrap();
        fs::write(
            self.state_path(),
            r#"{"auth_token": "abc", "username": "ana", "app_language": "en"}"#,
        )
        .unwrap();
    }
}

#[test]
fn test_help_displays_usage() {
    Sandbox::new()
        .quip()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SarcasticBot"))
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_version_displays_version() {
    Sandbox::new()
        .quip()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_lists_supported_tags() {
    Sandbox::new()
        .quip()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("pt-BR"))
        .stdout(predicate::str::contains("English"));
}

#[test]
fn test_language_persists_choice() {
    let sandbox = Sandbox::new();
    sandbox.quip().args(["language", "en"]).assert().success();

    let state = fs::read_to_string(sandbox.state_path()).unwrap();
    assert!(state.contains("\"app_language\": \"en\""));

    sandbox
        .quip()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in"));
}

#[test]
fn test_invalid_language_fails() {
    Sandbox::new()
        .quip()
        .args(["language", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_status_when_anonymous_uses_default_language() {
    Sandbox::new()
        .quip()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Você não está logado"))
        .stdout(predicate::str::contains("http://localhost:8081/api"));
}

#[test]
fn test_status_shows_stored_user() {
    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox
        .quip()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("ana"));
}

#[test]
fn test_logout_clears_stored_session() {
    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox.quip().arg("logout").assert().success();

    let state = fs::read_to_string(sandbox.state_path()).unwrap();
    assert!(!state.contains("auth_token"));
    assert!(!state.contains("\"username\""));
    assert!(state.contains("app_language"));
}

#[test]
fn test_send_requires_login() {
    Sandbox::new()
        .quip()
        .args(["--lang", "en", "send", "oi"])
        .assert()
        .code(exitcode::NOPERM)
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_invalid_api_url_fails() {
    Sandbox::new()
        .quip()
        .args(["--api-url", "ftp://chat.local", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_prints_bot_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/send"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": "Oh, you again."})),
        )
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox
        .quip()
        .args(["--api-url", &format!("{}/api", server.uri()), "send", "oi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Oh, you again."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_failure_prints_localized_reply_and_raw_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/send"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox
        .quip()
        .args(["--api-url", &format!("{}/api", server.uri()), "send", "oi"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Error sending message. Please try again.",
        ))
        .stderr(predicate::str::contains("forbidden"));

    let state = fs::read_to_string(sandbox.state_path()).unwrap();
    assert!(state.contains("\"auth_token\": \"abc\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_history_failure_prints_nothing_on_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox
        .quip()
        .args(["--api-url", &format!("{}/api", server.uri()), "history"])
        .assert()
        .code(exitcode::PROTOCOL)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("boom"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_failure_prints_nothing_on_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.write_session();

    sandbox
        .quip()
        .args(["--api-url", &format!("{}/api", server.uri()), "session", "work"])
        .assert()
        .code(exitcode::PROTOCOL)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HTTP error! status: 500"));
}
