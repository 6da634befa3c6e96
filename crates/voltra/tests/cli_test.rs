//! Integration tests for the `voltra` CLI binary.
//!
//! Argument parsing, help output, completions, and error paths run without
//! a backend; the list/login flows run against a wiremock server.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a `Command` for the `voltra` binary with env isolation.
///
/// Points HOME/XDG dirs at a temp path and strips every `VOLTRA_*` var and
/// the session bus so tests never see a real session, config, or keyring.
fn voltra_cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("voltra").expect("binary builds");
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env_remove("DBUS_SESSION_BUS_ADDRESS")
        .env_remove("VOLTRA_SERVER")
        .env_remove("VOLTRA_TOKEN")
        .env_remove("VOLTRA_OUTPUT")
        .env_remove("VOLTRA_TIMEOUT");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_the_resource_commands() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("units")
            .and(predicate::str::contains("rooms"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn version_flag_prints_the_name() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("voltra"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir).arg("frobnicate").assert().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash_emits_a_script() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Session guard ───────────────────────────────────────────────────

#[test]
fn protected_commands_require_a_session() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .args(["units", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("voltra login"));
}

#[test]
fn whoami_without_session_fails_with_auth_code() {
    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir).arg("whoami").assert().code(3);
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn units_list_renders_a_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Bloco A", "codigoAcesso": "123",
              "endereco": { "cep": "12345678", "numero": "10" } }
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .env("VOLTRA_SERVER", server.uri())
        .env("VOLTRA_TOKEN", "tok123")
        .args(["units", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Bloco A")
                .and(predicate::str::contains("12345678"))
                .and(predicate::str::contains("Access code")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn devices_list_as_plain_emits_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dispositivos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "nome": "Ar", "tipo": "climatizacao", "potencia": 1400.0,
              "status": true, "ambiente": { "id": 3, "nome": "Sala 101" } },
            { "id": 8, "nome": "Luz", "tipo": "iluminacao", "potencia": 60.0,
              "status": false, "ambiente": null }
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .env("VOLTRA_SERVER", server.uri())
        .env("VOLTRA_TOKEN", "tok123")
        .args(["devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n8\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_rejection_stores_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .env("VOLTRA_SERVER", server.uri())
        .args(["login", "--email", "a@b.com", "--password", "x"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid email or password"));

    // No session landed on disk.
    let session = dir
        .path()
        .join("data")
        .join("voltra")
        .join("session.json");
    assert!(!session.exists(), "401 must not store a session");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_email_never_reaches_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .env("VOLTRA_SERVER", server.uri())
        .args(["login", "--email", "not-an-email", "--password", "x"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("email"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_requires_yes_when_not_interactive() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/unidades/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    voltra_cmd(&dir)
        .env("VOLTRA_SERVER", server.uri())
        .env("VOLTRA_TOKEN", "tok123")
        .args(["units", "delete", "4", "--yes"])
        .assert()
        .success();
}
