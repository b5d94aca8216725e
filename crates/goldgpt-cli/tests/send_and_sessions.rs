//! Integration tests for `goldgpt send`, `goldgpt sessions` and `goldgpt health`
//! against a mock backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn goldgpt(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let uri = server.uri();
    let mut cmd = cargo_bin_cmd!("goldgpt");
    cmd.env("GOLDGPT_HOME", home.path())
        .env_remove("GOLDGPT_API_URL")
        .args(["--url", uri.as_str()]);
    cmd
}

async fn mount_empty_history(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_prints_reply_and_saves_session() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "Hello", "session_id": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Hi",
            "session_id": "abc",
            "chart": {"x": ["2024-01-01"], "y": [2050.0], "type": "line", "title": "Gold Price"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat/session/abc"))
        .and(body_partial_json(json!({
            "title": "Hello",
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_history(&server).await;

    goldgpt(&home, &server)
        .args(["send", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi"))
        .stdout(predicate::str::contains("📊 Gold Price"))
        .stdout(predicate::str::contains("Session: abc"));

    assert!(home.path().join("logs").join("goldgpt.log").exists());
}

#[tokio::test]
async fn test_send_to_existing_session_carries_history() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/session/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "More", "session_id": "abc"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Sure", "session_id": "abc"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat/session/abc"))
        .and(body_partial_json(json!({"title": "Hello"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_history(&server).await;

    goldgpt(&home, &server)
        .args(["send", "More", "--session", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sure"));
}

#[tokio::test]
async fn test_send_to_missing_session_fails() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/session/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
        )
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .args(["send", "Hi", "--session", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session not found"));
}

#[tokio::test]
async fn test_send_failure_reports_connectivity_error() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .args(["send", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trouble connecting"))
        .stderr(predicate::str::contains("Failed to send message"));
}

#[tokio::test]
async fn test_sessions_list_prints_entries_newest_first() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "old": {"title": "Silver outlook", "timestamp": "2020-01-01 10:00:00"},
            "new": {"title": "Gold outlook", "timestamp": "2024-06-01T10:00:00Z"}
        })))
        .mount(&server)
        .await;

    let output = goldgpt(&home, &server)
        .args(["sessions", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let gold = stdout.find("Gold outlook  new").unwrap();
    let silver = stdout.find("Silver outlook  old  2020-01-01").unwrap();
    assert!(gold < silver);
}

#[tokio::test]
async fn test_sessions_list_falls_back_to_placeholders() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("placeholder history"))
        .stdout(predicate::str::contains("Gold Investment Strategy  1  Yesterday"))
        .stdout(predicate::str::contains("Current Gold Prices Analysis  2  2 days ago"))
        .stdout(predicate::str::contains("Silver vs Gold Comparison  3  3 days ago"));
}

#[tokio::test]
async fn test_sessions_show_prints_transcript() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/session/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"role": "user", "content": "Draw gold"},
                {"role": "assistant", "content": "Done", "image": {
                    "url": "/static/images/gold.png", "prompt": "a gold bar"
                }}
            ],
            "title": "Draw gold"
        })))
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .args(["sessions", "show", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You: Draw gold"))
        .stdout(predicate::str::contains("GoldGPT: Done"))
        .stdout(predicate::str::contains("/static/images/gold.png"));
}

#[tokio::test]
async fn test_sessions_delete_calls_backend() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/chat/session/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .args(["sessions", "delete", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session abc"));
}

#[tokio::test]
async fn test_health_reports_status() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2025-01-01T00:00:00"
        })))
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: healthy"));
}

#[tokio::test]
async fn test_health_fails_when_backend_down() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    goldgpt(&home, &server)
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not healthy"))
        .stderr(predicate::str::contains("HTTP 500"));
}
