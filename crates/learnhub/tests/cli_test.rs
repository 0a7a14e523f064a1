#![allow(clippy::unwrap_used)]
// End-to-end tests for the `learnhub` binary: argument handling plus
// full round trips against a wiremock backend.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn learnhub() -> Command {
    let mut cmd = Command::cargo_bin("learnhub").unwrap();
    // Isolate from the developer's real config, keyring, and env.
    cmd.env_clear();
    cmd
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "message": "ok", "data": data })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "_id": "c1", "title": "Algebra I", "isPublished": true, "isAdminApproved": true },
            { "_id": "c2", "title": "Hidden Draft", "isPublished": false, "isAdminApproved": false }
        ]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/combos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live-classes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .mount(server)
        .await;
}

// ── Argument handling ───────────────────────────────────────────────

#[test]
fn help_lists_the_command_tree() {
    learnhub()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("courses")
                .and(predicate::str::contains("access"))
                .and(predicate::str::contains("renewal"))
                .and(predicate::str::contains("live")),
        );
}

#[test]
fn no_args_shows_usage() {
    learnhub().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_generate() {
    learnhub()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("learnhub"));
}

#[test]
fn missing_server_is_a_usage_error() {
    learnhub()
        .args(["courses", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backend configured"));
}

#[test]
fn bad_at_instant_is_rejected() {
    learnhub()
        .args([
            "--server",
            "https://example.invalid",
            "--at",
            "yesterday",
            "live",
            "list",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--at"));
}

// ── Round trips against a mock backend ──────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn courses_list_renders_visible_catalog() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let assert = tokio::task::spawn_blocking({
        let uri = server.uri();
        move || {
            learnhub()
                .args(["--server", &uri, "--anonymous", "-o", "json", "courses", "list"])
                .assert()
        }
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Algebra I").and(predicate::str::contains("Hidden Draft").not()));
}

#[tokio::test(flavor = "multi_thread")]
async fn access_check_grants_for_lifetime_quarterly() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/orders/my"))
        .and(header("authorization", "Bearer tok-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "_id": "ord1",
            "planType": "quarterly",
            "paymentStatus": "approved",
            "isActive": true,
            "endDate": null
        }]))))
        .mount(&server)
        .await;

    let assert = tokio::task::spawn_blocking({
        let uri = server.uri();
        move || {
            learnhub()
                .args([
                    "--server",
                    &uri,
                    "--token",
                    "tok-e2e",
                    "--at",
                    "2024-06-01T12:00:00Z",
                    "-o",
                    "plain",
                    "access",
                    "check",
                    "c1",
                ])
                .assert()
        }
    })
    .await
    .unwrap();

    assert.success().stdout(predicate::str::contains("granted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn renewal_preview_extends_by_calendar_months() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/orders/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "_id": "ord1",
            "planType": "quarterly",
            "paymentStatus": "approved",
            "isActive": true,
            "endDate": "2025-01-10T00:00:00Z"
        }]))))
        .mount(&server)
        .await;

    let assert = tokio::task::spawn_blocking({
        let uri = server.uri();
        move || {
            learnhub()
                .args([
                    "--server",
                    &uri,
                    "--token",
                    "tok-e2e",
                    "--at",
                    "2024-12-01T00:00:00Z",
                    "-o",
                    "plain",
                    "renewal",
                    "preview",
                ])
                .assert()
        }
    })
    .await
    .unwrap();

    assert.success().stdout(predicate::str::contains("2025-04-10"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_failure_surfaces_not_a_silent_grant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "failed to load",
            "data": null
        })))
        .mount(&server)
        .await;

    let assert = tokio::task::spawn_blocking({
        let uri = server.uri();
        move || {
            learnhub()
                .args([
                    "--server", &uri, "--token", "tok", "access", "check", "c1",
                ])
                .assert()
        }
    })
    .await
    .unwrap();

    assert
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
