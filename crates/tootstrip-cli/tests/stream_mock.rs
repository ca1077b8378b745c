use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STREAMING_PATH: &str = "/api/v1/streaming/public/local";

/// Helper to create an SSE response from event strings.
fn sse_response(events: &[&str]) -> ResponseTemplate {
    let body = events.join("\n\n") + "\n\n";
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

/// Creates one `update` event with the given author and content markup.
fn update_event(display_name: &str, content: &str) -> String {
    format!(
        r#"event: update
data: {{"account":{{"username":"{}","display_name":"{display_name}","avatar":"https://example.com/a.png"}},"content":"{content}"}}"#,
        display_name.to_lowercase()
    )
}

#[tokio::test]
async fn test_streams_updates_onto_the_strip_in_order() {
    let mock_server = MockServer::start().await;

    let first = update_event("Alice", "<p>hello &amp; welcome</p>");
    let second = update_event("Bob", "second post");
    let events = vec![
        first.as_str(),
        "event: delete\ndata: 12345",
        second.as_str(),
    ];

    Mock::given(method("GET"))
        .and(path(STREAMING_PATH))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(sse_response(&events))
        .mount(&mock_server)
        .await;

    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("tootstrip")
        .env("TOOTSTRIP_HOME", home.path())
        .args(["test-token", "--url", &mock_server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Alice: hello & welcome"))
        .stdout(predicate::str::contains("[1] Bob: second post"));
}

#[tokio::test]
async fn test_undecodable_update_is_dropped_not_fatal() {
    let mock_server = MockServer::start().await;

    let good = update_event("Carol", "still here");
    let events = vec![
        "event: update\ndata: not json",
        "event: update\ndata: {\"content\":\"no account\"}",
        good.as_str(),
    ];

    Mock::given(method("GET"))
        .and(path(STREAMING_PATH))
        .respond_with(sse_response(&events))
        .mount(&mock_server)
        .await;

    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("tootstrip")
        .env("TOOTSTRIP_HOME", home.path())
        .args(["test-token", "--url", &mock_server.uri()])
        .assert()
        .success()
        // Bad frames land in slot 0's place only if decoded; the one good
        // post must be the first slot written.
        .stdout(predicate::str::contains("[0] Carol: still here"));
}

#[tokio::test]
async fn test_rejected_token_fails_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STREAMING_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":"The access token is invalid"}"#),
        )
        .mount(&mock_server)
        .await;

    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("tootstrip")
        .env("TOOTSTRIP_HOME", home.path())
        .args(["bad-token", "--url", &mock_server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 401"));
}

#[tokio::test]
async fn test_capacity_override_wraps_slots() {
    let mock_server = MockServer::start().await;

    let a = update_event("A", "one");
    let b = update_event("B", "two");
    let c = update_event("C", "three");
    let events = vec![a.as_str(), b.as_str(), c.as_str()];

    Mock::given(method("GET"))
        .and(path(STREAMING_PATH))
        .respond_with(sse_response(&events))
        .mount(&mock_server)
        .await;

    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("tootstrip")
        .env("TOOTSTRIP_HOME", home.path())
        .args(["test-token", "--url", &mock_server.uri(), "--capacity", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] A: one"))
        .stdout(predicate::str::contains("[1] B: two"))
        // Third post wraps back onto slot 0.
        .stdout(predicate::str::contains("[0] C: three"));
}
