//! Integration tests for the Gemini review client.
//!
//! Exercises: request shape (path, auth header, prompt, schema, temperature),
//! response text handling (array, empty array, non-array, invalid JSON, blank),
//! and transport failures.

use coderev_core::{
    Config, Error, FeedbackCategory, GeminiClient, Language, ReviewService, REVIEW_FAILED_MESSAGE,
};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/models/gemini-2.5-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let config = Config {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Config::default()
    };
    GeminiClient::new(&config, "test-key").unwrap()
}

/// Wraps `text` in a generateContent response envelope.
fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    }))
}

async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(gemini_reply(text))
        .mount(server)
        .await;
}

#[tokio::test]
async fn sends_one_request_with_prompt_schema_and_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(gemini_reply("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let code = "int *p = malloc(4);\nreturn 0;";
    client_for(&server).review(code, Language::C).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains(code), "prompt must embed the code verbatim");
    assert!(prompt.contains("```c\n"), "prompt must tag the fence with the language");
    assert!(prompt.contains("following c code"));

    let gen = &body["generationConfig"];
    assert_eq!(gen["responseMimeType"], "application/json");
    assert_eq!(gen["temperature"], json!(0.2));
    assert_eq!(gen["responseSchema"]["type"], "ARRAY");
    assert_eq!(
        gen["responseSchema"]["items"]["required"],
        json!(["line", "category", "comment", "suggestion"])
    );
}

#[tokio::test]
async fn parses_feedback_items() {
    let server = MockServer::start().await;
    let text = json!([
        {"line": 2, "category": "SECURITY", "comment": "unchecked malloc", "suggestion": "if (!p) return 1;"},
        {"line": 1, "category": "PERFORMANCE", "comment": "hot loop", "suggestion": "hoist it"}
    ])
    .to_string();
    mount_reply(&server, &text).await;

    let items = client_for(&server).review("code", Language::Cpp).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category, FeedbackCategory::Security);
    assert_eq!(items[0].line, 2);
    assert_eq!(items[1].comment, "hot loop");
}

#[tokio::test]
async fn empty_array_means_no_issues() {
    let server = MockServer::start().await;
    mount_reply(&server, "  [] \n").await;
    let items = client_for(&server).review("code", Language::Cpp).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn blank_text_means_no_issues() {
    let server = MockServer::start().await;
    mount_reply(&server, "   ").await;
    let items = client_for(&server).review("code", Language::Cpp).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn non_array_json_is_downgraded_to_no_issues() {
    let server = MockServer::start().await;
    mount_reply(&server, "{}").await;
    let items = client_for(&server).review("code", Language::Cpp).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn invalid_json_fails_with_generic_message() {
    let server = MockServer::start().await;
    mount_reply(&server, "Sure! Here is my review:").await;
    let err = client_for(&server)
        .review("code", Language::Cpp)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReviewFailed));
    assert_eq!(err.to_string(), REVIEW_FAILED_MESSAGE);
}

#[tokio::test]
async fn http_error_status_fails_with_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .review("code", Language::Cpp)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReviewFailed));
    assert!(!err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn undecodable_envelope_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).review("code", Language::Cpp).await;
    assert!(matches!(result, Err(Error::ReviewFailed)));
}

#[tokio::test]
async fn unreachable_server_fails() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let result = client.review("code", Language::Cpp).await;
    assert!(matches!(result, Err(Error::ReviewFailed)));
}
