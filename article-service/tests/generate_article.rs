//! Integration tests for the article generation endpoint.
//!
//! The application is spawned on a random port with the upstream
//! chat-completion API replaced by a wiremock server.

use article_service::config::{
    ArticleConfig, GenerationSettings, PromptStyle, UpstreamConfig, UpstreamVendor,
};
use article_service::startup::Application;
use reqwest::Client;
use secrecy::Secret;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERIC_ERROR: &str = "Ocurrió un error al contactar con la IA.";

fn test_config(base_url: String, api_key: &str) -> ArticleConfig {
    ArticleConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        upstream: UpstreamConfig {
            vendor: UpstreamVendor::Together,
            base_url,
            model: "test-model".to_string(),
            api_key: Secret::new(api_key.to_string()),
            referer: None,
            app_title: None,
        },
        generation: GenerationSettings {
            max_tokens: 2500,
            temperature: 0.8,
            top_p: 0.8,
        },
        prompt_style: PromptStyle::Classic,
    }
}

/// Spawn the application on a random port and return the port number.
async fn spawn_app(config: ArticleConfig) -> u16 {
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.http_port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

fn generate_url(port: u16) -> String {
    format!("http://localhost:{}/api/generate", port)
}

fn sample_body() -> Value {
    json!({
        "keywords": "rust, proxies",
        "searchIntent": "informational",
        "wordCount": 800,
        "language": "English",
        "toneStyle": "formal",
        "externalLinks": false,
        "editingOutline": false,
        "realtimeKnowledge": false
    })
}

#[tokio::test]
async fn options_preflight_returns_200_with_empty_body() {
    let port = spawn_app(test_config("http://unused.invalid".to_string(), "key")).await;
    let client = Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, generate_url(port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = response.text().await.expect("Failed to read body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn non_post_method_returns_405() {
    let port = spawn_app(test_config("http://unused.invalid".to_string(), "key")).await;
    let client = Client::new();

    let response = client
        .get(generate_url(port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 405);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn post_returns_generated_article_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": "X" } } ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let port = spawn_app(test_config(mock_server.uri(), "test-api-key")).await;
    let client = Client::new();

    let response = client
        .post(generate_url(port))
        .json(&sample_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["articleContent"], "X");
}

#[tokio::test]
async fn prompt_sent_upstream_interpolates_form_fields() {
    let mock_server = MockServer::start().await;

    // The upstream only matches when the rendered prompt carries the
    // submitted word count, language, and tone.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("800"))
        .and(body_string_contains("English"))
        .and(body_string_contains("formal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": "ok" } } ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let port = spawn_app(test_config(mock_server.uri(), "test-api-key")).await;
    let client = Client::new();

    let response = client
        .post(generate_url(port))
        .json(&sample_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn upstream_failure_maps_to_generic_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({
                "error": { "message": "model exploded" }
            })),
        )
        .mount(&mock_server)
        .await;

    let port = spawn_app(test_config(mock_server.uri(), "test-api-key")).await;
    let client = Client::new();

    let response = client
        .post(generate_url(port))
        .json(&sample_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains(GENERIC_ERROR));
    // Upstream detail never leaks to the caller.
    assert!(!body.contains("model exploded"));
}

#[tokio::test]
async fn missing_api_key_maps_to_generic_500() {
    let port = spawn_app(test_config("http://unused.invalid".to_string(), "")).await;
    let client = Client::new();

    let response = client
        .post(generate_url(port))
        .json(&sample_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], GENERIC_ERROR);
}

#[tokio::test]
async fn malformed_body_maps_to_generic_500() {
    let port = spawn_app(test_config("http://unused.invalid".to_string(), "key")).await;
    let client = Client::new();

    let response = client
        .post(generate_url(port))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], GENERIC_ERROR);
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(test_config("http://unused.invalid".to_string(), "key")).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "article-service");
}
