//! End-to-end tests for Brushwise.
//!
//! These wire config → catalog → resolver → gateway the way `brushwise serve`
//! does and drive the HTTP surface with in-process requests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use brushwise_config::{AppConfig, LatencyConfig};
use brushwise_core::{ChatMessage, Resolver, Transcript};
use brushwise_gateway::{GatewayState, build_router};

const CUSTOM_CATALOG: &str = r#"
[global]
greeting = "Welcome to the sketch club!"
default = "Keep sketching."

[global.entries]
gesture = "Thirty-second gesture drawings loosen the wrist."

[[global.rules]]
keywords = ["gesture", "pose"]
topic = "gesture"

[contexts.studio]
tags = ["Sketch Studio"]
greeting_triggers = ["help"]
inherits_global_rules = true
greeting = "Studio helper here."
default = "Try another angle."
"#;

fn app_with(config: &AppConfig) -> axum::Router {
    let catalog = config.load_catalog().unwrap();
    let state = Arc::new(GatewayState::new(
        Resolver::new(Arc::new(catalog)),
        config.latency.clone(),
    ));
    build_router(state, &config.gateway.cors_origins)
}

fn quiet_config() -> AppConfig {
    AppConfig {
        latency: LatencyConfig::disabled(),
        ..AppConfig::default()
    }
}

async fn ask(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/learning-assistant")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn e2e_builtin_catalog_over_http() {
    let config = quiet_config();
    let resolver = Resolver::new(Arc::new(config.load_catalog().unwrap()));

    let queries = [
        (Some("Practice Studio"), "How do I fix the foreground?"),
        (Some("digital-illustration-basics"), "what should I study next"),
        (None, "tell me about blending"),
        (Some("character-design-fundamentals"), "nothing relevant"),
    ];

    for (context, query) in queries {
        let (status, json) = ask(
            app_with(&config),
            serde_json::json!({ "message": query, "context": context }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], resolver.resolve(context, query).body);
    }
}

#[tokio::test]
async fn e2e_custom_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.toml");
    std::fs::write(&path, CUSTOM_CATALOG).unwrap();

    let mut config = quiet_config();
    config.catalog.path = Some(path.to_string_lossy().into_owned());

    let (_, json) = ask(
        app_with(&config),
        serde_json::json!({ "message": "Any POSE advice?", "context": "Sketch Studio" }),
    )
    .await;
    assert_eq!(json["response"], "Thirty-second gesture drawings loosen the wrist.");

    let (_, json) = ask(
        app_with(&config),
        serde_json::json!({ "message": "help", "context": "Sketch Studio" }),
    )
    .await;
    assert_eq!(json["response"], "Studio helper here.");

    let (_, json) = ask(app_with(&config), serde_json::json!({ "message": "perspective?" })).await;
    assert_eq!(json["response"], "Keep sketching.");
}

#[tokio::test]
async fn e2e_bad_catalog_is_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[global]\ngreeting = \"hi\"\n").unwrap();

    let mut config = quiet_config();
    config.catalog.path = Some(path.to_string_lossy().into_owned());
    assert!(config.load_catalog().is_err());
}

#[tokio::test]
async fn e2e_validation_happens_before_delay() {
    // Default latency is on; a missing message must still come back at once.
    let config = AppConfig::default();
    let started = std::time::Instant::now();
    let (status, json) = ask(app_with(&config), serde_json::json!({ "message": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Message is required");
    assert!(started.elapsed() < Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn e2e_assistant_reply_is_delayed() {
    let config = AppConfig::default();
    let started = tokio::time::Instant::now();
    let (status, _) = ask(app_with(&config), serde_json::json!({ "message": "hello" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(config.latency.learning_assistant_ms));
}

#[test]
fn e2e_chat_transcript_round() {
    let resolver = Resolver::builtin().unwrap();
    let context = Some("Practice Studio".to_string());
    let mut transcript = Transcript::new(context.clone());

    transcript.push(ChatMessage::assistant(resolver.greeting(context.as_deref()).body));
    for question in ["help", "any crop ideas?", "what about depth"] {
        transcript.push(ChatMessage::user(question));
        let answer = resolver.resolve(context.as_deref(), question);
        transcript.push(ChatMessage::assistant(answer.body));
    }

    assert_eq!(transcript.user_turns(), 3);
    assert_eq!(transcript.messages.len(), 7);
    assert_eq!(transcript.messages[0].text, transcript.messages[2].text);
}
