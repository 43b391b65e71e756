use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Captured {
    paths: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
}

async fn spawn_mock(router: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

async fn gemini_handler(
    State(captured): State<Captured>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured.paths.lock().await.push(model_action);
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        captured.auth_headers.lock().await.push(key.to_string());
    }
    captured.bodies.lock().await.push(body);
    Json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "- First\n" }, { "text": "- Second" }] }
        }]
    }))
}

async fn groq_handler(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        captured.auth_headers.lock().await.push(auth.to_string());
    }
    captured.bodies.lock().await.push(body);
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "Title\n\nOnce upon a time" } }]
    }))
}

async fn failing_handler() -> (StatusCode, &'static str) {
    (StatusCode::TOO_MANY_REQUESTS, "slow down")
}

#[test]
fn providers_reject_missing_api_key() {
    let err = GeminiProvider::new(GeminiConfig::default())
        .err()
        .expect("missing key must fail");
    assert!(matches!(err, ProviderError::Configuration(_)));

    let err = GroqProvider::new(GroqConfig {
        api_key: "   ".into(),
        ..GroqConfig::default()
    })
    .err()
    .expect("blank key must fail");
    assert!(matches!(err, ProviderError::Configuration(_)));
}

#[tokio::test]
async fn gemini_posts_prompt_and_joins_candidate_parts() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/v1beta/models/*model_action", post(gemini_handler))
        .with_state(captured.clone());
    let base = spawn_mock(router).await;

    let provider = GeminiProvider::new(GeminiConfig {
        api_key: "g-key".into(),
        model: "gemini-test".into(),
        api_base: base,
        ..GeminiConfig::default()
    })
    .expect("provider");
    assert_eq!(provider.model_name(), "gemini-test");

    let text = provider.complete_ideas("ideas about cats").await.expect("text");
    assert_eq!(text, "- First\n- Second");

    assert_eq!(
        captured.paths.lock().await.as_slice(),
        ["gemini-test:generateContent"]
    );
    let bodies = captured.bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["contents"][0]["parts"][0]["text"], "ideas about cats");
    assert_eq!(captured.auth_headers.lock().await.as_slice(), ["g-key"]);
}

#[tokio::test]
async fn groq_sends_completion_limits_and_bearer_token() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/chat/completions", post(groq_handler))
        .with_state(captured.clone());
    let base = spawn_mock(router).await;

    let provider = GroqProvider::new(GroqConfig {
        api_key: "q-key".into(),
        api_base: format!("{base}/"),
        ..GroqConfig::default()
    })
    .expect("provider");

    assert_eq!(provider.model_name(), "openai/gpt-oss-20b");
    let script = provider.complete_script("write it").await.expect("script");
    assert_eq!(script, "Title\n\nOnce upon a time");

    let bodies = captured.bodies.lock().await;
    assert_eq!(bodies[0]["model"], "openai/gpt-oss-20b");
    assert_eq!(bodies[0]["max_completion_tokens"], 3000);
    assert_eq!(bodies[0]["messages"][0]["content"], "write it");
    assert_eq!(
        captured.auth_headers.lock().await.as_slice(),
        ["Bearer q-key"]
    );
}

#[tokio::test]
async fn non_success_status_surfaces_status_and_body() {
    let router = Router::new().route("/chat/completions", post(failing_handler));
    let base = spawn_mock(router).await;

    let provider = GroqProvider::new(GroqConfig {
        api_key: "q-key".into(),
        api_base: base,
        ..GroqConfig::default()
    })
    .expect("provider");

    match provider.complete_script("x").await {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn gemini_without_candidates_is_invalid_response() {
    let router = Router::new().route(
        "/v1beta/models/*model_action",
        post(|| async { Json(json!({ "candidates": [] })) }),
    );
    let base = spawn_mock(router).await;

    let provider = GeminiProvider::new(GeminiConfig {
        api_key: "g-key".into(),
        api_base: base,
        ..GeminiConfig::default()
    })
    .expect("provider");

    let err = provider.complete_ideas("x").await.expect_err("no candidates");
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}
