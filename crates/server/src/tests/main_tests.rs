use super::*;
use async_trait::async_trait;
use axum::{body, body::Body, http::Request};
use llm_integration::{IdeaProvider, ProviderError, ScriptProvider};
use tower::ServiceExt;

struct FixedProvider {
    reply: Result<&'static str, &'static str>,
}

#[async_trait]
impl IdeaProvider for FixedProvider {
    async fn complete_ideas(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.reply
            .map(str::to_string)
            .map_err(ProviderError::transport)
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

#[async_trait]
impl ScriptProvider for FixedProvider {
    async fn complete_script(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.reply
            .map(str::to_string)
            .map_err(ProviderError::transport)
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

fn test_app(reply: Result<&'static str, &'static str>) -> Router {
    let api = ApiContext {
        ideas: Arc::new(FixedProvider { reply }),
        scripts: Arc::new(FixedProvider { reply }),
    };
    build_router(Arc::new(AppState { api }))
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(Ok("unused"));
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn generate_ideas_returns_four_normalized_ideas() {
    let app = test_app(Ok("- A\n- B\n"));
    let response = app
        .oneshot(json_post(
            "/generate-ideas",
            serde_json::json!({ "topic": "space travel" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let dto: GenerateIdeasResponse = serde_json::from_value(read_json(response).await).expect("dto");
    assert_eq!(
        dto.ideas,
        vec![
            "A",
            "B",
            "Example idea 3 for space travel",
            "Example idea 4 for space travel"
        ]
    );
}

#[tokio::test]
async fn generate_script_returns_trimmed_script() {
    let app = test_app(Ok("  INT. SPACESHIP...\n"));
    let response = app
        .oneshot(json_post(
            "/generate-script",
            serde_json::json!({ "idea": "B" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({ "script": "INT. SPACESHIP..." })
    );
}

#[tokio::test]
async fn blank_topic_is_bad_request() {
    let app = test_app(Ok("unused"));
    let response = app
        .oneshot(json_post("/generate-ideas", serde_json::json!({ "topic": "   " })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["code"], "validation");
}

#[tokio::test]
async fn provider_failure_is_internal_server_error() {
    let app = test_app(Err("connection refused"));
    let response = app
        .clone()
        .oneshot(json_post("/generate-ideas", serde_json::json!({ "topic": "cats" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["code"], "upstream");
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("connection refused"));

    let response = app
        .oneshot(json_post("/generate-script", serde_json::json!({ "idea": "x" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_body_is_rejected_by_extractor() {
    let app = test_app(Ok("unused"));
    let response = app
        .oneshot(json_post("/generate-ideas", serde_json::json!({ "subject": "cats" })))
        .await
        .expect("response");
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = test_app(Ok("unused"));
    let body = serde_json::json!({ "topic": "x".repeat(MAX_REQUEST_BODY_BYTES + 1) }).to_string();
    let request = Request::post("/generate-ideas")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
