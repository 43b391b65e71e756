//! Google Gemini `generateContent` adapter used for idea generation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{read_error_body, require_non_empty, IdeaProvider, ProviderError};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct GeminiProvider {
    http: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        require_non_empty(&config.api_key, "Gemini API key")?;
        require_non_empty(&config.model, "Gemini model name")?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ProviderError::configuration(format!("http client: {err}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model.trim()
        )
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl IdeaProvider for GeminiProvider {
    async fn complete_ideas(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        let start = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProviderError::transport(format!("Gemini request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }
        let parsed: GeminiResponse = response.json().await.map_err(|err| {
            ProviderError::invalid_response(format!("invalid Gemini response JSON: {err}"))
        })?;
        tracing::info!(
            model = %self.config.model,
            elapsed = ?start.elapsed(),
            "Gemini request completed"
        );

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::invalid_response("Gemini response had no candidates"))?;
        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ProviderError::invalid_response(
                "Gemini candidate contained no text",
            ));
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
