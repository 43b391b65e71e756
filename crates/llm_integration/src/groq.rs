//! Groq adapter speaking the OpenAI-compatible chat completions API, used for
//! script generation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{read_error_body, require_non_empty, ProviderError, ScriptProvider};

pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

#[derive(Clone, Debug)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub max_completion_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "openai/gpt-oss-20b".to_string(),
            api_base: GROQ_API_BASE.to_string(),
            max_completion_tokens: 3000,
            temperature: 1.0,
            timeout: Duration::from_secs(120),
        }
    }
}

pub struct GroqProvider {
    http: Client,
    config: GroqConfig,
}

impl GroqProvider {
    pub fn new(config: GroqConfig) -> Result<Self, ProviderError> {
        require_non_empty(&config.api_key, "Groq API key")?;
        require_non_empty(&config.model, "Groq model name")?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ProviderError::configuration(format!("http client: {err}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{CHAT_COMPLETIONS_PATH}",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ScriptProvider for GroqProvider {
    async fn complete_script(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_completion_tokens": self.config.max_completion_tokens,
            "temperature": self.config.temperature,
        });
        let start = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.trim())
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProviderError::transport(format!("Groq request failed: {err}")))?;
        if !response.status().is_success() {
            return Err(read_error_body(response).await);
        }
        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ProviderError::invalid_response(format!("invalid Groq response JSON: {err}"))
        })?;
        tracing::info!(
            model = %self.config.model,
            elapsed = ?start.elapsed(),
            "Groq request completed"
        );

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::invalid_response("Groq response had no choices"))?;
        Ok(choice.message.content.unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
