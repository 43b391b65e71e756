use std::{fs, time::Duration};

use anyhow::{bail, Context};
use llm_integration::{
    gemini::GEMINI_API_BASE, groq::GROQ_API_BASE, GeminiConfig, GroqConfig,
};
use serde::Deserialize;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub google_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub groq_model: String,
    pub groq_api_base: String,
    pub provider_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            google_api_key: None,
            groq_api_key: None,
            gemini_model: GeminiConfig::default().model,
            gemini_api_base: GEMINI_API_BASE.into(),
            groq_model: GroqConfig::default().model,
            groq_api_base: GROQ_API_BASE.into(),
            provider_timeout_seconds: 120,
        }
    }
}

/// Keys accepted in `server.toml`. API keys are only read from the
/// environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    bind_addr: Option<String>,
    gemini_model: Option<String>,
    gemini_api_base: Option<String>,
    groq_model: Option<String>,
    groq_api_base: Option<String>,
    provider_timeout_seconds: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {SETTINGS_FILE}"));
        }
    };
    resolve_settings(file.as_deref(), |name| std::env::var(name).ok())
}

/// Layers defaults, then the optional settings file, then environment
/// variables. Empty environment values are ignored.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("invalid {SETTINGS_FILE}"))?;
        if let Some(v) = file_cfg.bind_addr {
            settings.server_bind = v;
        }
        if let Some(v) = file_cfg.gemini_model {
            settings.gemini_model = v;
        }
        if let Some(v) = file_cfg.gemini_api_base {
            settings.gemini_api_base = v;
        }
        if let Some(v) = file_cfg.groq_model {
            settings.groq_model = v;
        }
        if let Some(v) = file_cfg.groq_api_base {
            settings.groq_api_base = v;
        }
        if let Some(v) = file_cfg.provider_timeout_seconds {
            settings.provider_timeout_seconds = v;
        }
    }

    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("GOOGLE_API_KEY") {
        settings.google_api_key = Some(v);
    }
    if let Some(v) = lookup("GROQ_API_KEY") {
        settings.groq_api_key = Some(v);
    }
    if let Some(v) = lookup("APP__GEMINI_MODEL") {
        settings.gemini_model = v;
    }
    if let Some(v) = lookup("APP__GROQ_MODEL") {
        settings.groq_model = v;
    }
    if let Some(v) = lookup("APP__PROVIDER_TIMEOUT_SECONDS") {
        settings.provider_timeout_seconds = v
            .parse()
            .with_context(|| format!("APP__PROVIDER_TIMEOUT_SECONDS is not a number: {v}"))?;
    }

    Ok(settings)
}

impl Settings {
    pub fn gemini_config(&self) -> anyhow::Result<GeminiConfig> {
        let Some(api_key) = self.google_api_key.clone() else {
            bail!("GOOGLE_API_KEY is not set; export it before starting the server");
        };
        Ok(GeminiConfig {
            api_key,
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout: Duration::from_secs(self.provider_timeout_seconds),
        })
    }

    pub fn groq_config(&self) -> anyhow::Result<GroqConfig> {
        let Some(api_key) = self.groq_api_key.clone() else {
            bail!("GROQ_API_KEY is not set; export it before starting the server");
        };
        Ok(GroqConfig {
            api_key,
            model: self.groq_model.clone(),
            api_base: self.groq_api_base.clone(),
            timeout: Duration::from_secs(self.provider_timeout_seconds),
            ..GroqConfig::default()
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
