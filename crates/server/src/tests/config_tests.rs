use super::{resolve_settings, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = resolve_settings(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.gemini_model, "gemini-2.5-flash");
    assert_eq!(settings.groq_model, "openai/gpt-oss-20b");
}

#[test]
fn file_values_override_defaults_and_env_overrides_file() {
    let file = r#"
        bind_addr = "0.0.0.0:9000"
        groq_model = "llama-test"
        provider_timeout_seconds = 30
    "#;
    let settings = resolve_settings(
        Some(file),
        env_from(&[("APP__BIND_ADDR", "127.0.0.1:7000"), ("GROQ_API_KEY", "q")]),
    )
    .expect("settings");

    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.groq_model, "llama-test");
    assert_eq!(settings.provider_timeout_seconds, 30);
    assert_eq!(settings.groq_api_key.as_deref(), Some("q"));
}

#[test]
fn blank_env_values_are_ignored() {
    let settings = resolve_settings(None, env_from(&[("GOOGLE_API_KEY", "  ")])).expect("settings");
    assert!(settings.google_api_key.is_none());
}

#[test]
fn invalid_file_is_reported() {
    let err = resolve_settings(Some("bind_addr = ["), env_from(&[])).expect_err("bad toml");
    assert!(err.to_string().contains("server.toml"));
}

#[test]
fn provider_configs_require_api_keys() {
    let settings = Settings::default();
    let err = settings.gemini_config().expect_err("missing key");
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
    assert!(settings.groq_config().is_err());

    let settings = resolve_settings(
        None,
        env_from(&[("GOOGLE_API_KEY", "g"), ("GROQ_API_KEY", "q")]),
    )
    .expect("settings");
    let gemini = settings.gemini_config().expect("gemini");
    assert_eq!(gemini.api_key, "g");
    let groq = settings.groq_config().expect("groq");
    assert_eq!(groq.max_completion_tokens, 3000);
    assert_eq!(groq.timeout.as_secs(), 120);
}
