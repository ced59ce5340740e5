use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::advisor::universities::DEFAULT_MAX_RESULTS;
use crate::llm_client::LlmConfig;

const DEFAULT_MODEL: &str = "llama3.1";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// `None` runs the rule-based engine only.
    pub llm: Option<LlmConfig>,
    pub max_university_results: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm = llm_config(
            std::env::var("OLLAMA_BASE_URL").ok(),
            std::env::var("OLLAMA_MODEL").ok(),
            parse_env("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            parse_env("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
        );

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm,
            max_university_results: parse_env("MAX_UNIVERSITY_RESULTS", DEFAULT_MAX_RESULTS)?,
        })
    }
}

/// Builds the model settings. A missing or blank base URL disables the model.
fn llm_config(
    base_url: Option<String>,
    model: Option<String>,
    temperature: f32,
    timeout_secs: u64,
) -> Option<LlmConfig> {
    let base_url = base_url.filter(|u| !u.trim().is_empty())?;
    Some(LlmConfig {
        base_url,
        model: model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        temperature,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
