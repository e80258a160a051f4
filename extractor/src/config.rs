use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// How backend output is turned into an HTTP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Ollama's envelope as-is, OpenAI's content as HTML.
    #[default]
    Passthrough,
    /// Generated text of either backend as HTML.
    Html,
}

impl FromStr for ResponseFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(ResponseFormat::Passthrough),
            "html" => Ok(ResponseFormat::Html),
            other => Err(anyhow::anyhow!(
                "unknown response format '{}', expected 'passthrough' or 'html'",
                other
            )),
        }
    }
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub upstream_timeout: Duration,
    pub response_format: ResponseFormat,
    pub bind_addr: String,
    pub log_file: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "codellama".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            upstream_timeout: Duration::from_secs(120),
            response_format: ResponseFormat::default(),
            bind_addr: "0.0.0.0:5000".to_string(),
            log_file: "app.log".to_string(),
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("UPSTREAM_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            None => defaults.upstream_timeout,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a number: {}", raw))?,
            None => defaults.max_upload_bytes,
        };

        let response_format = match get("RESPONSE_FORMAT") {
            Some(raw) => raw.parse::<ResponseFormat>().context("invalid RESPONSE_FORMAT")?,
            None => defaults.response_format,
        };

        Ok(Self {
            ollama_base_url: get("OLLAMA_BASE_URL")
                .map(|url| trim_base_url(&url))
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .map(|url| trim_base_url(&url))
                .unwrap_or(defaults.openai_base_url),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            upstream_timeout,
            response_format,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            log_file: get("LOG_FILE").unwrap_or(defaults.log_file),
            max_upload_bytes,
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
