use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;

const BACKEND: &str = "ollama";

pub struct OllamaService {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaService {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.ollama_base_url.clone(),
            model: config.ollama_model.clone(),
            timeout: config.upstream_timeout,
        })
    }

    /// Runs a non-streaming generation and hands back the raw response body.
    pub async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);

        let response = self.client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(BACKEND, self.timeout, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(BACKEND, self.timeout, e))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                backend: BACKEND,
                status: status.as_u16(),
                body,
            });
        }

        log::debug!("Ollama response: {}", body);
        Ok(body)
    }
}

/// Pulls the generated text out of an Ollama envelope.
pub fn envelope_text(envelope: &str) -> Result<String, UpstreamError> {
    let parsed: OllamaResponse = serde_json::from_str(envelope).map_err(|e| {
        UpstreamError::MalformedResponse {
            backend: BACKEND,
            reason: e.to_string(),
        }
    })?;
    Ok(parsed.response.trim().to_string())
}
