use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;

const BACKEND: &str = "openai";
const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiService {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout: config.upstream_timeout,
        })
    }

    /// Sends the prompt as a chat completion and returns the trimmed message content.
    pub async fn generate_response(&self, prompt: &str) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| UpstreamError::NotConfigured {
            backend: BACKEND,
            reason: "OPENAI_API_KEY environment variable not set".to_string(),
        })?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_MESSAGE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self.client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(BACKEND, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                backend: BACKEND,
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout { backend: BACKEND, timeout: self.timeout }
            } else {
                UpstreamError::MalformedResponse {
                    backend: BACKEND,
                    reason: e.to_string(),
                }
            }
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| UpstreamError::MalformedResponse {
                backend: BACKEND,
                reason: "response contained no choices".to_string(),
            })?;

        log::debug!("OpenAI response: {}", content);
        Ok(content)
    }
}
