use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Inclusive, 1-indexed page interval requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: u32,
    pub to: u32,
}

impl PageRange {
    pub fn new(from: u32, to: u32) -> Result<Self, ValidationError> {
        if from < 1 || to < 1 {
            return Err(ValidationError::InvalidPageRange);
        }
        Ok(Self { from, to })
    }

    /// Parses raw form values. Missing, non-numeric and non-positive values
    /// are all the same error.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, ValidationError> {
        let parse_one = |value: Option<&str>| -> Result<u32, ValidationError> {
            value
                .map(str::trim)
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v >= 1)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or(ValidationError::InvalidPageRange)
        };

        Self::new(parse_one(from)?, parse_one(to)?)
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Zero-indexed page indices covered by the range, in page order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        (self.from as usize - 1)..(self.to as usize)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Which completion backend handles the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiChoice {
    Ollama,
    OpenAi,
}

impl ApiChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiChoice::Ollama => "ollama",
            ApiChoice::OpenAi => "openai",
        }
    }
}

impl FromStr for ApiChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ollama" => Ok(ApiChoice::Ollama),
            "openai" => Ok(ApiChoice::OpenAi),
            _ => Err(ValidationError::InvalidApiChoice),
        }
    }
}

impl fmt::Display for ApiChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated upload, ready for extraction.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub range: PageRange,
}

/// What a backend handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Raw response body of the local model, transport wrapper included.
    Envelope(String),
    /// Generated message content of the hosted model, trimmed.
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_range_rejects_zero_and_garbage() {
        assert_eq!(PageRange::parse(Some("0"), Some("2")), Err(ValidationError::InvalidPageRange));
        assert_eq!(PageRange::parse(Some("1"), Some("-3")), Err(ValidationError::InvalidPageRange));
        assert_eq!(PageRange::parse(Some("one"), Some("2")), Err(ValidationError::InvalidPageRange));
        assert_eq!(PageRange::parse(None, Some("2")), Err(ValidationError::InvalidPageRange));
        assert_eq!(PageRange::parse(Some("1"), None), Err(ValidationError::InvalidPageRange));
    }

    #[test]
    fn page_range_indices_are_zero_based() {
        let range = PageRange::parse(Some("2"), Some(" 4 ")).unwrap();
        assert_eq!(range, PageRange { from: 2, to: 4 });
        assert_eq!(range.indices().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn reversed_range_is_empty() {
        let range = PageRange::new(3, 1).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.indices().count(), 0);
    }

    #[test]
    fn api_choice_accepts_only_known_backends() {
        assert_eq!("ollama".parse::<ApiChoice>(), Ok(ApiChoice::Ollama));
        assert_eq!("openai".parse::<ApiChoice>(), Ok(ApiChoice::OpenAi));
        assert_eq!("OpenAI".parse::<ApiChoice>(), Err(ValidationError::InvalidApiChoice));
        assert_eq!("gemini".parse::<ApiChoice>(), Err(ValidationError::InvalidApiChoice));
    }
}
