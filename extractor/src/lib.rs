pub mod config;
pub mod document_processor;
pub mod error;
pub mod models;
pub mod ollama_service;
pub mod openai_service;
pub mod prompt;
pub mod query_service;
pub mod render;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use config::{Config, ResponseFormat};
pub use document_processor::DocumentProcessor;
pub use error::{ExtractionError, ServiceError, UpstreamError, ValidationError};
pub use models::*;
pub use ollama_service::OllamaService;
pub use openai_service::OpenAiService;
pub use query_service::{Backend, QueryService};
