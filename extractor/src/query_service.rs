use crate::config::{Config, ResponseFormat};
use crate::document_processor::DocumentProcessor;
use crate::error::{ServiceError, UpstreamError};
use crate::models::*;
use crate::ollama_service::OllamaService;
use crate::openai_service::OpenAiService;
use crate::prompt::format_prompt;
use crate::render::render;
use anyhow::Result;

/// The two completion backends behind one `prompt -> completion` call.
pub enum Backend {
    Ollama(OllamaService),
    OpenAi(OpenAiService),
}

impl Backend {
    pub async fn complete(&self, prompt: &str) -> Result<Completion, UpstreamError> {
        match self {
            Backend::Ollama(service) => service.generate(prompt).await.map(Completion::Envelope),
            Backend::OpenAi(service) => service.generate_response(prompt).await.map(Completion::Message),
        }
    }
}

pub struct QueryService {
    document_processor: DocumentProcessor,
    ollama: Backend,
    openai: Backend,
    response_format: ResponseFormat,
}

impl QueryService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            document_processor: DocumentProcessor::new(),
            ollama: Backend::Ollama(OllamaService::new(config)?),
            openai: Backend::OpenAi(OpenAiService::new(config)?),
            response_format: config.response_format,
        })
    }

    pub fn backend(&self, choice: ApiChoice) -> &Backend {
        match choice {
            ApiChoice::Ollama => &self.ollama,
            ApiChoice::OpenAi => &self.openai,
        }
    }

    /// Extract, prompt, dispatch, render. All or nothing.
    pub async fn run(&self, upload: Upload, choice: ApiChoice) -> Result<RenderedResponse, ServiceError> {
        let start_time = std::time::Instant::now();

        let text = self
            .document_processor
            .extract(upload.bytes, upload.range)
            .await?;
        let prompt = format_prompt(&text);

        log::info!(
            "Dispatching {} chars of text from {} (pages {}) to {}",
            text.chars().count(),
            upload.filename,
            upload.range,
            choice
        );

        let completion = self.backend(choice).complete(&prompt).await?;
        let rendered = render(completion, self.response_format)?;

        log::info!(
            "Completed {} request in {}ms",
            choice,
            start_time.elapsed().as_millis()
        );
        Ok(rendered)
    }
}
