use std::time::Duration;
use thiserror::Error;

/// Bad request input. Always the caller's fault, always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid page range")]
    InvalidPageRange,

    #[error("Invalid API choice")]
    InvalidApiChoice,

    #[error("{0}")]
    MalformedForm(String),
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read PDF: {0}")]
    MalformedPdf(String),

    #[error("Page {requested} is out of range, document has {page_count} page(s)")]
    PageOutOfRange { requested: u32, page_count: usize },

    #[error("PDF extraction failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{backend} backend is not configured: {reason}")]
    NotConfigured { backend: &'static str, reason: String },

    #[error("{backend} returned HTTP {status}: {body}")]
    Status {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("{backend} request timed out after {timeout:?}")]
    Timeout { backend: &'static str, timeout: Duration },

    #[error("{backend} request failed: {reason}")]
    Transport { backend: &'static str, reason: String },

    #[error("{backend} returned an unexpected payload: {reason}")]
    MalformedResponse { backend: &'static str, reason: String },
}

impl UpstreamError {
    pub(crate) fn from_reqwest(backend: &'static str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { backend, timeout }
        } else {
            UpstreamError::Transport {
                backend,
                reason: err.to_string(),
            }
        }
    }
}

/// Everything a single extraction request can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ServiceError {
    /// Stable machine-readable tag for the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::Extraction(ExtractionError::MalformedPdf(_)) => "malformed_pdf",
            ServiceError::Extraction(ExtractionError::PageOutOfRange { .. }) => "page_out_of_range",
            ServiceError::Extraction(ExtractionError::Internal(_)) => "internal",
            ServiceError::Upstream(UpstreamError::NotConfigured { .. }) => "backend_not_configured",
            ServiceError::Upstream(UpstreamError::Status { .. }) => "upstream_status",
            ServiceError::Upstream(UpstreamError::Timeout { .. }) => "upstream_timeout",
            ServiceError::Upstream(UpstreamError::Transport { .. }) => "upstream_transport",
            ServiceError::Upstream(UpstreamError::MalformedResponse { .. }) => "upstream_malformed",
        }
    }
}
