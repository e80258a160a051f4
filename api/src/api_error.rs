use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_extractor::{ErrorResponse, ExtractionError, ServiceError, UpstreamError, ValidationError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error: err.to_string(),
                kind: None,
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(v) => return v.clone().into(),
            ServiceError::Extraction(ExtractionError::PageOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            ServiceError::Extraction(ExtractionError::MalformedPdf(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Extraction(ExtractionError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Upstream(UpstreamError::NotConfigured { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Upstream(UpstreamError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            log::error!("Request failed: {}", err);
        } else {
            log::warn!("Request rejected: {}", err);
        }

        ApiError {
            status,
            body: ErrorResponse {
                error: err.to_string(),
                kind: Some(err.kind().to_string()),
            },
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError {
            status: err.status(),
            body: ErrorResponse {
                error: err.body_text(),
                kind: None,
            },
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError {
            status: rejection.status(),
            body: ErrorResponse {
                error: rejection.body_text(),
                kind: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn mapped(err: impl Into<ServiceError>) -> ApiError {
        ApiError::from(err.into())
    }

    #[test]
    fn internal_extraction_failure_is_a_server_error() {
        let err = mapped(ExtractionError::Internal("task panicked".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.kind.as_deref(), Some("internal"));
        assert!(err.body.error.contains("task panicked"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn every_service_error_maps_to_its_status_and_kind() {
        let cases: Vec<(ServiceError, StatusCode, &str)> = vec![
            (
                ExtractionError::MalformedPdf("bad xref".to_string()).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "malformed_pdf",
            ),
            (
                ExtractionError::PageOutOfRange { requested: 9, page_count: 3 }.into(),
                StatusCode::BAD_REQUEST,
                "page_out_of_range",
            ),
            (
                UpstreamError::NotConfigured { backend: "openai", reason: "no key".to_string() }.into(),
                StatusCode::SERVICE_UNAVAILABLE,
                "backend_not_configured",
            ),
            (
                UpstreamError::Timeout { backend: "ollama", timeout: Duration::from_millis(500) }.into(),
                StatusCode::GATEWAY_TIMEOUT,
                "upstream_timeout",
            ),
            (
                UpstreamError::Status { backend: "ollama", status: 500, body: "boom".to_string() }.into(),
                StatusCode::BAD_GATEWAY,
                "upstream_status",
            ),
            (
                UpstreamError::Transport { backend: "ollama", reason: "refused".to_string() }.into(),
                StatusCode::BAD_GATEWAY,
                "upstream_transport",
            ),
            (
                UpstreamError::MalformedResponse { backend: "openai", reason: "eof".to_string() }.into(),
                StatusCode::BAD_GATEWAY,
                "upstream_malformed",
            ),
        ];

        for (err, status, kind) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status, "{}", api.body.error);
            assert_eq!(api.body.kind.as_deref(), Some(kind));
        }
    }

    #[test]
    fn validation_errors_carry_no_kind() {
        let api = mapped(ValidationError::InvalidApiChoice);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.body.error, "Invalid API choice");
        assert_eq!(api.body.kind, None);
    }
}
