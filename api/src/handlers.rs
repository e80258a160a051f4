use crate::api_error::ApiError;
use crate::routes::AppState;
use crate::upload_form::UPLOAD_FORM;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_extractor::{ApiChoice, PageRange, Upload, ValidationError};
use serde_json::json;

pub async fn upload_file() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Raw multipart fields as they came off the wire.
#[derive(Default)]
struct ExtractForm {
    file: Option<(String, Vec<u8>)>,
    from_page: Option<String>,
    to_page: Option<String>,
    api_choice: Option<String>,
}

impl ExtractForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = ExtractForm::default();

        // Repeated fields keep their first value.
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                // A `file` part without a filename is a plain text field, not an upload.
                "file" => {
                    if form.file.is_none() {
                        if let Some(filename) = field.file_name().map(str::to_string) {
                            let bytes = field.bytes().await?;
                            form.file = Some((filename, bytes.to_vec()));
                        }
                    }
                }
                "from_page" if form.from_page.is_none() => form.from_page = Some(field.text().await?),
                "to_page" if form.to_page.is_none() => form.to_page = Some(field.text().await?),
                "api_choice" if form.api_choice.is_none() => form.api_choice = Some(field.text().await?),
                _ => {}
            }
        }

        Ok(form)
    }

    /// Checks run in the order callers see them reported.
    fn validate(self) -> Result<(Upload, ApiChoice), ValidationError> {
        let (filename, bytes) = self.file.ok_or(ValidationError::MissingFile)?;
        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename);
        }

        let range = PageRange::parse(self.from_page.as_deref(), self.to_page.as_deref())?;
        let choice = self
            .api_choice
            .as_deref()
            .ok_or(ValidationError::InvalidApiChoice)?
            .parse::<ApiChoice>()?;

        Ok((Upload { filename, bytes, range }, choice))
    }
}

pub async fn extract_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart?;
    let (upload, choice) = ExtractForm::read(&mut multipart).await?.validate()?;

    log::debug!(
        "Received file: {}, from page: {}, to page: {}, API choice: {}",
        upload.filename,
        upload.range.from,
        upload.range.to,
        choice
    );

    let rendered = state.query_service.run(upload, choice).await?;

    Ok(([(header::CONTENT_TYPE, rendered.content_type)], rendered.body).into_response())
}
