use crate::config::ResponseFormat;
use crate::error::UpstreamError;
use crate::models::{Completion, RenderedResponse};
use crate::ollama_service::envelope_text;
use pulldown_cmark::{html, Options, Parser};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// CommonMark to HTML, with tables since the prompt asks for them.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub fn render(completion: Completion, format: ResponseFormat) -> Result<RenderedResponse, UpstreamError> {
    match (completion, format) {
        (Completion::Envelope(raw), ResponseFormat::Passthrough) => Ok(RenderedResponse {
            content_type: CONTENT_TYPE_JSON,
            body: raw,
        }),
        (Completion::Envelope(raw), ResponseFormat::Html) => Ok(RenderedResponse {
            content_type: CONTENT_TYPE_HTML,
            body: markdown_to_html(&envelope_text(&raw)?),
        }),
        (Completion::Message(text), _) => Ok(RenderedResponse {
            content_type: CONTENT_TYPE_HTML,
            body: markdown_to_html(&text),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_emphasis_and_tables() {
        let html = markdown_to_html(
            "### Highlights\n\n| Metric | FY 2023 |\n|---|---|\n| **Total GAAP Revenue** | $100 |\n",
        );
        assert!(html.contains("<h3>Highlights</h3>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<strong>Total GAAP Revenue</strong>"));
        assert!(html.contains("<td>$100</td>"));
    }

    #[test]
    fn passthrough_keeps_envelope_verbatim() {
        let raw = r##"{"model":"codellama","response":"# Hi","done":true}"##.to_string();
        let rendered = render(Completion::Envelope(raw.clone()), ResponseFormat::Passthrough).unwrap();
        assert_eq!(rendered.body, raw);
        assert_eq!(rendered.content_type, CONTENT_TYPE_JSON);
    }

    #[test]
    fn html_format_unwraps_envelope() {
        let raw = r##"{"model":"codellama","response":"# Hi","done":true}"##.to_string();
        let rendered = render(Completion::Envelope(raw), ResponseFormat::Html).unwrap();
        assert_eq!(rendered.body, "<h1>Hi</h1>\n");
        assert_eq!(rendered.content_type, CONTENT_TYPE_HTML);
    }

    #[test]
    fn messages_are_rendered_in_every_format() {
        for format in [ResponseFormat::Passthrough, ResponseFormat::Html] {
            let rendered = render(Completion::Message("*ok*".to_string()), format).unwrap();
            assert_eq!(rendered.body, "<p><em>ok</em></p>\n");
        }
    }

    #[test]
    fn html_format_rejects_envelope_without_response() {
        let err = render(Completion::Envelope("not json".to_string()), ResponseFormat::Html).unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedResponse { .. }));
    }
}
