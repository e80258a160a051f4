use crate::error::ExtractionError;
use crate::models::PageRange;
use std::panic::{self, AssertUnwindSafe};

const PREVIEW_CHARS: usize = 500;

pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the text of `range` off the blocking pool.
    pub async fn extract(&self, bytes: Vec<u8>, range: PageRange) -> Result<String, ExtractionError> {
        tokio::task::spawn_blocking(move || Self::extract_pages(&bytes, range))
            .await
            .map_err(|e| ExtractionError::Internal(e.to_string()))?
    }

    /// Concatenates the plain text of every page in `range`, in page order.
    ///
    /// A reversed range (`from > to`) is empty and yields an empty string.
    /// A non-empty range must end within the document.
    pub fn extract_pages(bytes: &[u8], range: PageRange) -> Result<String, ExtractionError> {
        let pages = Self::load_pages(bytes)?;

        if !range.is_empty() && range.to as usize > pages.len() {
            return Err(ExtractionError::PageOutOfRange {
                requested: range.to,
                page_count: pages.len(),
            });
        }

        let text: String = pages[range.indices()].concat();

        log::debug!(
            "Extracted text from pages {} to {}: {}...",
            range.from,
            range.to,
            preview(&text)
        );
        Ok(text)
    }

    pub fn page_count(bytes: &[u8]) -> Result<usize, ExtractionError> {
        Ok(Self::load_pages(bytes)?.len())
    }

    fn load_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        guard_parser(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
    }
}

/// Runs a page parser, turning both its errors and its panics into `MalformedPdf`.
///
/// pdf-extract panics on some malformed inputs instead of erroring.
fn guard_parser<F, E>(parse: F) -> Result<Vec<String>, ExtractionError>
where
    F: FnOnce() -> Result<Vec<String>, E>,
    E: std::fmt::Display,
{
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractionError::MalformedPdf(e.to_string())),
        Err(_) => Err(ExtractionError::MalformedPdf(
            "parser aborted on this document".to_string(),
        )),
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::pdf_with_pages;

    fn three_pages() -> Vec<u8> {
        pdf_with_pages(&["Quarterly overview", "Total GAAP Revenue: $100", "Segment notes"])
    }

    #[test]
    fn single_page_range_returns_only_that_page() {
        let text = DocumentProcessor::extract_pages(&three_pages(), PageRange::new(2, 2).unwrap()).unwrap();
        assert!(text.contains("Total GAAP Revenue: $100"));
        assert!(!text.contains("Quarterly overview"));
        assert!(!text.contains("Segment notes"));
    }

    #[test]
    fn multi_page_range_keeps_page_order() {
        let bytes = three_pages();
        let text = DocumentProcessor::extract_pages(&bytes, PageRange::new(1, 3).unwrap()).unwrap();

        let first = text.find("Quarterly overview").unwrap();
        let second = text.find("Total GAAP Revenue").unwrap();
        let third = text.find("Segment notes").unwrap();
        assert!(first < second && second < third);

        let concatenated: String = (1..=3)
            .map(|n| DocumentProcessor::extract_pages(&bytes, PageRange::new(n, n).unwrap()).unwrap())
            .collect();
        assert_eq!(text, concatenated);
    }

    #[test]
    fn reversed_range_is_empty_not_an_error() {
        let text = DocumentProcessor::extract_pages(&three_pages(), PageRange::new(3, 2).unwrap()).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn range_past_last_page_is_rejected() {
        let err = DocumentProcessor::extract_pages(&three_pages(), PageRange::new(2, 5).unwrap()).unwrap_err();
        match err {
            ExtractionError::PageOutOfRange { requested, page_count } => {
                assert_eq!(requested, 5);
                assert_eq!(page_count, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn garbage_bytes_are_malformed() {
        let err = DocumentProcessor::extract_pages(b"not a pdf at all", PageRange::new(1, 1).unwrap()).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedPdf(_)));
    }

    #[test]
    fn parser_panic_is_reported_as_malformed() {
        let err = guard_parser(|| -> Result<Vec<String>, String> { panic!("unexpected xref entry") })
            .unwrap_err();
        match err {
            ExtractionError::MalformedPdf(reason) => assert_eq!(reason, "parser aborted on this document"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parser_error_message_is_kept() {
        let err = guard_parser(|| Err::<Vec<String>, _>("missing trailer")).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedPdf(reason) if reason == "missing trailer"));
    }

    #[test]
    fn counts_pages() {
        assert_eq!(DocumentProcessor::page_count(&three_pages()).unwrap(), 3);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "€".repeat(600);
        assert_eq!(preview(&text).chars().count(), 500);
        assert_eq!(preview("short"), "short");
    }

    #[tokio::test]
    async fn async_extract_matches_blocking_path() {
        let bytes = three_pages();
        let range = PageRange::new(1, 2).unwrap();
        let expected = DocumentProcessor::extract_pages(&bytes, range).unwrap();
        let actual = DocumentProcessor::new().extract(bytes, range).await.unwrap();
        assert_eq!(actual, expected);
    }
}
