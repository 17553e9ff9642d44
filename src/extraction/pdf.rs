use super::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use pdf_oxide::PdfDocument;
use std::path::{Path, PathBuf};

/// Extracts the text layer of a PDF, concatenating pages in order.
///
/// A page whose text cannot be extracted contributes an empty string; only a document that
/// cannot be opened at all is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Construct the extractor.
    pub const fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<String, ExtractionError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|error| ExtractionError::Pdf(format!("failed to open PDF: {error}")))?;

        let page_count = doc.page_count().map_err(|error| {
            ExtractionError::Pdf(format!("failed to read page count: {error}"))
        })?;

        let mut text = String::new();
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(page_text) => text.push_str(&page_text),
                Err(error) => {
                    tracing::warn!(
                        page = page_index + 1,
                        error = %error,
                        "Skipping unreadable PDF page"
                    );
                }
            }
        }

        tracing::debug!(pages = page_count, chars = text.chars().count(), "Extracted PDF text");
        Ok(text)
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_pages(&owned))
            .await
            .map_err(|error| ExtractionError::Task(error.to_string()))?
    }
}
