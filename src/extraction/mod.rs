//! Text extraction from uploaded documents.
//!
//! PDFs are parsed page by page; images are passed through an OCR engine. Both extractors are
//! plain collaborators behind [`TextExtractor`] so the pipeline can be exercised without native
//! tooling.

mod ocr;
mod pdf;

pub use ocr::TesseractOcrExtractor;
pub use pdf::PdfTextExtractor;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors raised while turning a stored upload into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF structure could not be parsed.
    #[error("Failed to parse PDF: {0}")]
    Pdf(String),
    /// The OCR engine failed to start or exited unsuccessfully.
    #[error("OCR failed: {0}")]
    Ocr(String),
    /// A blocking extraction task panicked or was cancelled.
    #[error("Extraction task aborted: {0}")]
    Task(String),
}

/// Interface implemented by document text extractors.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the raw text of the document stored at `path`.
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}
