//! Core data types and error definitions for the processing pipeline.

use crate::{
    extraction::ExtractionError, keywords::KeywordError, summarization::SummarizerError,
    upload::UploadError,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while splitting raw text into chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// A chunk width of zero can never make progress.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
}

/// Errors produced by the summary pipeline.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// The extracted text was empty or whitespace only; nothing was sent to the model.
    #[error("Summarization Failed")]
    EmptyInput,
    /// The text could not be chunked.
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
    /// The summarization provider failed on a chunk.
    #[error(transparent)]
    Client(#[from] SummarizerError),
}

/// Errors emitted while processing an uploaded document end to end.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Upload was rejected or could not be stored.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Text extraction failed.
    #[error("Failed to extract text: {0}")]
    Extraction(#[from] ExtractionError),
    /// Summarization failed for a reason other than empty input.
    #[error("Failed to summarize document: {0}")]
    Summarization(#[from] SummarizationError),
    /// Keyword ranking failed.
    #[error("Failed to extract keywords: {0}")]
    Keywords(#[from] KeywordError),
}

/// Result of analysing one document: the triple handed to the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentAnalysis {
    /// Summary with keyword spans inserted, when a summary was requested and produced.
    pub summary: Option<String>,
    /// Keywords ranked most relevant first, when a summary was produced.
    pub keywords: Option<Vec<String>>,
    /// Raw text extracted from the document.
    pub extracted_text: String,
    /// Reason a requested summary is missing (`"Summarization Failed"` for blank text).
    pub summary_error: Option<String>,
}
