//! Processing service coordinating extraction, summarization, keywords, and highlighting.

use crate::{
    config::{Config, HighlightMode},
    extraction::{PdfTextExtractor, TesseractOcrExtractor, TextExtractor},
    keywords::{KeywordModel, StatisticalKeywordModel},
    metrics::{MetricsSnapshot, PipelineMetrics},
    processing::{
        chunking::{MAX_CHUNK_CHARS, chunk_text},
        highlight::highlight,
        keywords::{DEFAULT_TOP_N, extract_keywords},
        length::LengthTier,
        types::{DocumentAnalysis, ProcessingError, SummarizationError},
    },
    summarization::{SummarizationRequest, Summarizer, SummarizerError, build_summarizer},
    upload::{DocumentKind, save_upload, validate_upload},
};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Summary text together with the number of chunks that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Per-chunk summaries joined by single spaces, trimmed.
    pub text: String,
    /// Number of chunks sent to the summarizer.
    pub chunk_count: usize,
}

/// Summarize `text` at the given tier, one summarizer call per chunk, in order.
///
/// Blank text fails with [`SummarizationError::EmptyInput`] before any chunking or model call.
/// Provider errors abort the whole summary; nothing is retried.
pub async fn generate_summary(
    summarizer: &dyn Summarizer,
    text: &str,
    tier: LengthTier,
) -> Result<Summary, SummarizationError> {
    if text.trim().is_empty() {
        return Err(SummarizationError::EmptyInput);
    }

    let bounds = tier.bounds();
    let mut combined = String::new();
    let mut chunk_count = 0usize;

    for chunk in chunk_text(text, MAX_CHUNK_CHARS)? {
        chunk_count += 1;
        tracing::debug!(
            chunk = chunk_count,
            chars = chunk.chars().count(),
            tier = tier.as_str(),
            "Summarizing chunk"
        );
        let partial = summarizer
            .summarize(SummarizationRequest {
                text: chunk.to_string(),
                min_length: bounds.min_length,
                max_length: bounds.max_length,
                do_sample: false,
            })
            .await?;
        combined.push_str(&partial);
        combined.push(' ');
    }

    Ok(Summary {
        text: combined.trim().to_string(),
        chunk_count,
    })
}

/// External capabilities the pipeline depends on, constructed by the composition root.
#[derive(Clone)]
pub struct Collaborators {
    /// Chunk summarizer.
    pub summarizer: Arc<dyn Summarizer>,
    /// Keyword ranking model.
    pub keyword_model: Arc<dyn KeywordModel>,
    /// Text extractor for PDF uploads.
    pub pdf_extractor: Arc<dyn TextExtractor>,
    /// Text extractor for image uploads.
    pub image_extractor: Arc<dyn TextExtractor>,
}

impl Collaborators {
    /// Build the production collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, SummarizerError> {
        Ok(Self {
            summarizer: build_summarizer(config)?,
            keyword_model: Arc::new(StatisticalKeywordModel::new()),
            pdf_extractor: Arc::new(PdfTextExtractor::new()),
            image_extractor: Arc::new(TesseractOcrExtractor::new(config.tesseract_bin.clone())),
        })
    }
}

/// Tunables for a [`ProcessingService`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Keywords kept per summary.
    pub keyword_top_n: usize,
    /// Highlighting strategy.
    pub highlight_mode: HighlightMode,
    /// Directory receiving uploads.
    pub upload_dir: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            keyword_top_n: DEFAULT_TOP_N,
            highlight_mode: HighlightMode::default(),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            keyword_top_n: config.keyword_top_n,
            highlight_mode: config.highlight_mode,
            upload_dir: config.upload_dir.clone(),
        }
    }
}

/// An uploaded file as received at the HTTP boundary.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    /// Client-supplied filename, if any.
    pub filename: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
    /// Requested summary tier; absent or empty means no summary.
    pub summary_length: Option<String>,
}

/// Outcome of processing one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedUpload {
    /// Sanitised filename the upload was stored under.
    pub filename: String,
    /// Echo of the requested summary tier.
    pub summary_length: Option<String>,
    /// Extracted text, summary, and keywords.
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
}

/// Abstraction over the pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// Validate, store, extract, and analyse an uploaded document.
    async fn process_upload(
        &self,
        kind: DocumentKind,
        upload: Upload,
    ) -> Result<ProcessedUpload, ProcessingError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates the full pipeline: extraction, chunked summarization, keywords, highlighting.
///
/// All collaborators are injected; construct the service once near process start and share it
/// through an `Arc`.
pub struct ProcessingService {
    collaborators: Collaborators,
    settings: PipelineSettings,
    metrics: Arc<PipelineMetrics>,
}

impl ProcessingService {
    /// Build a service from explicit collaborators and settings.
    pub fn new(collaborators: Collaborators, settings: PipelineSettings) -> Self {
        Self {
            collaborators,
            settings,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Extract raw text from a stored document.
    pub async fn extract(
        &self,
        kind: DocumentKind,
        path: &Path,
    ) -> Result<String, ProcessingError> {
        let extractor = match kind {
            DocumentKind::Pdf => &self.collaborators.pdf_extractor,
            DocumentKind::Image => &self.collaborators.image_extractor,
        };
        let text = extractor.extract_text(path).await?;
        self.metrics.record_document();
        Ok(text)
    }

    /// Summarize `text` at `tier` using the injected summarizer.
    pub async fn summarize(
        &self,
        text: &str,
        tier: LengthTier,
    ) -> Result<Summary, SummarizationError> {
        let result = generate_summary(self.collaborators.summarizer.as_ref(), text, tier).await;
        match &result {
            Ok(summary) => self.metrics.record_chunks(summary.chunk_count as u64),
            Err(SummarizationError::EmptyInput) => self.metrics.record_failed_summary(),
            Err(_) => {}
        }
        result
    }

    /// Produce the summary, keyword, and text triple for already extracted text.
    ///
    /// Without a (non-empty) `summary_length` only the text is returned. Blank text yields no
    /// summary and no keywords, with `summary_error` explaining why.
    pub async fn analyze(
        &self,
        extracted_text: String,
        summary_length: Option<&str>,
    ) -> Result<DocumentAnalysis, ProcessingError> {
        let Some(selector) = summary_length.filter(|value| !value.is_empty()) else {
            return Ok(DocumentAnalysis {
                extracted_text,
                ..DocumentAnalysis::default()
            });
        };

        let tier = LengthTier::from_selector(Some(selector));
        let summary = match self.summarize(&extracted_text, tier).await {
            Ok(summary) => summary,
            Err(error @ SummarizationError::EmptyInput) => {
                tracing::warn!(tier = tier.as_str(), "No text to summarize");
                return Ok(DocumentAnalysis {
                    extracted_text,
                    summary_error: Some(error.to_string()),
                    ..DocumentAnalysis::default()
                });
            }
            Err(error) => return Err(error.into()),
        };

        let keywords = extract_keywords(
            self.collaborators.keyword_model.as_ref(),
            &summary.text,
            self.settings.keyword_top_n,
        )
        .await?;
        let highlighted = highlight(&summary.text, &keywords, self.settings.highlight_mode);

        tracing::info!(
            tier = tier.as_str(),
            chunks = summary.chunk_count,
            summary_chars = summary.text.chars().count(),
            keywords = keywords.len(),
            "Summary generated"
        );

        Ok(DocumentAnalysis {
            summary: Some(highlighted),
            keywords: Some(keywords),
            extracted_text,
            summary_error: None,
        })
    }
}

#[async_trait]
impl ProcessingApi for ProcessingService {
    async fn process_upload(
        &self,
        kind: DocumentKind,
        upload: Upload,
    ) -> Result<ProcessedUpload, ProcessingError> {
        let Upload {
            filename,
            bytes,
            summary_length,
        } = upload;
        let filename = validate_upload(kind, filename.as_deref())?;
        let path = save_upload(&self.settings.upload_dir, &filename, &bytes).await?;
        tracing::info!(file = %filename, kind = ?kind, bytes = bytes.len(), "Processing upload");

        let text = self.extract(kind, &path).await?;
        let analysis = self.analyze(text, summary_length.as_deref()).await?;

        Ok(ProcessedUpload {
            filename,
            summary_length,
            analysis,
        })
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
