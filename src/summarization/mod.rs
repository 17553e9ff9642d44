//! Abstractions over the model that condenses a chunk of text into a summary.
//!
//! The pipeline treats the summarizer as a black box: one request per chunk, carrying the
//! resolved token bounds and a deterministic decoding flag. Adapters issue HTTP requests
//! directly to the configured runtime.

mod huggingface;
mod ollama;

pub use huggingface::HuggingFaceSummarizer;
pub use ollama::OllamaSummarizer;

use crate::config::{Config, SummarizationProvider};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_HUGGINGFACE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while asking a provider to summarize a chunk.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Provider was unreachable or could not be constructed.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Request payload passed to the summarization provider for a single chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    /// Chunk of source text to condense.
    pub text: String,
    /// Lower bound on the generated summary, in model tokens.
    pub min_length: usize,
    /// Upper bound on the generated summary, in model tokens.
    pub max_length: usize,
    /// Whether the provider may sample; the pipeline always sends `false`.
    pub do_sample: bool,
}

/// Interface implemented by summarization providers.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce one summary string for the supplied chunk.
    async fn summarize(&self, request: SummarizationRequest) -> Result<String, SummarizerError>;
}

/// Build the summarizer selected by configuration.
pub fn build_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>, SummarizerError> {
    match config.summarization_provider {
        SummarizationProvider::HuggingFace => {
            let base_url = config
                .summarization_url
                .clone()
                .unwrap_or_else(|| DEFAULT_HUGGINGFACE_URL.to_string());
            Ok(Arc::new(HuggingFaceSummarizer::new(
                base_url,
                config.summarization_model.clone(),
                config.hf_api_token.clone(),
            )?))
        }
        SummarizationProvider::Ollama => {
            let base_url = config
                .summarization_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Ok(Arc::new(OllamaSummarizer::new(
                base_url,
                config.summarization_model.clone(),
            )?))
        }
    }
}

fn http_client(user_agent: &str) -> Result<reqwest::Client, SummarizerError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|error| {
            SummarizerError::ProviderUnavailable(format!("failed to build HTTP client: {error}"))
        })
}
