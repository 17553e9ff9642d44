use super::{SummarizationRequest, Summarizer, SummarizerError, http_client};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Summarizer that prompts a local Ollama model.
///
/// Ollama has no native minimum length, so the token budget is stated in the prompt and the
/// upper bound is also enforced through `num_predict`.
pub struct OllamaSummarizer {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizer {
    /// Create a client for `model` served by the Ollama runtime at `base_url`.
    pub fn new(base_url: String, model: String) -> Result<Self, SummarizerError> {
        Ok(Self {
            http: http_client("doc-summarizer/summary")?,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn build_prompt(request: &SummarizationRequest) -> String {
    format!(
        "Summarize the following text in plain prose between {} and {} tokens. \
         Return only the summary.\n\n{}",
        request.min_length, request.max_length, request.text
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, request: SummarizationRequest) -> Result<String, SummarizerError> {
        let temperature = if request.do_sample { 0.7 } else { 0.0 };
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request),
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": request.max_length,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizerError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizerError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizerError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(SummarizerError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}
