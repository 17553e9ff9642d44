use super::{SummarizationRequest, Summarizer, SummarizerError, http_client};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Summarizer backed by a Hugging Face inference-style `summarization` endpoint.
///
/// The endpoint receives `inputs` plus `min_length`/`max_length`/`do_sample` parameters and
/// answers with a list of `{ "summary_text": ... }` objects; the first entry is used.
pub struct HuggingFaceSummarizer {
    http: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceSummarizer {
    /// Create a client for `model` hosted under `base_url`.
    pub fn new(
        base_url: String,
        model: String,
        api_token: Option<String>,
    ) -> Result<Self, SummarizerError> {
        Ok(Self {
            http: http_client("doc-summarizer/summary")?,
            base_url,
            model,
            api_token,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    summary_text: String,
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, request: SummarizationRequest) -> Result<String, SummarizerError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "min_length": request.min_length,
                "max_length": request.max_length,
                "do_sample": request.do_sample,
            }
        });

        let mut builder = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            SummarizerError::ProviderUnavailable(format!(
                "failed to reach {}: {error}",
                self.base_url
            ))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizerError::ProviderUnavailable(format!(
                "model endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::GenerationFailed(format!(
                "provider returned {status}: {body}"
            )));
        }

        let items: Vec<SummaryItem> = response.json().await.map_err(|error| {
            SummarizerError::InvalidResponse(format!("failed to decode summary list: {error}"))
        })?;

        items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or_else(|| SummarizerError::InvalidResponse("empty summary list".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn request(text: &str) -> SummarizationRequest {
        SummarizationRequest {
            text: text.into(),
            min_length: 30,
            max_length: 60,
            do_sample: false,
        }
    }

    #[tokio::test]
    async fn sends_bounds_and_reads_first_summary() {
        let server = MockServer::start_async().await;
        let client =
            HuggingFaceSummarizer::new(server.base_url(), "t5-small".into(), Some("secret".into()))
                .expect("client");

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/t5-small")
                    .header("authorization", "Bearer secret")
                    .json_body(json!({
                        "inputs": "Long passage",
                        "parameters": {
                            "min_length": 30,
                            "max_length": 60,
                            "do_sample": false
                        }
                    }));
                then.status(200).json_body(json!([
                    { "summary_text": "Short passage" },
                    { "summary_text": "ignored" }
                ]));
            })
            .await;

        let summary = client
            .summarize(request("Long passage"))
            .await
            .expect("summary");

        mock.assert_async().await;
        assert_eq!(summary, "Short passage");
    }

    #[tokio::test]
    async fn error_status_is_reported_as_generation_failure() {
        let server = MockServer::start_async().await;
        let client =
            HuggingFaceSummarizer::new(server.base_url(), "t5-small".into(), None).expect("client");

        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/t5-small");
                then.status(503).body("model is loading");
            })
            .await;

        let error = client
            .summarize(request("text"))
            .await
            .expect_err("error response");

        assert!(
            matches!(&error, SummarizerError::GenerationFailed(message) if message.contains("503"))
        );
    }

    #[tokio::test]
    async fn empty_list_is_invalid() {
        let server = MockServer::start_async().await;
        let client =
            HuggingFaceSummarizer::new(server.base_url(), "t5-small".into(), None).expect("client");

        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/t5-small");
                then.status(200).json_body(json!([]));
            })
            .await;

        let error = client
            .summarize(request("text"))
            .await
            .expect_err("empty list");

        assert!(matches!(error, SummarizerError::InvalidResponse(_)));
    }
}
