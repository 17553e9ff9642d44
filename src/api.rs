//! HTTP surface for the document summarizer.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /pdf` – Upload a PDF (`file` multipart field) and optionally a `summary_length`
//!   (`short` | `medium` | `long`). Returns the extracted text and, when a length was given, the
//!   highlighted summary and its keywords.
//! - `POST /image` – Same as `/pdf` for PNG/JPEG images read through OCR.
//! - `GET /metrics` – Observe processing counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! Rejected uploads answer `400` with `{ "error": message }`; extraction or model failures
//! answer `500`.

use crate::metrics::MetricsSnapshot;
use crate::processing::{ProcessedUpload, ProcessingApi, ProcessingError, Upload};
use crate::upload::DocumentKind;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the upload API surface.
pub fn create_router<S>(service: Arc<S>, max_upload_bytes: usize) -> Router
where
    S: ProcessingApi + 'static,
{
    Router::new()
        .route("/pdf", post(upload_pdf::<S>))
        .route("/image", post(upload_image::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(service)
}

/// Summarize an uploaded PDF.
async fn upload_pdf<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<ProcessedUpload>, AppError>
where
    S: ProcessingApi,
{
    handle_upload(service.as_ref(), DocumentKind::Pdf, multipart).await
}

/// Summarize an uploaded image.
async fn upload_image<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<ProcessedUpload>, AppError>
where
    S: ProcessingApi,
{
    handle_upload(service.as_ref(), DocumentKind::Image, multipart).await
}

async fn handle_upload<S>(
    service: &S,
    kind: DocumentKind,
    multipart: Multipart,
) -> Result<Json<ProcessedUpload>, AppError>
where
    S: ProcessingApi,
{
    let upload = read_upload(multipart).await?;
    let processed = service.process_upload(kind, upload).await?;
    tracing::info!(
        file = %processed.filename,
        kind = ?kind,
        summary_length = processed.summary_length.as_deref().unwrap_or(""),
        summarized = processed.analysis.summary.is_some(),
        "Upload request completed"
    );
    Ok(Json(processed))
}

/// Collect the `file` and `summary_length` fields; unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.filename = field.file_name().map(str::to_string);
                upload.bytes = field.bytes().await?.to_vec();
            }
            Some("summary_length") => {
                upload.summary_length = Some(field.text().await?);
            }
            _ => {}
        }
    }
    Ok(upload)
}

/// Return the processing counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: ProcessingApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize_pdf",
                method: "POST",
                path: "/pdf",
                description: "Upload a PDF as multipart field `file`; with `summary_length` (short|medium|long) the response includes a highlighted summary and keywords.",
                request_example: Some(json!({
                    "file": "report.pdf",
                    "summary_length": "short"
                })),
            },
            CommandDescriptor {
                name: "summarize_image",
                method: "POST",
                path: "/image",
                description: "Upload a PNG or JPEG as multipart field `file`; text is read with OCR and summarized like `/pdf`.",
                request_example: Some(json!({
                    "file": "scan.png",
                    "summary_length": "medium"
                })),
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return document, chunk, and failed-summary counters.",
                request_example: None,
            },
        ],
    })
}

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ProcessingError> for AppError {
    fn from(inner: ProcessingError) -> Self {
        match &inner {
            ProcessingError::Upload(upload) if upload.is_user_error() => {
                tracing::warn!(reason = %upload, "Upload rejected");
                Self::BadRequest(inner.to_string())
            }
            _ => {
                tracing::error!(error = %inner, "Upload processing failed");
                Self::Internal(inner.to_string())
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(inner: MultipartError) -> Self {
        Self::BadRequest(format!("Failed to read upload: {}", inner.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::metrics::MetricsSnapshot;
    use crate::processing::{
        DocumentAnalysis, ProcessedUpload, ProcessingApi, ProcessingError, SummarizationError,
        Upload,
    };
    use crate::summarization::SummarizerError;
    use crate::upload::{DocumentKind, validate_upload};
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-TEST-BOUNDARY";

    #[tokio::test]
    async fn commands_catalog_exposes_upload_endpoints() {
        let response = get_commands().await;
        let commands = response.0.commands;
        let pdf = commands
            .iter()
            .find(|cmd| cmd.path == "/pdf")
            .expect("pdf command present");

        assert_eq!(pdf.method, "POST");
        assert!(pdf.description.contains("summary_length"));
        assert!(commands.iter().any(|cmd| cmd.path == "/image"));
    }

    #[tokio::test]
    async fn pdf_route_forwards_multipart_fields() {
        let service = Arc::new(StubProcessingService::default());
        let app = create_router(service.clone(), 1024 * 1024);

        let response = app
            .oneshot(multipart_request(
                "/pdf",
                Some(("My Report.pdf", b"%PDF-1.7")),
                Some("short"),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["filename"], "My_Report.pdf");
        assert_eq!(json["summary_length"], "short");
        assert_eq!(json["extracted_text"], "extracted");
        assert_eq!(json["keywords"][0], "report");

        let calls = service.calls.lock().await;
        assert_eq!(calls.len(), 1);
        let (kind, upload) = &calls[0];
        assert_eq!(*kind, DocumentKind::Pdf);
        assert_eq!(upload.filename.as_deref(), Some("My Report.pdf"));
        assert_eq!(upload.bytes, b"%PDF-1.7");
        assert_eq!(upload.summary_length.as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn invalid_extension_is_a_bad_request() {
        let app = create_router(Arc::new(StubProcessingService::default()), 1024 * 1024);

        let response = app
            .oneshot(multipart_request(
                "/image",
                Some(("notes.pdf", b"%PDF")),
                None,
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"],
            "Invalid file. Please upload an Image (png/jpg/jpeg)."
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_bad_request() {
        let app = create_router(Arc::new(StubProcessingService::default()), 1024 * 1024);

        let response = app
            .oneshot(multipart_request("/pdf", None, Some("long")))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No file selected");
    }

    #[tokio::test]
    async fn provider_failure_is_a_server_error() {
        let service = Arc::new(StubProcessingService {
            fail_summaries: true,
            ..StubProcessingService::default()
        });
        let app = create_router(service, 1024 * 1024);

        let response = app
            .oneshot(multipart_request("/pdf", Some(("a.pdf", b"%PDF")), Some("short")))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let message = body_json(response).await["error"]
            .as_str()
            .expect("error string")
            .to_string();
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn metrics_route_returns_snapshot() {
        let app = create_router(Arc::new(StubProcessingService::default()), 1024);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["documents_processed"], 3);
        assert_eq!(json["chunks_summarized"], 7);
    }

    fn multipart_request(
        uri: &str,
        file: Option<(&str, &[u8])>,
        summary_length: Option<&str>,
    ) -> Request<Body> {
        let mut body = Vec::new();
        if let Some((filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(length) = summary_length {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"summary_length\"\r\n\r\n{length}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    #[derive(Default)]
    struct StubProcessingService {
        calls: Mutex<Vec<(DocumentKind, Upload)>>,
        fail_summaries: bool,
    }

    #[async_trait]
    impl ProcessingApi for StubProcessingService {
        async fn process_upload(
            &self,
            kind: DocumentKind,
            upload: Upload,
        ) -> Result<ProcessedUpload, ProcessingError> {
            self.calls.lock().await.push((kind, upload.clone()));
            let filename = validate_upload(kind, upload.filename.as_deref())?;
            if self.fail_summaries {
                return Err(SummarizationError::Client(SummarizerError::GenerationFailed(
                    "boom".into(),
                ))
                .into());
            }
            Ok(ProcessedUpload {
                filename,
                summary_length: upload.summary_length,
                analysis: DocumentAnalysis {
                    summary: Some("<span class='highlight'>report</span> body".into()),
                    keywords: Some(vec!["report".into()]),
                    extracted_text: "extracted".into(),
                    summary_error: None,
                },
            })
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                documents_processed: 3,
                chunks_summarized: 7,
                failed_summaries: 0,
            }
        }
    }
}
