use super::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

const OCR_LANGUAGE: &str = "eng";

/// Runs the Tesseract CLI over an image and joins the recognised lines with spaces.
#[derive(Debug, Clone)]
pub struct TesseractOcrExtractor {
    binary: String,
}

impl TesseractOcrExtractor {
    /// Use the Tesseract executable at `binary` (a bare name is resolved through `PATH`).
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

/// Collapse OCR output into one line, keeping fragments in reading order.
fn join_fragments(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl TextExtractor for TesseractOcrExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .args(["-l", OCR_LANGUAGE])
            .output()
            .await
            .map_err(|error| {
                ExtractionError::Ocr(format!("{} failed to start: {error}", self.binary))
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = join_fragments(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(
            path = %path.display(),
            chars = text.chars().count(),
            "Extracted image text"
        );
        Ok(text)
    }
}
