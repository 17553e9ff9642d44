//! Upload boundary: filename validation, sanitising and persistence.

use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Extensions accepted by any upload route.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Kind of document an upload route accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with a text layer.
    Pdf,
    /// Raster image read through OCR.
    Image,
}

impl DocumentKind {
    /// Whether `filename` is an allowed upload for this route.
    pub fn accepts(self, filename: &str) -> bool {
        if !allowed_file(filename) {
            return false;
        }
        let extension = extension_of(filename).unwrap_or_default();
        match self {
            Self::Pdf => extension == "pdf",
            Self::Image => IMAGE_EXTENSIONS.contains(&extension.as_str()),
        }
    }
}

/// Reasons an upload is refused before any processing happens.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request carried no file or an empty filename.
    #[error("No file selected")]
    NoFileSelected,
    /// The file extension does not match the route.
    #[error("{}", rejection_message(.0))]
    InvalidFile(DocumentKind),
    /// The upload could not be written to disk.
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the error is the caller's fault rather than the server's.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

fn rejection_message(kind: &DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Pdf => "Invalid file. Please upload a PDF.",
        DocumentKind::Image => "Invalid file. Please upload an Image (png/jpg/jpeg).",
    }
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// Check that `filename` has an extension from [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn allowed_file(filename: &str) -> bool {
    extension_of(filename)
        .is_some_and(|extension| ALLOWED_EXTENSIONS.contains(&extension.as_str()))
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// The name is NFKD-normalized first so accented letters keep their base character
/// (`résumé.pdf` becomes `resume.pdf`); other non-ASCII characters are dropped. Path
/// separators become spaces, whitespace runs become `_`, and only `[A-Za-z0-9_.-]`
/// survive. Leading and trailing `.`/`_` are stripped, so `../../etc/passwd` becomes
/// `etc_passwd`. The result may be empty.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    flattened
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Validate an uploaded filename for `kind` and return its sanitised form.
pub fn validate_upload(kind: DocumentKind, filename: Option<&str>) -> Result<String, UploadError> {
    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or(UploadError::NoFileSelected)?;

    if !kind.accepts(filename) {
        return Err(UploadError::InvalidFile(kind));
    }

    let sanitized = secure_filename(filename);
    if !kind.accepts(&sanitized) {
        return Err(UploadError::InvalidFile(kind));
    }
    Ok(sanitized)
}

/// Write the uploaded bytes to `dir/filename`, replacing any previous file of that name.
pub async fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Stored upload");
    Ok(path)
}
