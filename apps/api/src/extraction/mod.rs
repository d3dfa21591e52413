//! Text extraction: turns an uploaded PDF, DOCX, or plain-text byte stream into one string.
//!
//! Format resolution prefers the declared MIME type and falls back to the file extension.
//! Extraction itself is synchronous; `extract_text_blocking` moves it off the async
//! executor via `tokio::task::spawn_blocking`.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod upload;

use std::fmt;
use std::string::FromUtf8Error;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

/// The three document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Maps a MIME type to a format. Parameters (`; charset=...`) and case are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            TEXT_MIME => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Resolves the format of an upload. A specific MIME type wins; a missing or
    /// `application/octet-stream` MIME type defers to the file extension.
    pub fn resolve(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let declared = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && !ct.starts_with("application/octet-stream"));

        let format = match declared {
            Some(ct) => Self::from_content_type(ct),
            None => file_name.and_then(Self::from_file_name),
        };

        format.ok_or_else(|| ExtractionError::UnsupportedFormat {
            content_type: content_type.map(str::to_owned),
            file_name: file_name.map(str::to_owned),
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("PDF"),
            DocumentFormat::Docx => f.write_str("DOCX"),
            DocumentFormat::PlainText => f.write_str("plain text"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format (content type: {content_type:?}, file name: {file_name:?})")]
    UnsupportedFormat {
        content_type: Option<String>,
        file_name: Option<String>,
    },

    #[error("{0} upload is empty")]
    Empty(DocumentFormat),

    #[error("PDF could not be read: {0}")]
    Pdf(String),

    #[error("DOCX could not be read: {0}")]
    Docx(String),

    #[error("text file is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("extraction task failed: {0}")]
    Task(String),
}

impl ExtractionError {
    /// Message suitable for showing to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::UnsupportedFormat { .. } => {
                "Unsupported file type. Please upload a PDF, DOCX, or TXT resume.".to_string()
            }
            ExtractionError::Empty(format) => format!("The uploaded {format} file is empty."),
            ExtractionError::Pdf(_) => {
                "The PDF could not be read. It may be corrupt, encrypted, or image-only.".to_string()
            }
            ExtractionError::Docx(_) => {
                "The DOCX file could not be read. Please re-save it from your editor and try again."
                    .to_string()
            }
            ExtractionError::Encoding(_) => {
                "The text file is not valid UTF-8. Please re-save it with UTF-8 encoding."
                    .to_string()
            }
            ExtractionError::Task(_) => {
                "The document could not be processed. Please try again.".to_string()
            }
        }
    }
}

/// Extracts the full text of `bytes` interpreted as `format`.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty(format));
    }

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentFormat::Docx => docx::extract_docx_text(bytes)?,
        DocumentFormat::PlainText => String::from_utf8(bytes.to_vec())?,
    };

    debug!(
        "Extracted {} chars from {} bytes of {format}",
        text.chars().count(),
        bytes.len()
    );
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. Takes owned bytes for the `'static` bound.
pub async fn extract_text_blocking(
    bytes: bytes::Bytes,
    format: DocumentFormat,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}
