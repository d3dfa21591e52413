use axum::extract::Multipart;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, DocumentFormat, ExtractionError};

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const ROLE_FIELD: &str = "role";

/// The raw resume file as it arrived in the multipart body.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn format(&self) -> Result<DocumentFormat, ExtractionError> {
        DocumentFormat::resolve(self.content_type.as_deref(), self.file_name.as_deref())
    }

    /// Resolves the format and extracts the text on the blocking pool.
    pub async fn extract(self) -> Result<ExtractedResume, ExtractionError> {
        let format = self.format()?;
        info!(
            "Extracting {format} resume ({} bytes, file: {:?})",
            self.bytes.len(),
            self.file_name
        );
        let text = extract_text_blocking(self.bytes, format).await?;
        Ok(ExtractedResume { format, text })
    }
}

/// Text extracted from one upload. Lives for a single request.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedResume {
    pub format: DocumentFormat,
    pub text: String,
}

impl ExtractedResume {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// The first `max_chars` characters, cut on a char boundary.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// Every field the upload endpoints understand. All are optional at this stage.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<ResumeUpload>,
    pub job_description: Option<String>,
    pub role: Option<String>,
}

impl UploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                RESUME_FIELD => {
                    let file_name = field.file_name().map(str::to_owned);
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    form.resume = Some(ResumeUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                JOB_DESCRIPTION_FIELD => form.job_description = Some(field.text().await?),
                ROLE_FIELD => form.role = Some(field.text().await?),
                other => debug!("Ignoring unknown multipart field '{other}'"),
            }
        }

        Ok(form)
    }

    /// The resume upload, or the "upload a resume first" warning.
    pub fn require_resume(&mut self) -> Result<ResumeUpload, AppError> {
        self.resume
            .take()
            .ok_or_else(|| AppError::Validation(MISSING_RESUME_MESSAGE.to_string()))
    }
}

pub const MISSING_RESUME_MESSAGE: &str = "Please upload a resume first.";
