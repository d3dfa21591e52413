use std::panic;

use tracing::warn;

use crate::extraction::ExtractionError;

/// Extracts text from a PDF held fully in memory. Pages come back in page order.
///
/// `pdf-extract` panics on some malformed inputs instead of returning an error,
/// so the call is wrapped in `catch_unwind` and a panic is reported like any other
/// unreadable PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !looks_like_pdf(bytes) {
        return Err(ExtractionError::Pdf("missing %PDF- header".to_string()));
    }

    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            warn!("pdf-extract panicked: {reason}");
            Err(ExtractionError::Pdf(format!("parser panicked: {reason}")))
        }
    }
}

/// PDF files start with `%PDF-`, possibly after a few bytes of junk.
fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes
        .windows(5)
        .take(1024)
        .any(|window| window == b"%PDF-")
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
