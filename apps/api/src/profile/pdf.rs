use bytes::Bytes;
use tracing::info;

use crate::profile::service::ProfileError;

/// Extracts plain text from an uploaded resume PDF.
/// Parsing is CPU-bound, so it runs inside `spawn_blocking`.
pub async fn extract_resume_text(pdf: Bytes) -> Result<String, ProfileError> {
    let size = pdf.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| ProfileError::Backend(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| {
            ProfileError::Validation(format!("Could not read text from the resume PDF: {e}"))
        })?;

    let text = text.trim().to_string();
    info!("Extracted {} chars of resume text from {} byte PDF", text.len(), size);
    Ok(text)
}
