use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};

use crate::errors::AppError;
use crate::models::profile::ResumeProfile;
use crate::profile::service::{ProfileUpdate, Upload};
use crate::state::AppState;

/// Request body cap for profile edits; resume PDFs routinely exceed axum's 2 MB default.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ResumeProfile> {
    Json(state.profiles.refresh().await)
}

/// PUT /api/v1/profile
///
/// Multipart fields: `linkedin`, `github` (text), `image`, `resume` (files).
pub async fn handle_update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    state.gate.check(&headers)?;

    let mut update = ProfileUpdate::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "linkedin" | "github" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable field {name}: {e}")))?;
                if name == "linkedin" {
                    update.linkedin = Some(value);
                } else {
                    update.github = Some(value);
                }
            }
            "image" | "resume" => {
                let file_name = field.file_name().unwrap_or(&name).to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file {name}: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                let upload = Upload {
                    file_name,
                    content_type,
                    bytes,
                };
                if name == "image" {
                    update.image = Some(upload);
                } else {
                    update.resume = Some(upload);
                }
            }
            _ => {}
        }
    }

    let profile = state.profiles.update(update).await?;
    Ok(Json(profile))
}
