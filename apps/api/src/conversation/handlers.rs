use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::conversation::controller::Exchange;
use crate::conversation::speech::Utterance;
use crate::errors::AppError;
use crate::models::message::Message;
use crate::models::session::ChatSession;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<Message>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    /// The archived session, or `None` when the transcript was already empty.
    pub archived: Option<ChatSession>,
}

#[derive(Serialize)]
pub struct SpeechResponse {
    pub utterance: Option<Utterance>,
}

/// GET /api/v1/chat
pub async fn handle_get_transcript(State(state): State<AppState>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        messages: state.conversation.transcript().await,
    })
}

/// POST /api/v1/chat
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<Exchange>, AppError> {
    let exchange = state.conversation.send(&req.text).await?;
    Ok(Json(exchange))
}

/// POST /api/v1/chat/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let archived = state.conversation.reset().await?;
    Ok(Json(ResetResponse { archived }))
}

/// POST /api/v1/chat/intro
///
/// Returns 202 with the utterance queued for playback.
pub async fn handle_play_intro(
    State(state): State<AppState>,
) -> (StatusCode, Json<SpeechResponse>) {
    state.conversation.play_intro().await;
    (
        StatusCode::ACCEPTED,
        Json(SpeechResponse {
            utterance: state.speech.current(),
        }),
    )
}

/// GET /api/v1/speech
pub async fn handle_get_speech(State(state): State<AppState>) -> Json<SpeechResponse> {
    Json(SpeechResponse {
        utterance: state.speech.current(),
    })
}

/// DELETE /api/v1/speech
pub async fn handle_stop_speech(State(state): State<AppState>) -> StatusCode {
    state.conversation.stop_speaking();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChatSession>>, AppError> {
    state.gate.check(&headers)?;
    Ok(Json(state.conversation.history().await))
}

/// POST /api/v1/history/:id/restore
pub async fn handle_restore_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    state.gate.check(&headers)?;
    let messages = state.conversation.load_session(&id).await?;
    Ok(Json(TranscriptResponse { messages }))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.gate.check(&headers)?;
    state.conversation.delete_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
