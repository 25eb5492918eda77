pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::conversation::handlers;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat
        .route(
            "/api/v1/chat",
            get(handlers::handle_get_transcript).post(handlers::handle_send_message),
        )
        .route("/api/v1/chat/reset", post(handlers::handle_reset))
        .route("/api/v1/chat/intro", post(handlers::handle_play_intro))
        .route(
            "/api/v1/speech",
            get(handlers::handle_get_speech).delete(handlers::handle_stop_speech),
        )
        // Archive (owner only)
        .route("/api/v1/history", get(handlers::handle_list_history))
        .route(
            "/api/v1/history/:id/restore",
            post(handlers::handle_restore_session),
        )
        .route("/api/v1/history/:id", delete(handlers::handle_delete_session))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_update_profile)
                .layer(DefaultBodyLimit::max(profile::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
