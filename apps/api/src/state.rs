use std::sync::Arc;

use crate::auth::AccessGate;
use crate::conversation::{ConversationController, SpeechOutput};
use crate::profile::ProfileService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<ConversationController>,
    pub profiles: Arc<ProfileService>,
    /// Same output the controller speaks through; handlers read the pending utterance from it.
    pub speech: Arc<dyn SpeechOutput>,
    pub gate: AccessGate,
    /// Whether a generative model is configured. Reported by /health.
    pub online: bool,
}
