//! Chat Session Store: the archive of past conversations.
//!
//! The in-memory list is the working copy; every mutation is written through to
//! the slot. A failed write rolls the mutation back so memory and slot agree.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::message::{now_millis, Message, Role};
use crate::models::session::ChatSession;
use crate::sessions::slot::{ArchiveError, ArchiveSlot};

const TITLE_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";
const DEFAULT_TITLE: &str = "Assistant Session";

pub struct ChatSessionStore {
    slot: Arc<dyn ArchiveSlot>,
    sessions: Vec<ChatSession>,
}

impl ChatSessionStore {
    /// Loads the archive from `slot`. Unreadable or corrupt data yields an empty archive.
    pub async fn load(slot: Arc<dyn ArchiveSlot>) -> Self {
        let sessions = match slot.load().await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<ChatSession>>(&payload) {
                Ok(sessions) => sessions,
                Err(e) => {
                    warn!("Failed to parse chat history, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read chat history, starting empty: {e}");
                Vec::new()
            }
        };
        info!("Loaded {} archived chat sessions", sessions.len());
        Self { slot, sessions }
    }

    /// Archived sessions, most recent first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Archives `messages` as a new session at the front of the archive.
    /// Returns `None` without touching anything when `messages` is empty.
    pub async fn archive_current(
        &mut self,
        messages: &[Message],
    ) -> Result<Option<ChatSession>, ArchiveError> {
        if messages.is_empty() {
            return Ok(None);
        }

        let session = ChatSession {
            id: Uuid::new_v4().to_string(),
            title: derive_title(messages),
            date: now_millis(),
            messages: messages.to_vec(),
        };

        self.sessions.insert(0, session.clone());
        if let Err(e) = self.persist().await {
            self.sessions.remove(0);
            return Err(e);
        }

        info!("Archived chat session {} ({} messages)", session.id, session.messages.len());
        Ok(Some(session))
    }

    /// Messages of session `id`, verbatim. The session stays archived.
    pub fn restore(&self, id: &str) -> Option<Vec<Message>> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.messages.clone())
    }

    /// Removes session `id`. Unknown ids are a no-op.
    pub async fn delete(&mut self, id: &str) -> Result<(), ArchiveError> {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            return Ok(());
        };

        let removed = self.sessions.remove(index);
        if let Err(e) = self.persist().await {
            self.sessions.insert(index, removed);
            return Err(e);
        }

        info!("Deleted chat session {id}");
        Ok(())
    }

    async fn persist(&self) -> Result<(), ArchiveError> {
        let payload = serde_json::to_string(&self.sessions)?;
        self.slot.save(&payload).await
    }
}

/// Title from the first user message: 30 characters, plus "..." when cut.
pub fn derive_title(messages: &[Message]) -> String {
    let Some(first) = messages.iter().find(|m| m.role == Role::User) else {
        return DEFAULT_TITLE.to_string();
    };

    let mut title: String = first.text.chars().take(TITLE_CHARS).collect();
    if first.text.chars().count() > TITLE_CHARS {
        title.push_str(TITLE_ELLIPSIS);
    }
    title
}
