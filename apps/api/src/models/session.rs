use serde::{Deserialize, Serialize};

use crate::models::message::Message;

/// An archived conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
    /// At most 33 characters: 30 from the first user message plus "...".
    pub title: String,
    /// Epoch milliseconds at archive time.
    pub date: i64,
    pub messages: Vec<Message>,
}
