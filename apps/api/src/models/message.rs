use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Message {
    /// Builds a message stamped with the current time. The id is the epoch-ms
    /// timestamp plus `id_offset`, so a reply created in the same millisecond
    /// as its question still gets a distinct id.
    pub fn now(role: Role, text: impl Into<String>, id_offset: i64) -> Self {
        let now = now_millis();
        Self {
            id: (now + id_offset).to_string(),
            role,
            text: text.into(),
            timestamp: now,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::now(Role::User, text, 0)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::now(Role::Assistant, text, 1)
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message {
            id: "1".into(),
            role: Role::Assistant,
            text: "hi".into(),
            timestamp: 1,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_assistant_id_offset_from_timestamp() {
        let msg = Message::assistant("reply");
        assert_eq!(msg.id, (msg.timestamp + 1).to_string());
    }
}
