use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::Mutex;

/// Fixed key holding the serialized archive.
pub const HISTORY_KEY: &str = "folio:chat_history";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single durable string slot. The archive store owns the format.
#[async_trait]
pub trait ArchiveSlot: Send + Sync {
    async fn load(&self) -> Result<Option<String>, ArchiveError>;
    async fn save(&self, payload: &str) -> Result<(), ArchiveError>;
}

/// Redis-backed slot under a fixed key.
pub struct RedisSlot {
    client: redis::Client,
    key: String,
}

impl RedisSlot {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            key: HISTORY_KEY.to_string(),
        }
    }
}

#[async_trait]
impl ArchiveSlot for RedisSlot {
    async fn load(&self) -> Result<Option<String>, ArchiveError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        Ok(con.get(&self.key).await?)
    }

    async fn save(&self, payload: &str) -> Result<(), ArchiveError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set::<_, _, ()>(&self.key, payload).await?;
        Ok(())
    }
}

/// Process-local slot. Used when Redis is not wanted and in tests.
#[derive(Default)]
pub struct MemorySlot {
    payload: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    pub async fn payload(&self) -> Option<String> {
        self.payload.lock().await.clone()
    }
}

#[async_trait]
impl ArchiveSlot for MemorySlot {
    async fn load(&self) -> Result<Option<String>, ArchiveError> {
        Ok(self.payload.lock().await.clone())
    }

    async fn save(&self, payload: &str) -> Result<(), ArchiveError> {
        *self.payload.lock().await = Some(payload.to_string());
        Ok(())
    }
}
