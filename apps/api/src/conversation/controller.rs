//! Conversation Controller: wires visitor input to the answer service and keeps
//! the live transcript and the session archive in step.
//!
//! Locks are held only for in-memory edits (and the archive write-through),
//! never across a model call, so overlapping sends both land in the transcript
//! in whatever order their answers arrive. A reply is appended even when the
//! caller stops waiting for it.

use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::answer::prompts::intro_prompt;
use crate::answer::{AnswerService, AnswerSource};
use crate::conversation::speech::SpeechOutput;
use crate::errors::AppError;
use crate::models::message::Message;
use crate::models::session::ChatSession;
use crate::profile::ProfileService;
use crate::sessions::ChatSessionStore;

/// Shown instead of an answer when the answer pipeline itself breaks.
pub const APOLOGY: &str = "Sorry, I encountered an error processing your request.";

/// One question and its reply, as appended to the transcript.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub user: Message,
    pub assistant: Message,
    /// `None` when the apology was used.
    pub source: Option<AnswerSource>,
}

pub struct ConversationController {
    answers: AnswerService,
    profiles: Arc<ProfileService>,
    speech: Arc<dyn SpeechOutput>,
    transcript: Arc<Mutex<Vec<Message>>>,
    archive: Mutex<ChatSessionStore>,
}

impl ConversationController {
    pub fn new(
        answers: AnswerService,
        profiles: Arc<ProfileService>,
        speech: Arc<dyn SpeechOutput>,
        archive: ChatSessionStore,
    ) -> Self {
        Self {
            answers,
            profiles,
            speech,
            transcript: Arc::new(Mutex::new(Vec::new())),
            archive: Mutex::new(archive),
        }
    }

    /// Appends the question, answers it, and appends the reply.
    pub async fn send(&self, text: &str) -> Result<Exchange, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Message text must not be empty".into()));
        }

        let user = Message::user(text);
        self.transcript.lock().await.push(user.clone());

        let resume = self.profiles.resume_context().await;
        let answers = self.answers.clone();
        let transcript = Arc::clone(&self.transcript);
        let question = text.to_string();

        // The reply task owns the append, so a dropped request still gets its answer recorded.
        let reply = tokio::spawn(async move {
            // Inner task: a panic in the pipeline becomes an apology.
            let answered =
                tokio::spawn(async move { answers.generate_answer(&question, &resume).await })
                    .await;

            let (reply_text, source) = match answered {
                Ok(answer) => {
                    info!(source = ?answer.source, "Answered visitor question");
                    (answer.text, Some(answer.source))
                }
                Err(e) => {
                    error!("Chat error: {e}");
                    (APOLOGY.to_string(), None)
                }
            };

            let assistant = Message::assistant(reply_text);
            transcript.lock().await.push(assistant.clone());
            (assistant, source)
        });

        let (assistant, source) = reply
            .await
            .map_err(|e| AppError::Internal(anyhow!("Reply task failed: {e}")))?;

        Ok(Exchange {
            user,
            assistant,
            source,
        })
    }

    /// Generates the spoken introduction. It goes to speech only, never the transcript.
    pub async fn play_intro(&self) {
        let resume = self.profiles.resume_context().await;
        let answer = self.answers.generate_answer(&intro_prompt(), &resume).await;
        info!(source = ?answer.source, "Intro generated");
        self.speech.speak(&answer.text);
    }

    pub fn stop_speaking(&self) {
        self.speech.cancel();
    }

    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.lock().await.clone()
    }

    /// Archives the live transcript and clears it. `None` when there was nothing to archive.
    pub async fn reset(&self) -> Result<Option<ChatSession>, AppError> {
        let mut transcript = self.transcript.lock().await;
        let mut archive = self.archive.lock().await;

        let session = archive.archive_current(&transcript).await?;
        if session.is_some() {
            transcript.clear();
        }
        Ok(session)
    }

    pub async fn history(&self) -> Vec<ChatSession> {
        self.archive.lock().await.sessions().to_vec()
    }

    /// Replaces the live transcript with an archived session's messages.
    pub async fn load_session(&self, id: &str) -> Result<Vec<Message>, AppError> {
        let mut transcript = self.transcript.lock().await;
        let archive = self.archive.lock().await;

        let messages = archive
            .restore(id)
            .ok_or_else(|| AppError::NotFound(format!("Chat session {id} not found")))?;
        *transcript = messages.clone();
        Ok(messages)
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        self.archive.lock().await.delete(id).await?;
        Ok(())
    }
}
