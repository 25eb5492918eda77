//! Remote Answer Service: answers visitor questions through the generative model,
//! degrading to the local fallback responder on every failure path.
//!
//! Flow: no model → fallback; strict greeting → fixed reply; otherwise pick a
//! model by complexity, call it, and classify failures:
//! quota / authorization → fallback at once; anything else → one retry after 1s,
//! then fallback. Callers always get text back.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::{
    GenerationConfig, GenerationRequest, GenerativeModel, COMPLEX_MODEL, FAST_MODEL,
};
use crate::responder;

pub mod classify;
pub mod prompts;

use classify::{is_complex, is_strict_greeting};
use prompts::{build_system_instruction, remote_greeting, EMPTY_RESPONSE};

/// Total attempts for transient failures (first call plus one retry).
const MAX_ATTEMPTS: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const COMPLEX_THINKING_BUDGET: u32 = 32_768;
const FAST_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No model configured.
    Offline,
    Quota,
    Unauthorized,
    RetriesExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum AnswerSource {
    Remote,
    Greeting,
    Fallback(FallbackReason),
}

/// Answer text tagged with where it came from. The text is what the visitor sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

#[derive(Clone)]
pub struct AnswerService {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl AnswerService {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>) -> Self {
        Self { model }
    }

    pub fn is_online(&self) -> bool {
        self.model.is_some()
    }

    /// Answers `question` using `resume_context`. Never fails.
    pub async fn generate_answer(&self, question: &str, resume_context: &str) -> Answer {
        let Some(model) = &self.model else {
            return fallback(question, resume_context, FallbackReason::Offline);
        };

        if is_strict_greeting(question) {
            return Answer {
                text: remote_greeting(),
                source: AnswerSource::Greeting,
            };
        }

        let request = plan_request(question, resume_context);

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                warn!(
                    "Answer attempt {} failed, retrying after {}ms...",
                    attempt,
                    RETRY_DELAY.as_millis()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }

            match model.generate(&request).await {
                Ok(text) => {
                    let text = text
                        .filter(|t| !t.is_empty())
                        .unwrap_or_else(|| EMPTY_RESPONSE.to_string());
                    return Answer {
                        text,
                        source: AnswerSource::Remote,
                    };
                }
                Err(e) if e.is_quota() => {
                    info!("Model quota exhausted, answering locally: {e}");
                    return fallback(question, resume_context, FallbackReason::Quota);
                }
                Err(e) if e.is_unauthorized() => {
                    warn!("Model rejected credentials or request, answering locally: {e}");
                    return fallback(question, resume_context, FallbackReason::Unauthorized);
                }
                Err(e) => {
                    warn!("Model call failed (attempt {}): {e}", attempt + 1);
                }
            }
        }

        fallback(question, resume_context, FallbackReason::RetriesExhausted)
    }
}

/// Chooses model and generation parameters for a question.
fn plan_request(question: &str, resume_context: &str) -> GenerationRequest {
    let complex = is_complex(question);
    GenerationRequest {
        model: if complex { COMPLEX_MODEL } else { FAST_MODEL },
        contents: question.to_string(),
        config: GenerationConfig {
            system_instruction: build_system_instruction(resume_context),
            temperature: (!complex).then_some(FAST_TEMPERATURE),
            thinking_budget: complex.then_some(COMPLEX_THINKING_BUDGET),
        },
    }
}

fn fallback(question: &str, resume_context: &str, reason: FallbackReason) -> Answer {
    Answer {
        text: responder::respond(question, resume_context),
        source: AnswerSource::Fallback(reason),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Model double that replays scripted results and records every request.
    #[derive(Default)]
    pub(crate) struct ScriptedModel {
        script: Mutex<VecDeque<Result<Option<String>, LlmError>>>,
        pub calls: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedModel {
        pub(crate) fn new(script: Vec<Result<Option<String>, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
            self.calls.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Some("scripted answer".to_string())))
        }
    }

    fn api_error(status: u16, message: &str) -> LlmError {
        LlmError::Api {
            status,
            message: message.to_string(),
        }
    }

    fn service(model: &Arc<ScriptedModel>) -> AnswerService {
        AnswerService::new(Some(model.clone() as Arc<dyn GenerativeModel>))
    }

    const RESUME: &str = "Email: test@example.com\n\
        Built a traffic simulation in NS2 using access points\n\
        Developed a restaurant recommendation web application";

    #[tokio::test]
    async fn test_offline_uses_fallback() {
        let answer = AnswerService::new(None)
            .generate_answer("traffic simulation", RESUME)
            .await;
        assert_eq!(answer.source, AnswerSource::Fallback(FallbackReason::Offline));
        assert_eq!(answer.text, responder::respond("traffic simulation", RESUME));
    }

    #[tokio::test]
    async fn test_greeting_skips_model_regardless_of_context() {
        let model = ScriptedModel::new(vec![]);
        for context in [RESUME, "", "anything else entirely"] {
            let answer = service(&model).generate_answer("Good morning!", context).await;
            assert_eq!(answer.text, remote_greeting());
            assert_eq!(answer.source, AnswerSource::Greeting);
        }
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_returns_model_text() {
        let model = ScriptedModel::new(vec![Ok(Some("### Projects\n\nNS2 work".into()))]);
        let answer = service(&model).generate_answer("tell me about projects", RESUME).await;
        assert_eq!(answer.text, "### Projects\n\nNS2 work");
        assert_eq!(answer.source, AnswerSource::Remote);
    }

    #[tokio::test]
    async fn test_empty_model_text_gets_fixed_reply() {
        let model = ScriptedModel::new(vec![Ok(None)]);
        let answer = service(&model).generate_answer("list languages", RESUME).await;
        assert_eq!(answer.text, EMPTY_RESPONSE);

        let model = ScriptedModel::new(vec![Ok(Some(String::new()))]);
        let answer = service(&model).generate_answer("list languages", RESUME).await;
        assert_eq!(answer.text, EMPTY_RESPONSE);
    }

    #[tokio::test]
    async fn test_quota_error_matches_direct_fallback() {
        let question = "traffic simulation access points";
        let model = ScriptedModel::new(vec![Err(api_error(429, "RESOURCE_EXHAUSTED: quota"))]);
        let answer = service(&model).generate_answer(question, RESUME).await;

        assert_eq!(answer.text, responder::respond(question, RESUME));
        assert_eq!(answer.source, AnswerSource::Fallback(FallbackReason::Quota));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_auth_error_falls_back_without_retry() {
        let model = ScriptedModel::new(vec![Err(api_error(400, "API key not valid"))]);
        let answer = service(&model).generate_answer("what is your email", RESUME).await;

        assert!(answer.text.contains("test@example.com"));
        assert_eq!(answer.source, AnswerSource::Fallback(FallbackReason::Unauthorized));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_error_retries_once_then_succeeds() {
        let model = ScriptedModel::new(vec![
            Err(api_error(503, "UNAVAILABLE: overloaded")),
            Ok(Some("second time lucky".into())),
        ]);
        let started = tokio::time::Instant::now();
        let answer = service(&model).generate_answer("list languages", RESUME).await;

        assert_eq!(answer.text, "second time lucky");
        assert_eq!(model.call_count(), 2);
        assert!(started.elapsed() >= RETRY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_exhaust_to_fallback() {
        let model = ScriptedModel::new(vec![
            Err(api_error(500, "INTERNAL")),
            Err(api_error(502, "bad gateway")),
            Ok(Some("never reached".into())),
        ]);
        let question = "restaurant recommendation";
        let answer = service(&model).generate_answer(question, RESUME).await;

        assert_eq!(model.call_count(), 2);
        assert_eq!(answer.text, responder::respond(question, RESUME));
        assert_eq!(
            answer.source,
            AnswerSource::Fallback(FallbackReason::RetriesExhausted)
        );
    }

    #[tokio::test]
    async fn test_complex_question_uses_reasoning_model() {
        let model = ScriptedModel::new(vec![]);
        service(&model)
            .generate_answer("Explain the NS2 project", RESUME)
            .await;

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls[0].model, COMPLEX_MODEL);
        assert_eq!(calls[0].config.thinking_budget, Some(COMPLEX_THINKING_BUDGET));
        assert_eq!(calls[0].config.temperature, None);
        assert_eq!(calls[0].contents, "Explain the NS2 project");
        assert!(calls[0].config.system_instruction.contains(RESUME));
    }

    #[tokio::test]
    async fn test_simple_question_uses_fast_model() {
        let model = ScriptedModel::new(vec![]);
        service(&model).generate_answer("list languages", RESUME).await;

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls[0].model, FAST_MODEL);
        assert_eq!(calls[0].config.temperature, Some(FAST_TEMPERATURE));
        assert_eq!(calls[0].config.thinking_budget, None);
    }
}
