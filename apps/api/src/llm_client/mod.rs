/// LLM Client: the single point of entry for generative-language API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini REST API directly.
/// Callers depend on the `GenerativeModel` trait; `LlmClient` is the HTTP
/// implementation. Retry and fallback policy live in `answer`, not here.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Higher-capability model used for complex questions (with a thinking budget).
pub const COMPLEX_MODEL: &str = "gemini-3-pro-preview";
/// Low-latency model used for simple questions.
pub const FAST_MODEL: &str = "gemini-flash-lite-latest";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LlmError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            LlmError::Parse(_) => None,
        }
    }

    /// Message text supplied by the API itself. Transport and parse errors have none,
    /// so URLs and byte positions never feed classification.
    fn api_message(&self) -> &str {
        match self {
            LlmError::Api { message, .. } => message,
            LlmError::Http(_) | LlmError::Parse(_) => "",
        }
    }

    /// Rate-limit or exhausted quota. Retrying will not help.
    pub fn is_quota(&self) -> bool {
        let message = self.api_message();
        self.status() == Some(429)
            || message.contains("429")
            || message.contains("quota")
            || message.contains("RESOURCE_EXHAUSTED")
    }

    /// Bad key, forbidden, or a request the endpoint rejects outright.
    pub fn is_unauthorized(&self) -> bool {
        let message = self.api_message();
        matches!(self.status(), Some(400) | Some(403))
            || message.contains("API key")
            || message.contains("403")
            || message.contains("400")
    }
}

/// Generation parameters sent alongside the user content.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub system_instruction: String,
    pub temperature: Option<f32>,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: &'static str,
    pub contents: String,
    pub config: GenerationConfig,
}

/// Seam over the remote endpoint so the answer service can run against mocks.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the generated text, or `None` when the response carried no text.
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: ContentBody<'a>,
    contents: Vec<ContentBody<'a>>,
    generation_config: GenerationConfigBody,
}

#[derive(Debug, Serialize)]
struct ContentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartBody<'a>>,
}

#[derive(Debug, Serialize)]
struct PartBody<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfigBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfigBody {
    thinking_budget: u32,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            system_instruction: ContentBody {
                role: None,
                parts: vec![PartBody {
                    text: &request.config.system_instruction,
                }],
            },
            contents: vec![ContentBody {
                role: Some("user"),
                parts: vec![PartBody {
                    text: &request.contents,
                }],
            }],
            generation_config: GenerationConfigBody {
                temperature: request.config.temperature,
                thinking_config: request
                    .config
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfigBody { thinking_budget }),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
    /// Thought summaries are returned as parts flagged `thought: true`.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the answer parts of the first candidate, skipping thoughts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    status: Option<String>,
}

/// HTTP client for the `generateContent` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        let body = GenerateContentRequest::from_request(request);

        // Key goes in a header so it never shows up in error URLs or logs.
        let response = self
            .client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| match e.error.status {
                    Some(code) => format!("{code}: {}", e.error.message),
                    None => e.error.message,
                })
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                request.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed.text())
    }
}
