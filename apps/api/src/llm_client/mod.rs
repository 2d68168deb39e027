/// LLM Client — the single point of entry for all Claude API calls in the tailoring service.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through `GenerativeBackend`.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::InlineMedia;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM output was cut off at max_tokens ({max_tokens})")]
    Truncated { max_tokens: u32 },

    #[error("Media of type '{0}' cannot be sent inline")]
    UnsupportedMedia(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Backend contract
// ────────────────────────────────────────────────────────────────────────────

/// One piece of the user turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Media(InlineMedia),
}

/// A required output shape. `schema` is a JSON Schema object.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
}

/// The generative backend capability: one instruction in, one structured payload out.
///
/// Carried in `AppState` as `Arc<dyn GenerativeBackend>` so tests can swap in a stub.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        instruction: &[PromptPart],
        schema: &OutputSchema,
    ) -> Result<Value, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    tools: Vec<ToolDefinition<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentBlockParam<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlockParam<'a> {
    Text { text: &'a str },
    Image { source: MediaSource<'a> },
    Document { source: MediaSource<'a> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MediaSource<'a> {
    Base64 { media_type: &'a str, data: &'a str },
    Text { media_type: &'a str, data: String },
}

#[derive(Debug, Serialize)]
struct ToolDefinition<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// Extracts the input of the first `tool_use` block for the named tool.
    pub fn tool_input(&self, tool: &str) -> Option<&Value> {
        self.content
            .iter()
            .find(|b| b.block_type == "tool_use" && b.name.as_deref() == Some(tool))
            .and_then(|b| b.input.as_ref())
    }

    /// The structured payload: the forced tool call, or JSON in a text block.
    fn structured_payload(&self, tool: &str) -> Result<Value, LlmError> {
        if let Some(input) = self.tool_input(tool) {
            return Ok(input.clone());
        }
        let text = self.text().ok_or(LlmError::EmptyContent)?;
        let text = strip_json_fences(text);
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Anthropic Messages API with structured (tool-forced) output.
/// Makes exactly one HTTP call per `generate`; retrying is the caller's decision.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration, max_tokens: u32) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            max_tokens,
        })
    }

    async fn send(&self, request_body: &AnthropicRequest<'_>) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl GenerativeBackend for LlmClient {
    async fn generate(
        &self,
        system: &str,
        instruction: &[PromptPart],
        schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        let content = instruction
            .iter()
            .map(content_block)
            .collect::<Result<Vec<_>, _>>()?;

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: self.max_tokens,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
            tools: vec![ToolDefinition {
                name: schema.name,
                description: schema.description,
                input_schema: &schema.schema,
            }],
            tool_choice: ToolChoice {
                choice_type: "tool",
                name: schema.name,
            },
        };

        let response = self.send(&request_body).await?;
        payload_from(&response, schema.name, self.max_tokens)
    }
}

/// Builds `LlmError::Api` from a non-success response, preferring the
/// message inside Anthropic's error envelope over the raw body.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

/// A response cut off at `max_tokens` is never trusted, even with a tool block.
fn payload_from(response: &LlmResponse, tool: &str, max_tokens: u32) -> Result<Value, LlmError> {
    if response.stop_reason.as_deref() == Some("max_tokens") {
        return Err(LlmError::Truncated { max_tokens });
    }
    response.structured_payload(tool)
}

/// Maps a prompt part onto the Messages API content block that can carry it.
fn content_block(part: &PromptPart) -> Result<ContentBlockParam<'_>, LlmError> {
    match part {
        PromptPart::Text(text) => Ok(ContentBlockParam::Text {
            text: text.as_str(),
        }),
        PromptPart::Media(media) => match media.media_type() {
            "application/pdf" => Ok(ContentBlockParam::Document {
                source: MediaSource::Base64 {
                    media_type: media.media_type(),
                    data: media.data(),
                },
            }),
            "text/plain" => {
                let data = String::from_utf8(media.decode())
                    .map_err(|_| LlmError::UnsupportedMedia(media.media_type().to_string()))?;
                Ok(ContentBlockParam::Document {
                    source: MediaSource::Text {
                        media_type: "text/plain",
                        data,
                    },
                })
            }
            "image/png" | "image/jpeg" | "image/gif" | "image/webp" => {
                Ok(ContentBlockParam::Image {
                    source: MediaSource::Base64 {
                        media_type: media.media_type(),
                        data: media.data(),
                    },
                })
            }
            other => Err(LlmError::UnsupportedMedia(other.to_string())),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
