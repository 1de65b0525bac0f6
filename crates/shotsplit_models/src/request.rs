//! OpenAI-compatible chat completions request body.

use serde::{Deserialize, Serialize};

/// Chat completions request.
///
/// # Examples
///
/// ```
/// use shotsplit_models::{ChatCompletionRequestBuilder, ChatMessage, ResponseFormat};
///
/// let request = ChatCompletionRequestBuilder::default()
///     .model("deepseek-ai/DeepSeek-V3.2")
///     .messages(vec![ChatMessage::user("你好")])
///     .response_format(ResponseFormat::json_object())
///     .build()
///     .unwrap();
/// assert!(request.temperature.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub top_p: Option<f32>,
    /// Output format hint
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub response_format: Option<ResponseFormat>,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a new message
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// `response_format` field; only `json_object` is ever sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResponseFormat {
    /// Format type
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// JSON mode.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}
