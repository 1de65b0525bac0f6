//! Chat completions client acting as a patch collaborator.

use crate::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, ChatMessage,
    CollaboratorConfig, ResponseFormat, parse_json_object, truncate_snippet,
};
use async_trait::async_trait;
use shotsplit_error::{CollaboratorError, CollaboratorErrorKind, ShotsplitResult};
use shotsplit_interface::PatchCollaborator;
use tracing::{debug, error, instrument};

/// Provider name reported for this client.
pub const PROVIDER_NAME: &str = "siliconflow";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// One request per [`PatchCollaborator::submit`], bounded by the configured
/// timeout and never retried.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    config: CollaboratorConfig,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Create a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorErrorKind::ClientSetup`] if the HTTP client cannot
    /// be constructed.
    #[instrument(skip(config), fields(base_url = %config.base_url(), model = %config.model()))]
    pub fn new(config: CollaboratorConfig) -> ShotsplitResult<Self> {
        debug!("Creating chat completions client");
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| CollaboratorError::new(CollaboratorErrorKind::ClientSetup(e.to_string())))?;
        Ok(Self { config, client })
    }

    /// The client configuration.
    pub fn config(&self) -> &CollaboratorConfig {
        &self.config
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }

    /// Build the request body for one submission.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorErrorKind::RequestSetup`] if the request cannot be
    /// assembled.
    pub fn build_request(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> ShotsplitResult<ChatCompletionRequest> {
        let request = ChatCompletionRequestBuilder::default()
            .model(self.config.model().as_str())
            .messages(vec![
                ChatMessage::system(system_instruction),
                ChatMessage::user(user_instruction),
            ])
            .temperature(*self.config.temperature())
            .top_p(*self.config.top_p())
            .response_format((*self.config.json_mode()).then(ResponseFormat::json_object))
            .build()
            .map_err(|e| CollaboratorError::new(CollaboratorErrorKind::RequestSetup(e.to_string())))?;
        Ok(request)
    }
}

#[async_trait]
impl PatchCollaborator for ChatCompletionsClient {
    #[instrument(skip_all, fields(model = %self.config.model()))]
    async fn submit(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> ShotsplitResult<serde_json::Value> {
        let url = self.endpoint();
        let request = self.build_request(system_instruction, user_instruction)?;
        debug!(url = %url, prompt_chars = user_instruction.chars().count(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Request failed: {}", e);
                CollaboratorError::new(CollaboratorErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            CollaboratorError::new(CollaboratorErrorKind::Body(e.to_string()))
        })?;

        if !status.is_success() {
            error!(status = %status, "Collaborator returned error status");
            return Err(CollaboratorError::new(CollaboratorErrorKind::Status {
                status: status.as_u16(),
                body: truncate_snippet(&body),
            })
            .into());
        }

        let envelope: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response envelope: {}", e);
            CollaboratorError::new(CollaboratorErrorKind::Envelope(format!(
                "{} in {}",
                e,
                truncate_snippet(&body)
            )))
        })?;

        let content = envelope.first_content().ok_or_else(|| {
            error!("Response has no choices[0].message.content");
            CollaboratorError::new(CollaboratorErrorKind::Envelope(format!(
                "no choices[0].message.content in {}",
                truncate_snippet(&body)
            )))
        })?;

        let value = parse_json_object(content)?;
        debug!("Chat completion returned a JSON object");
        Ok(value)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
