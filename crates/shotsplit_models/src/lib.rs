//! Collaborator client and configuration for shotsplit.
//!
//! [`ChatCompletionsClient`] talks to any OpenAI-compatible chat completions
//! endpoint (SiliconFlow by default) and implements
//! [`PatchCollaborator`](shotsplit_interface::PatchCollaborator).
//! [`ShotsplitConfig`] and [`CollaboratorSettings`] load and resolve its
//! configuration once at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod extraction;
mod request;
mod response;

pub use client::{ChatCompletionsClient, PROVIDER_NAME};
pub use config::{
    CollaboratorConfig, CollaboratorOverrides, CollaboratorSettings, ENV_PREFIXES, ShotsplitConfig,
};
pub use extraction::{SNIPPET_LIMIT, parse_json_object, truncate_snippet, unwrap_code_fence};
pub use request::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionRequestBuilderError, ChatMessage,
    ResponseFormat,
};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage};
