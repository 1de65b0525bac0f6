//! Trait definitions for refinement collaborators.

use async_trait::async_trait;
use shotsplit_error::ShotsplitResult;
use std::sync::Arc;

/// An external text-generation service that proposes boundary patches.
///
/// Implementations fail uniformly on network errors, non-success status,
/// unparsable envelopes, and content that is not a JSON object. Callers treat
/// every failure the same way (fall back to the baseline) but keep the
/// message for diagnostics.
#[async_trait]
pub trait PatchCollaborator: Send + Sync {
    /// Submit a system and a user instruction and return the parsed JSON object.
    async fn submit(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> ShotsplitResult<serde_json::Value>;

    /// Provider name (e.g., "siliconflow").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "deepseek-ai/DeepSeek-V3.2").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T> PatchCollaborator for Arc<T>
where
    T: PatchCollaborator + ?Sized,
{
    async fn submit(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> ShotsplitResult<serde_json::Value> {
        (**self).submit(system_instruction, user_instruction).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
