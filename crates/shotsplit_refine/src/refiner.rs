//! Refinement orchestrator.

use crate::{
    RefineFailure, RefineOutcome, SYSTEM_PROMPT, apply_patch, build_user_prompt, parse_patch,
    validate_count_range, validate_text_conservation,
};
use shotsplit_core::{Constraints, Patch, RefineRequest, Shot};
use shotsplit_error::{CollaboratorError, CollaboratorErrorKind, ShotsplitResult};
use shotsplit_interface::PatchCollaborator;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Asks a collaborator for a boundary patch and applies it if it validates.
///
/// Issues exactly one collaborator call per chapter with no retry. Any
/// failure (transport, patch shape, op application, or invariant) yields
/// [`RefineOutcome::Fallback`] carrying the untouched baseline.
#[derive(Debug, Clone)]
pub struct ShotRefiner<C: PatchCollaborator> {
    collaborator: C,
    timeout: Option<Duration>,
}

impl<C: PatchCollaborator> ShotRefiner<C> {
    /// Create a refiner with no operation-level timeout.
    pub fn new(collaborator: C) -> Self {
        Self {
            collaborator,
            timeout: None,
        }
    }

    /// Bound the collaborator call; exceeding it counts as a transport failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The wrapped collaborator.
    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// Refine `base_shots` for one chapter.
    #[instrument(
        skip(self, base_shots, constraints),
        fields(chapter_id = %chapter_id, baseline = base_shots.len(), provider = self.collaborator.provider_name())
    )]
    pub async fn refine(
        &self,
        chapter_id: &str,
        base_shots: &[Shot],
        constraints: &Constraints,
    ) -> RefineOutcome {
        match self.try_refine(chapter_id, base_shots, constraints).await {
            Ok((shots, patch)) => {
                info!(
                    ops = patch.ops.len(),
                    refined = shots.len(),
                    "Refinement accepted"
                );
                RefineOutcome::Refined { shots, patch }
            }
            Err(err) => {
                warn!(category = %err.category(), error = %err, "Refinement failed, using baseline");
                RefineOutcome::Fallback {
                    shots: base_shots.to_vec(),
                    failure: RefineFailure::from(&err),
                }
            }
        }
    }

    async fn try_refine(
        &self,
        chapter_id: &str,
        base_shots: &[Shot],
        constraints: &Constraints,
    ) -> ShotsplitResult<(Vec<Shot>, Patch)> {
        let bounds = constraints.effective_bounds(base_shots.len());
        let request = RefineRequest::new(chapter_id, base_shots, constraints);
        let user_prompt = build_user_prompt(&request)?;

        let response = self.submit(&user_prompt).await?;
        let patch = parse_patch(&response)?;
        if patch.chapter_id != chapter_id {
            debug!(patch_chapter_id = %patch.chapter_id, "Patch echoes a different chapter_id");
        }

        let refined = apply_patch(base_shots, &patch.ops, constraints)?;
        validate_text_conservation(base_shots, &refined)?;
        validate_count_range(&refined, bounds)?;

        Ok((refined, patch))
    }

    async fn submit(&self, user_prompt: &str) -> ShotsplitResult<serde_json::Value> {
        let call = self.collaborator.submit(SYSTEM_PROMPT, user_prompt);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| CollaboratorError::new(CollaboratorErrorKind::Timeout(limit)))?,
            None => call.await,
        }
    }
}
