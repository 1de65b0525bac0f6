//! Segmenter construction from configuration and flags.

use super::SegmentOptions;
use shotsplit::{
    ChapterSegmenter, ChatCompletionsClient, CollaboratorOverrides, ShotRefiner, ShotsplitConfig,
    ShotsplitResult,
};
use std::path::Path;
use tracing::{info, warn};

/// Load the configuration file layers.
pub fn load_config(path: Option<&Path>) -> ShotsplitResult<ShotsplitConfig> {
    match path {
        Some(path) => ShotsplitConfig::from_file(path),
        None => ShotsplitConfig::load(),
    }
}

/// Build a segmenter. Refinement is skipped, not failed, when the
/// collaborator cannot be configured.
pub fn build_segmenter(
    config: &ShotsplitConfig,
    options: &SegmentOptions,
) -> ChapterSegmenter<ChatCompletionsClient> {
    let mut split = config.split;
    if let Some(v) = options.min_chars {
        split = split.with_min_chars(v);
    }
    if let Some(v) = options.soft_target {
        split = split.with_soft_target(v);
    }
    if let Some(v) = options.hard_cut {
        split = split.with_hard_cut(v);
    }

    let mut constraints = config.constraints;
    if let Some(v) = options.min_shots {
        constraints = constraints.with_min_shots(v);
    }
    if let Some(v) = options.max_shots {
        constraints = constraints.with_max_shots(v);
    }
    if options.allow_cross_scene_break {
        constraints = constraints.with_forbid_cross_scene_break(false);
    }

    if options.no_refine {
        info!("Refinement disabled");
        return ChapterSegmenter::baseline_only(
            split,
            constraints,
            Some("refinement disabled".to_string()),
        );
    }

    let overrides = CollaboratorOverrides {
        api_key: None,
        base_url: options.base_url.clone(),
        model: options.model.clone(),
        timeout_secs: options.timeout_secs,
    };

    let client = config
        .collaborator
        .resolve(&overrides)
        .map_err(shotsplit::ShotsplitError::from)
        .and_then(ChatCompletionsClient::new);

    match client {
        Ok(client) => {
            info!(model = %client.config().model(), "Refinement enabled");
            ChapterSegmenter::with_refiner(split, constraints, ShotRefiner::new(client))
        }
        Err(e) => {
            warn!(error = %e, "Collaborator unavailable, using baseline only");
            ChapterSegmenter::baseline_only(split, constraints, Some(e.to_string()))
        }
    }
}
