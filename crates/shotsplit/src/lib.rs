//! Shotsplit: shot segmentation for Chinese novel chapters.
//!
//! A chapter is first cut deterministically into shots
//! ([`split_baseline`]). An optional collaborator (any
//! [`PatchCollaborator`]) may then propose boundary-only edits, which are
//! validated and applied by [`ShotRefiner`]; on any failure the baseline is
//! kept. Results are written as [`ShotScript`] documents.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shotsplit::{ChatCompletionsClient, ChapterSegmenter, CollaboratorOverrides, ShotRefiner, ShotsplitConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ShotsplitConfig::load()?;
//!     let client = ChatCompletionsClient::new(config.collaborator.resolve(&CollaboratorOverrides::default())?)?;
//!     let segmenter = ChapterSegmenter::with_refiner(config.split, config.constraints, ShotRefiner::new(client));
//!
//!     let script = segmenter.segment("ch_0001", "　　他推开门。屋里很暗。").await;
//!     println!("{}", script.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
mod shotscript;

pub use pipeline::{
    ChapterReport, ChapterSegmenter, ChapterSummary, chapter_files, chapter_id_for, read_chapter,
    run_batch, shotscript_path, write_shotscript,
};
pub use shotscript::{
    RefineMeta, SHOTSCRIPT_SCHEMA_VERSION, ShotEntry, ShotScript, ShotScriptMeta, ShotText, shot_id,
};

pub use shotsplit_core::{
    Constraints, Op, Patch, Shot, ShotBounds, ShotKind, SplitConfig, Tags, init_tracing,
    normalized_concat,
};
pub use shotsplit_error::{FailureCategory, ShotsplitError, ShotsplitErrorKind, ShotsplitResult};
pub use shotsplit_interface::PatchCollaborator;
pub use shotsplit_models::{
    ChatCompletionsClient, CollaboratorConfig, CollaboratorOverrides, CollaboratorSettings,
    ShotsplitConfig,
};
pub use shotsplit_refine::{RefineFailure, RefineOutcome, ShotRefiner, apply_patch};
pub use shotsplit_segment::{split_baseline, split_sentences};
