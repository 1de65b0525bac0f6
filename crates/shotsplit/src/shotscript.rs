//! ShotScript output document.

use serde::{Deserialize, Serialize};
use shotsplit_core::{Shot, ShotKind, Tags};
use shotsplit_error::{IoError, IoErrorKind};
use shotsplit_interface::PatchCollaborator;
use shotsplit_refine::RefineOutcome;

/// Schema literal written into every document.
pub const SHOTSCRIPT_SCHEMA_VERSION: &str = "shotscript.v0.1";

/// Stable shot identifier: `{chapter_id}_shot_{order:04}`.
///
/// # Examples
///
/// ```
/// assert_eq!(shotsplit::shot_id("ch_0001", 7), "ch_0001_shot_0007");
/// ```
pub fn shot_id(chapter_id: &str, order: usize) -> String {
    format!("{}_shot_{:04}", chapter_id, order)
}

/// How refinement went for this chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefineMeta {
    /// Whether a collaborator was called at all
    pub attempted: bool,
    /// Whether the baseline was kept
    pub used_fallback: bool,
    /// Failure category, if refinement fell back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Failure message, if refinement fell back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Provider whose patch was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model whose patch was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl RefineMeta {
    /// Refinement was not attempted.
    pub fn skipped(reason: Option<String>) -> Self {
        Self {
            attempted: false,
            used_fallback: true,
            error: reason,
            ..Self::default()
        }
    }

    /// Summarize a refinement outcome. Provider and model are recorded only
    /// when the collaborator's patch was applied.
    pub fn from_outcome<C: PatchCollaborator>(outcome: &RefineOutcome, collaborator: &C) -> Self {
        match outcome.failure() {
            Some(failure) => Self {
                attempted: true,
                used_fallback: true,
                category: Some(failure.category.to_string()),
                error: Some(failure.message.clone()),
                ..Self::default()
            },
            None => Self {
                attempted: true,
                used_fallback: false,
                provider: Some(collaborator.provider_name().to_string()),
                model: Some(collaborator.model_name().to_string()),
                ..Self::default()
            },
        }
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotScriptMeta {
    /// Chapter identifier
    pub chapter_id: String,
    /// Source language
    pub language: String,
    /// Refinement summary
    pub refine: RefineMeta,
}

/// Text variants for downstream stages. All start as the raw shot text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotText {
    /// Verbatim source text
    pub raw_text: String,
    /// Text for speech synthesis
    pub tts_text: String,
    /// Text for subtitles
    pub subtitle_text: String,
}

impl ShotText {
    fn verbatim(text: &str) -> Self {
        Self {
            raw_text: text.to_string(),
            tts_text: text.to_string(),
            subtitle_text: text.to_string(),
        }
    }
}

/// One shot in a ShotScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEntry {
    /// Stable identifier
    pub shot_id: String,
    /// Position in the chapter
    pub order: usize,
    /// Shot classification
    pub kind: ShotKind,
    /// Text variants
    pub text: ShotText,
    /// Annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

/// Per-chapter segmentation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotScript {
    /// Always [`SHOTSCRIPT_SCHEMA_VERSION`]
    pub schema_version: String,
    /// Chapter metadata
    pub meta: ShotScriptMeta,
    /// Shots in reading order
    pub shots: Vec<ShotEntry>,
}

impl ShotScript {
    /// Build a document from final shots.
    pub fn new(chapter_id: &str, shots: &[Shot], refine: RefineMeta) -> Self {
        let shots = shots
            .iter()
            .enumerate()
            .map(|(order, shot)| ShotEntry {
                shot_id: shot_id(chapter_id, order),
                order,
                kind: shot.kind,
                text: ShotText::verbatim(&shot.text),
                tags: shot.tags.clone(),
            })
            .collect();

        Self {
            schema_version: SHOTSCRIPT_SCHEMA_VERSION.to_string(),
            meta: ShotScriptMeta {
                chapter_id: chapter_id.to_string(),
                language: "zh".to_string(),
                refine,
            },
            shots,
        }
    }

    /// Pretty-printed JSON with non-ASCII kept verbatim.
    pub fn to_json_pretty(&self) -> Result<String, IoError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            IoError::new(IoErrorKind::Serialize {
                what: "shot script",
                message: e.to_string(),
            })
        })
    }
}
