//! Shot types shared by baseline segmentation and refinement.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form annotations attached to a shot. Never content-bearing.
pub type Tags = BTreeMap<String, serde_json::Value>;

/// Coarse classification of a shot.
///
/// Baseline segmentation only produces [`ShotKind::Mixed`],
/// [`ShotKind::SceneBreak`], and (for sentence-less paragraphs)
/// [`ShotKind::Narration`]; the other kinds are accepted as-is from callers.
///
/// # Examples
///
/// ```
/// use shotsplit_core::ShotKind;
///
/// assert_eq!(ShotKind::SceneBreak.to_string(), "scene_break");
/// assert_eq!("dialogue".parse::<ShotKind>().unwrap(), ShotKind::Dialogue);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShotKind {
    /// Descriptive prose
    Narration,
    /// Spoken lines
    Dialogue,
    /// A scene separator line
    SceneBreak,
    /// Anything else, including merged shots
    Mixed,
}

/// A verbatim unit of chapter text.
///
/// `idx` is only meaningful within one sequence: patch application
/// renumbers the output `0..M-1`.
///
/// # Examples
///
/// ```
/// use shotsplit_core::{Shot, ShotKind};
///
/// let shot = Shot::new(0, ShotKind::Narration, "测试文本");
/// assert_eq!(shot.idx, 0);
/// assert!(shot.tags.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Ordinal within the current sequence
    pub idx: usize,
    /// Classification
    pub kind: ShotKind,
    /// Source text, unmodified
    pub text: String,
    /// Optional annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl Shot {
    /// Create an untagged shot.
    pub fn new(idx: usize, kind: ShotKind, text: impl Into<String>) -> Self {
        Self {
            idx,
            kind,
            text: text.into(),
            tags: None,
        }
    }

    /// Whether this shot is a scene separator.
    pub fn is_scene_break(&self) -> bool {
        self.kind == ShotKind::SceneBreak
    }
}
