//! Patch wire types exchanged with the refinement collaborator.

use crate::Tags;
use serde::{Deserialize, Serialize};

/// The only `schema_version` literal accepted in a patch.
pub const PATCH_SCHEMA_VERSION: &str = "shotsplit_patch.v0.1";

/// Operation tags recognized in `ops`.
pub const OP_NAMES: [&str; 4] = ["merge", "split", "move_tail", "tag"];

/// One structural edit. Ops reference shots by `idx` in the working sequence.
///
/// The serialized form is the wire form, e.g.
/// `{"op":"split","idx":0,"at":"前半。"}`.
///
/// # Examples
///
/// ```
/// use shotsplit_core::Op;
///
/// let op: Op = serde_json::from_str(r#"{"op":"split","idx":0,"at":"前半。"}"#).unwrap();
/// assert_eq!(op, Op::Split { idx: 0, marker: "前半。".to_string() });
/// assert_eq!(op.name(), "split");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Concatenate shots `start_idx..=end_idx` into one
    Merge {
        /// First shot of the range
        start_idx: usize,
        /// Last shot of the range
        end_idx: usize,
    },
    /// Cut a shot immediately after the first occurrence of `marker`
    Split {
        /// Shot to cut
        idx: usize,
        /// Literal substring of the shot text
        #[serde(rename = "at")]
        marker: String,
    },
    /// Move the last `sentence_count` sentences of `from_idx` to the front of `to_idx`
    MoveTail {
        /// Source shot
        from_idx: usize,
        /// Destination shot, must be `from_idx + 1`
        to_idx: usize,
        /// Number of trailing sentences to move
        #[serde(rename = "sentences")]
        sentence_count: usize,
    },
    /// Merge annotations into a shot's tags
    Tag {
        /// Shot to annotate
        idx: usize,
        /// Key/value pairs, overwriting on collision
        #[serde(default)]
        tags: Tags,
    },
}

impl Op {
    /// Wire tag of this op.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Merge { .. } => "merge",
            Op::Split { .. } => "split",
            Op::MoveTail { .. } => "move_tail",
            Op::Tag { .. } => "tag",
        }
    }
}

/// The constraints block a collaborator echoes back in its patch.
///
/// Kept as signed integers so that out-of-range values are recorded rather
/// than rejected; nothing reads these for enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdvisoryConstraints {
    /// Echoed lower bound
    pub min_shots: i64,
    /// Echoed upper bound
    pub max_shots: i64,
    /// Echoed scene-break flag
    pub forbid_cross_scene_break: bool,
}

/// A validated edit script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// Always [`PATCH_SCHEMA_VERSION`]
    pub schema_version: String,
    /// Chapter the patch was produced for
    pub chapter_id: String,
    /// Advisory copy of the constraints; never enforced
    pub constraints: AdvisoryConstraints,
    /// Ordered edit script
    pub ops: Vec<Op>,
}
