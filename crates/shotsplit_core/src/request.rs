//! Refinement request payload sent to the collaborator.

use crate::{Constraints, Shot, ShotKind};
use serde::Serialize;

/// A shot as the collaborator sees it. Tags are never transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotView<'a> {
    /// Baseline idx
    pub idx: usize,
    /// Baseline kind
    pub kind: ShotKind,
    /// Verbatim text
    pub text: &'a str,
}

impl<'a> From<&'a Shot> for ShotView<'a> {
    fn from(shot: &'a Shot) -> Self {
        Self {
            idx: shot.idx,
            kind: shot.kind,
            text: &shot.text,
        }
    }
}

/// Payload describing one chapter's baseline for refinement.
///
/// # Examples
///
/// ```
/// use shotsplit_core::{Constraints, RefineRequest, Shot, ShotKind};
///
/// let mut shot = Shot::new(0, ShotKind::Mixed, "文本。");
/// shot.tags = Some([("mood".to_string(), serde_json::json!("calm"))].into());
/// let shots = vec![shot];
/// let constraints = Constraints::default();
///
/// let request = RefineRequest::new("ch_0001", &shots, &constraints);
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["base_shots"][0]["kind"], "mixed");
/// assert!(json["base_shots"][0].get("tags").is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RefineRequest<'a> {
    /// Chapter identifier
    pub chapter_id: &'a str,
    /// Caller constraints
    pub constraints: &'a Constraints,
    /// Baseline shots reduced to idx/kind/text
    pub base_shots: Vec<ShotView<'a>>,
}

impl<'a> RefineRequest<'a> {
    /// Build a request from a baseline sequence.
    pub fn new(chapter_id: &'a str, base_shots: &'a [Shot], constraints: &'a Constraints) -> Self {
        Self {
            chapter_id,
            constraints,
            base_shots: base_shots.iter().map(ShotView::from).collect(),
        }
    }
}
