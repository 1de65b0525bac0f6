//! Refinement constraints.

use serde::{Deserialize, Serialize};

/// Target shot-count window and structural restrictions for refinement.
///
/// Only the caller's own `Constraints` govern validation; the copy a
/// collaborator echoes back in its patch is type-checked and otherwise ignored.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct Constraints {
    /// Lower bound of the target window
    #[serde(default = "default_min_shots")]
    min_shots: usize,
    /// Upper bound of the target window
    #[serde(default = "default_max_shots")]
    max_shots: usize,
    /// Reject merge/move_tail that touch a scene break
    #[serde(default = "default_forbid_cross_scene_break")]
    forbid_cross_scene_break: bool,
}

fn default_min_shots() -> usize {
    60
}

fn default_max_shots() -> usize {
    120
}

fn default_forbid_cross_scene_break() -> bool {
    true
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_shots: default_min_shots(),
            max_shots: default_max_shots(),
            forbid_cross_scene_break: default_forbid_cross_scene_break(),
        }
    }
}

impl Constraints {
    /// Create constraints from explicit values.
    pub fn new(min_shots: usize, max_shots: usize, forbid_cross_scene_break: bool) -> Self {
        Self {
            min_shots,
            max_shots,
            forbid_cross_scene_break,
        }
    }

    /// The count window actually enforced for a baseline of `baseline_count` shots.
    ///
    /// The window is widened to include the baseline count, so a chapter whose
    /// baseline already falls outside the configured range stays satisfiable.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotsplit_core::Constraints;
    ///
    /// let bounds = Constraints::new(60, 120, true).effective_bounds(20);
    /// assert_eq!((bounds.min, bounds.max), (20, 120));
    /// ```
    pub fn effective_bounds(&self, baseline_count: usize) -> ShotBounds {
        ShotBounds {
            min: self.min_shots.min(baseline_count),
            max: self.max_shots.max(baseline_count),
        }
    }
}

/// Inclusive shot-count window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct ShotBounds {
    /// Smallest accepted count
    pub min: usize,
    /// Largest accepted count
    pub max: usize,
}

impl ShotBounds {
    /// Whether `count` lies inside the window.
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}
