//! Baseline segmentation thresholds.

use serde::{Deserialize, Serialize};

/// Length thresholds (in chars) for merging sentences into shots.
///
/// `min_chars` is carried for configuration compatibility but is not a hard
/// floor: a short trailing buffer at paragraph end is still emitted.
///
/// # Examples
///
/// ```
/// use shotsplit_core::SplitConfig;
///
/// let cfg = SplitConfig::new(2, 20, 50);
/// assert_eq!(*cfg.soft_target(), 20);
/// assert_eq!(*SplitConfig::default().hard_cut(), 220);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct SplitConfig {
    /// Advisory minimum shot length
    #[serde(default = "default_min_chars")]
    min_chars: usize,
    /// Emit a shot once the buffer reaches this length
    #[serde(default = "default_soft_target")]
    soft_target: usize,
    /// Always emit once the buffer reaches this length
    #[serde(default = "default_hard_cut")]
    hard_cut: usize,
}

fn default_min_chars() -> usize {
    80
}

fn default_soft_target() -> usize {
    140
}

fn default_hard_cut() -> usize {
    220
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            soft_target: default_soft_target(),
            hard_cut: default_hard_cut(),
        }
    }
}
