//! Deterministic baseline shot segmentation.
//!
//! [`split_baseline`] turns cleaned chapter text into an ordered shot
//! sequence using only line structure and punctuation. The sentence scanners
//! are shared with the patch interpreter so that `move_tail` sees the same
//! boundaries segmentation does.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod baseline;
mod sentence;

pub use baseline::{is_chapter_title, is_scene_break, split_baseline};
pub use sentence::{CLOSING_QUOTES, SENTENCE_TERMINATORS, split_sentences, split_sentences_verbatim};
