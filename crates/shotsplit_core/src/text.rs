//! Text normalization used by the conservation check.

use crate::Shot;

/// Remove every whitespace character, including U+3000 and newlines.
///
/// # Examples
///
/// ```
/// use shotsplit_core::normalize_text;
///
/// assert_eq!(normalize_text("　　前文。\n 后文。"), "前文。后文。");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Concatenate shot texts in order.
pub fn concat_text(shots: &[Shot]) -> String {
    shots.iter().map(|s| s.text.as_str()).collect()
}

/// Whitespace-insensitive concatenation of a shot sequence.
pub fn normalized_concat(shots: &[Shot]) -> String {
    normalize_text(&concat_text(shots))
}
