//! Sentence scanning shared by segmentation and `move_tail`.

/// Sentence-final punctuation. The mark stays attached to its sentence.
pub const SENTENCE_TERMINATORS: [char; 4] = ['。', '！', '？', '；'];

/// Closing quotation marks, treated as an extra boundary by [`split_sentences_verbatim`].
pub const CLOSING_QUOTES: [char; 3] = ['”', '」', '』'];

/// Split `text` into trimmed, non-empty sentences.
///
/// A sentence ends at each char in [`SENTENCE_TERMINATORS`]; unterminated
/// trailing text becomes a final sentence.
///
/// # Examples
///
/// ```
/// use shotsplit_segment::split_sentences;
///
/// assert_eq!(split_sentences("第一段。第二段！ 尾巴"), vec!["第一段。", "第二段！", "尾巴"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    scan(text, |c| SENTENCE_TERMINATORS.contains(&c))
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split `text` into untrimmed pieces whose concatenation is `text`.
///
/// A piece ends after every sentence terminator and after every closing
/// quote, so `。”` yields two pieces. Whitespace between boundaries is kept:
/// a whitespace-only run joins the preceding piece (or the first one when
/// it leads the text). Whitespace-only input yields no pieces.
///
/// # Examples
///
/// ```
/// use shotsplit_segment::split_sentences_verbatim;
///
/// let parts = split_sentences_verbatim("他说：“走。”我们走了。\n");
/// assert_eq!(parts, vec!["他说：“走。", "”", "我们走了。\n"]);
/// assert_eq!(parts.concat(), "他说：“走。”我们走了。\n");
/// ```
pub fn split_sentences_verbatim(text: &str) -> Vec<&str> {
    let is_boundary = |c: char| SENTENCE_TERMINATORS.contains(&c) || CLOSING_QUOTES.contains(&c);

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for piece in scan(text, is_boundary) {
        let end = offset + piece.len();
        if !piece.trim().is_empty() {
            spans.push((start, end));
            start = end;
        } else if let Some(last) = spans.last_mut() {
            last.1 = end;
            start = end;
        }
        offset = end;
    }

    spans.into_iter().map(|(from, to)| &text[from..to]).collect()
}

/// Cut `text` after every char matching `is_boundary`.
fn scan(text: &str, is_boundary: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if is_boundary(c) {
            let end = i + c.len_utf8();
            parts.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}
