//! Rule-based baseline segmentation.
//!
//! Chapter text is grouped into paragraphs and scene breaks using line
//! structure only, paragraphs are cut into sentences, and sentences are
//! accumulated into shots by length. The same algorithm is the refinement
//! fallback, so it must stay deterministic and collaborator-free.

use crate::split_sentences;
use regex::Regex;
use shotsplit_core::{Shot, ShotKind, SplitConfig};
use std::sync::LazyLock;
use tracing::{debug, instrument};

static SCENE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-—–－─━―]{3,}\s*$").expect("Valid scene break regex")
});

static CHAPTER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*第[零〇一二三四五六七八九十百千万两0-9０-９]+[章回节]")
        .expect("Valid chapter title regex")
});

/// Conventional double-width paragraph indent.
const PARAGRAPH_INDENT: &str = "\u{3000}\u{3000}";

/// Whether a line is a standalone scene separator such as `————`.
pub fn is_scene_break(line: &str) -> bool {
    SCENE_BREAK.is_match(line)
}

/// Whether a line looks like a chapter heading such as `第十二章 归来`.
pub fn is_chapter_title(line: &str) -> bool {
    CHAPTER_TITLE.is_match(line)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    SceneBreak(String),
    Paragraph(String),
}

/// Group lines into paragraphs and scene breaks.
fn gather_blocks(chapter_text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    fn flush(current: &mut Vec<&str>, blocks: &mut Vec<Block>) {
        if current.is_empty() {
            return;
        }
        let joined = current.join("\n");
        let text = joined.trim_matches('\n');
        if !text.trim().is_empty() {
            blocks.push(Block::Paragraph(text.to_string()));
        }
        current.clear();
    }

    for raw in chapter_text.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            flush(&mut current, &mut blocks);
            continue;
        }

        if is_chapter_title(line) {
            // Input should already be title-free; treat a stray heading as a boundary.
            flush(&mut current, &mut blocks);
            continue;
        }

        if is_scene_break(line) {
            flush(&mut current, &mut blocks);
            blocks.push(Block::SceneBreak(line.trim().to_string()));
            continue;
        }

        if line.starts_with(PARAGRAPH_INDENT) && !current.is_empty() {
            flush(&mut current, &mut blocks);
        }

        current.push(line);
    }

    flush(&mut current, &mut blocks);
    blocks
}

/// Collects shots with contiguous idx values.
#[derive(Debug, Default)]
struct ShotSink {
    shots: Vec<Shot>,
}

impl ShotSink {
    fn emit(&mut self, text: &str, kind: ShotKind) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let idx = self.shots.len();
        self.shots.push(Shot::new(idx, kind, text));
    }
}

/// Split cleaned chapter text into baseline shots.
///
/// Scene-break lines become standalone [`ShotKind::SceneBreak`] shots.
/// Paragraph sentences are accumulated until the buffer reaches
/// `soft_target` (or `hard_cut`, whichever comes first) and emitted as
/// [`ShotKind::Mixed`]; whatever remains at paragraph end is emitted even
/// when shorter than `min_chars`.
///
/// # Examples
///
/// ```
/// use shotsplit_core::{ShotKind, SplitConfig};
/// use shotsplit_segment::split_baseline;
///
/// let shots = split_baseline("　　前文。\n————\n　　后文。", &SplitConfig::new(2, 20, 50));
/// assert_eq!(shots.len(), 3);
/// assert_eq!(shots[1].kind, ShotKind::SceneBreak);
/// ```
#[instrument(skip(chapter_text, cfg), fields(chars = chapter_text.chars().count()))]
pub fn split_baseline(chapter_text: &str, cfg: &SplitConfig) -> Vec<Shot> {
    let mut sink = ShotSink::default();

    for block in gather_blocks(chapter_text) {
        let paragraph = match block {
            Block::SceneBreak(line) => {
                sink.emit(&line, ShotKind::SceneBreak);
                continue;
            }
            Block::Paragraph(text) => text,
        };

        let sentences = split_sentences(&paragraph);
        if sentences.is_empty() {
            sink.emit(&paragraph, ShotKind::Narration);
            continue;
        }

        let mut buf = String::new();
        let mut buf_chars = 0;
        for sentence in sentences {
            buf.push_str(sentence);
            buf_chars += sentence.chars().count();

            if buf_chars >= *cfg.soft_target() || buf_chars >= *cfg.hard_cut() {
                sink.emit(&buf, ShotKind::Mixed);
                buf.clear();
                buf_chars = 0;
            }
        }

        // min_chars is advisory: a short remainder is still its own shot.
        if !buf.trim().is_empty() {
            sink.emit(&buf, ShotKind::Mixed);
        }
    }

    debug!(shots = sink.shots.len(), "Baseline segmentation complete");
    sink.shots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_break_requires_three_dashes_alone() {
        assert!(is_scene_break("————"));
        assert!(is_scene_break("  ---  "));
        assert!(is_scene_break("———"));
        assert!(!is_scene_break("——"));
        assert!(!is_scene_break("——他说"));
    }

    #[test]
    fn chapter_titles_cover_common_numbering() {
        assert!(is_chapter_title("第十二章 归来"));
        assert!(is_chapter_title("　第3回"));
        assert!(is_chapter_title("第一百零一节"));
        assert!(!is_chapter_title("第二天，他走了。"));
    }

    #[test]
    fn indent_opens_new_paragraph_only_when_one_is_open() {
        let blocks = gather_blocks("　　甲。\n　　乙。\n丙。");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("　　甲。".to_string()),
                Block::Paragraph("　　乙。\n丙。".to_string()),
            ]
        );
    }

    #[test]
    fn blank_lines_and_titles_are_boundaries() {
        let blocks = gather_blocks("第一章 开端\n甲。\n\n乙。\n第二章\n丙。");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("甲。".to_string()),
                Block::Paragraph("乙。".to_string()),
                Block::Paragraph("丙。".to_string()),
            ]
        );
    }
}
