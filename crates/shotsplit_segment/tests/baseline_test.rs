use shotsplit_core::{ShotKind, SplitConfig, normalize_text, normalized_concat};
use shotsplit_segment::{split_baseline, split_sentences, split_sentences_verbatim};

const CHAPTER: &str = concat!(
    "　　夜色渐深，山风从林间穿过。远处传来几声犬吠！他停下脚步，回头望去？\n",
    "　　“谁在那里？”他低声问。没有人回答；只有风声。\n",
    "\n",
    "————\n",
    "　　第二天清晨，村口聚满了人。有人说昨夜看见了火光，有人说什么都没看见。\n",
    "　　他沉默着走过人群，没有停留\n",
);

#[test]
fn scene_break_example_yields_three_shots() {
    let shots = split_baseline("　　前文。\n————\n　　后文。", &SplitConfig::new(2, 20, 50));
    assert_eq!(shots.len(), 3);
    assert_eq!(shots[0].text, "前文。");
    assert_eq!(shots[1].kind, ShotKind::SceneBreak);
    assert_eq!(shots[1].text, "————");
    assert_eq!(shots[2].text, "后文。");
    assert_eq!(
        shots.iter().map(|s| s.idx).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn basic_split_keeps_all_sentences() {
    let shots = split_baseline("　　第一段。第二段！第三段？", &SplitConfig::new(10, 50, 100));
    assert!(!shots.is_empty());
    let concat: String = shots.iter().map(|s| s.text.as_str()).collect();
    assert!(concat.contains("第一段") && concat.contains("第二段") && concat.contains("第三段"));
}

#[test]
fn baseline_conserves_text_for_every_configuration() {
    let configs = [
        SplitConfig::new(1, 1, 1),
        SplitConfig::new(2, 5, 8),
        SplitConfig::new(10, 20, 15),
        SplitConfig::new(80, 140, 220),
        SplitConfig::new(500, 1000, 2000),
    ];
    let expected = normalize_text(CHAPTER);
    for cfg in configs {
        let shots = split_baseline(CHAPTER, &cfg);
        assert_eq!(normalized_concat(&shots), expected, "config {:?}", cfg);
    }
}

#[test]
fn soft_target_emits_as_soon_as_reached() {
    // Each sentence is 3 chars; soft target 6 groups them in pairs.
    let shots = split_baseline("甲甲。乙乙。丙丙。丁丁。戊戊。", &SplitConfig::new(1, 6, 100));
    let texts: Vec<&str> = shots.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["甲甲。乙乙。", "丙丙。丁丁。", "戊戊。"]);
    assert!(shots.iter().all(|s| s.kind == ShotKind::Mixed));
}

#[test]
fn hard_cut_wins_when_below_soft_target() {
    let shots = split_baseline("甲甲。乙乙。丙丙。丁丁。", &SplitConfig::new(1, 100, 4));
    let texts: Vec<&str> = shots.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["甲甲。乙乙。", "丙丙。丁丁。"]);
}

#[test]
fn short_remainder_is_emitted_below_min_chars() {
    let shots = split_baseline("长长长长长长长长。短。", &SplitConfig::new(80, 9, 220));
    let texts: Vec<&str> = shots.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["长长长长长长长长。", "短。"]);
}

#[test]
fn paragraphs_never_share_a_shot() {
    let shots = split_baseline("　　甲。\n　　乙。", &SplitConfig::new(1, 100, 200));
    assert_eq!(shots.len(), 2);
}

#[test]
fn stray_chapter_title_is_dropped() {
    let shots = split_baseline("第三章 风起\n　　正文。", &SplitConfig::default());
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].text, "正文。");
}

#[test]
fn output_is_deterministic() {
    let cfg = SplitConfig::new(10, 30, 60);
    assert_eq!(split_baseline(CHAPTER, &cfg), split_baseline(CHAPTER, &cfg));
}

#[test]
fn empty_input_yields_no_shots() {
    assert!(split_baseline("", &SplitConfig::default()).is_empty());
    assert!(split_baseline("\n\u{3000}\n  \n", &SplitConfig::default()).is_empty());
}

#[test]
fn sentence_scanners_agree_on_terminators() {
    let text = "一。二！三？四；五";
    assert_eq!(split_sentences(text).len(), 5);
    assert_eq!(split_sentences_verbatim(text).len(), 5);
}

#[test]
fn verbatim_scanner_breaks_after_closing_quote() {
    let parts = split_sentences_verbatim("“来了”他说。");
    assert_eq!(parts, vec!["“来了”", "他说。"]);
}

#[test]
fn closing_quote_after_terminator_is_its_own_piece() {
    let text = "他说：“走。”我们走了。";
    let parts = split_sentences_verbatim(text);
    assert_eq!(parts, vec!["他说：“走。", "”", "我们走了。"]);
    assert_eq!(parts.concat(), text);
}

#[test]
fn verbatim_scanner_keeps_whitespace() {
    let text = "  第一句。 \n第二句！  ";
    let parts = split_sentences_verbatim(text);
    assert_eq!(parts, vec!["  第一句。", " \n第二句！  "]);
    assert_eq!(parts.concat(), text);
    assert!(split_sentences_verbatim(" \n\u{3000}").is_empty());
}
