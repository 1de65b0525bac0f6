//! End-to-end chapter pipeline tests with an in-memory collaborator.

use async_trait::async_trait;
use serde_json::{Value, json};
use shotsplit::{
    ChapterSegmenter, Constraints, PatchCollaborator, SHOTSCRIPT_SCHEMA_VERSION, ShotRefiner,
    ShotScript, ShotsplitResult, SplitConfig, chapter_files, normalized_concat, run_batch,
    shot_id, shotscript_path, split_baseline,
};
use shotsplit_error::{CollaboratorError, CollaboratorErrorKind};
use std::sync::Arc;

const CHAPTER: &str = concat!(
    "第一章 雨夜\n",
    "\u{3000}\u{3000}他推开门。屋里很暗。\n",
    "\u{3000}\u{3000}“有人吗？”他问。\n",
    "———\n",
    "\u{3000}\u{3000}第二天清晨。雨停了。\n",
);

/// Splits the first shot after its first sentence, or fails on request.
#[derive(Debug)]
struct FirstSentenceSplitter {
    fail: bool,
}

#[async_trait]
impl PatchCollaborator for FirstSentenceSplitter {
    async fn submit(&self, _system: &str, user: &str) -> ShotsplitResult<Value> {
        if self.fail {
            return Err(CollaboratorError::new(CollaboratorErrorKind::Status {
                status: 500,
                body: "boom".to_string(),
            })
            .into());
        }
        let payload_start = user.find("{\"chapter_id\"").unwrap_or(0);
        let payload: Value = serde_json::from_str(&user[payload_start..]).unwrap_or(json!({}));
        Ok(json!({
            "schema_version": "shotsplit_patch.v0.1",
            "chapter_id": payload["chapter_id"],
            "constraints": {"min_shots": 1, "max_shots": 50, "forbid_cross_scene_break": true},
            "ops": [{"op": "split", "idx": 0, "at": "他推开门。"}],
        }))
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }

    fn model_name(&self) -> &str {
        "first-sentence"
    }
}

fn constraints() -> Constraints {
    Constraints::new(1, 50, true)
}

fn refining(fail: bool) -> ChapterSegmenter<FirstSentenceSplitter> {
    ChapterSegmenter::with_refiner(
        SplitConfig::default(),
        constraints(),
        ShotRefiner::new(FirstSentenceSplitter { fail }),
    )
}

fn raw_texts(script: &ShotScript) -> Vec<&str> {
    script.shots.iter().map(|s| s.text.raw_text.as_str()).collect()
}

#[tokio::test]
async fn test_refined_chapter_document() {
    let script = refining(false).segment("ch_0001", CHAPTER).await;

    assert_eq!(script.schema_version, SHOTSCRIPT_SCHEMA_VERSION);
    assert_eq!(script.meta.chapter_id, "ch_0001");
    assert_eq!(script.meta.language, "zh");
    assert!(!script.meta.refine.used_fallback);
    assert_eq!(script.meta.refine.provider.as_deref(), Some("memory"));
    assert_eq!(script.meta.refine.model.as_deref(), Some("first-sentence"));

    assert_eq!(
        raw_texts(&script),
        vec!["他推开门。", "屋里很暗。", "“有人吗？”他问。", "———", "第二天清晨。雨停了。"]
    );
    assert_eq!(script.shots[4].shot_id, "ch_0001_shot_0004");
    assert_eq!(script.shots[4].order, 4);
}

#[tokio::test]
async fn test_failed_refinement_keeps_baseline() {
    let baseline = split_baseline(CHAPTER, &SplitConfig::default());

    let script = refining(true).segment("ch_0001", CHAPTER).await;

    assert!(script.meta.refine.attempted);
    assert!(script.meta.refine.used_fallback);
    assert_eq!(script.meta.refine.category.as_deref(), Some("transport"));
    assert!(script.meta.refine.error.as_deref().unwrap().contains("HTTP 500"));
    assert!(script.meta.refine.provider.is_none());
    let expected: Vec<&str> = baseline.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(raw_texts(&script), expected);
}

#[tokio::test]
async fn test_baseline_only_records_reason() {
    let segmenter: ChapterSegmenter<FirstSentenceSplitter> = ChapterSegmenter::baseline_only(
        SplitConfig::default(),
        constraints(),
        Some("refinement disabled".to_string()),
    );

    let script = segmenter.segment("ch_0002", CHAPTER).await;

    assert!(!segmenter.refines());
    assert!(!script.meta.refine.attempted);
    assert_eq!(script.meta.refine.error.as_deref(), Some("refinement disabled"));
    assert_eq!(script.shots[0].shot_id, shot_id("ch_0002", 0));
}

#[tokio::test]
async fn test_text_variants_start_verbatim() {
    let script = refining(false).segment("ch_0001", CHAPTER).await;

    for shot in &script.shots {
        assert_eq!(shot.text.raw_text, shot.text.tts_text);
        assert_eq!(shot.text.raw_text, shot.text.subtitle_text);
    }
    let json = script.to_json_pretty().unwrap();
    assert!(json.contains("他推开门。"));
    assert!(json.contains("\"kind\": \"scene_break\""));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("ch_0001.txt"), CHAPTER).unwrap();
    std::fs::write(input.path().join("ch_0002.txt"), CHAPTER).unwrap();
    // Not valid UTF-8: this chapter fails to read.
    std::fs::write(input.path().join("ch_0003.txt"), [0xff, 0xfe, 0xfd]).unwrap();
    std::fs::write(input.path().join("notes.md"), "ignored").unwrap();

    let chapters = chapter_files(input.path()).await.unwrap();
    assert_eq!(chapters.len(), 3);

    let reports = run_batch(Arc::new(refining(false)), chapters, output.path(), 2).await;

    let ids: Vec<&str> = reports.iter().map(|r| r.chapter_id.as_str()).collect();
    assert_eq!(ids, vec!["ch_0001", "ch_0002", "ch_0003"]);
    assert!(reports[0].result.is_ok());
    assert!(reports[1].result.is_ok());
    assert!(reports[2].result.is_err());

    let written = std::fs::read_to_string(shotscript_path(output.path(), "ch_0002")).unwrap();
    let script: ShotScript = serde_json::from_str(&written).unwrap();
    assert_eq!(script.meta.chapter_id, "ch_0002");
    assert_eq!(script.shots[0].shot_id, "ch_0002_shot_0000");
    assert!(!shotscript_path(output.path(), "ch_0003").exists());
}

#[tokio::test]
async fn test_batch_conserves_text_per_chapter() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.txt"), CHAPTER).unwrap();

    let chapters = chapter_files(input.path()).await.unwrap();
    let reports = run_batch(Arc::new(refining(false)), chapters, output.path(), 1).await;
    let summary = reports[0].result.as_ref().unwrap();
    assert!(!summary.used_fallback);

    let script: ShotScript =
        serde_json::from_str(&std::fs::read_to_string(&summary.output).unwrap()).unwrap();
    let joined: String = script.shots.iter().map(|s| s.text.raw_text.as_str()).collect();
    let baseline = split_baseline(CHAPTER, &SplitConfig::default());
    assert_eq!(
        joined.chars().filter(|c| !c.is_whitespace()).collect::<String>(),
        normalized_concat(&baseline)
    );
}
