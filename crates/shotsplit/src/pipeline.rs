//! Chapter-level pipeline: baseline, optional refinement, ShotScript output.

use crate::{RefineMeta, ShotScript};
use shotsplit_core::{Constraints, SplitConfig};
use shotsplit_error::{IoError, IoErrorKind, ShotsplitResult};
use shotsplit_interface::PatchCollaborator;
use shotsplit_refine::ShotRefiner;
use shotsplit_segment::split_baseline;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

/// Segments chapters, refining them when a collaborator is available.
#[derive(Debug)]
pub struct ChapterSegmenter<C: PatchCollaborator> {
    split: SplitConfig,
    constraints: Constraints,
    refiner: Option<ShotRefiner<C>>,
    skip_reason: Option<String>,
}

impl<C: PatchCollaborator> ChapterSegmenter<C> {
    /// Baseline only; `reason` is recorded in each document's refine metadata.
    pub fn baseline_only(split: SplitConfig, constraints: Constraints, reason: Option<String>) -> Self {
        Self {
            split,
            constraints,
            refiner: None,
            skip_reason: reason,
        }
    }

    /// Baseline followed by refinement.
    pub fn with_refiner(split: SplitConfig, constraints: Constraints, refiner: ShotRefiner<C>) -> Self {
        Self {
            split,
            constraints,
            refiner: Some(refiner),
            skip_reason: None,
        }
    }

    /// Whether chapters will be sent to a collaborator.
    pub fn refines(&self) -> bool {
        self.refiner.is_some()
    }

    /// Segment one chapter's text.
    #[instrument(skip(self, text), fields(chapter_chars = text.chars().count()))]
    pub async fn segment(&self, chapter_id: &str, text: &str) -> ShotScript {
        let base = split_baseline(text, &self.split);
        info!(baseline = base.len(), "Baseline segmentation complete");

        let (shots, meta) = match &self.refiner {
            None => (base, RefineMeta::skipped(self.skip_reason.clone())),
            Some(refiner) => {
                let outcome = refiner.refine(chapter_id, &base, &self.constraints).await;
                let meta = RefineMeta::from_outcome(&outcome, refiner.collaborator());
                (outcome.into_shots(), meta)
            }
        };

        info!(shots = shots.len(), used_fallback = meta.used_fallback, "Chapter segmented");
        ShotScript::new(chapter_id, &shots, meta)
    }

    /// Read a chapter file, segment it, and write the ShotScript to `output`.
    pub async fn segment_file(
        &self,
        chapter_id: &str,
        input: &Path,
        output: &Path,
    ) -> ShotsplitResult<ShotScript> {
        let text = read_chapter(input).await?;
        let script = self.segment(chapter_id, &text).await;
        write_shotscript(output, &script).await?;
        Ok(script)
    }
}

/// Read a UTF-8 chapter file.
pub async fn read_chapter(path: &Path) -> ShotsplitResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        IoError::new(IoErrorKind::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

/// Write a ShotScript as pretty JSON, creating parent directories.
pub async fn write_shotscript(path: &Path, script: &ShotScript) -> ShotsplitResult<()> {
    let json = script.to_json_pretty()?;
    let write_err = |target: &Path, e: std::io::Error| {
        IoError::new(IoErrorKind::Write {
            path: target.display().to_string(),
            message: e.to_string(),
        })
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_err(parent, e))?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| write_err(path, e))?;
    Ok(())
}

/// Chapter id for a file: its stem.
pub fn chapter_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chapter".to_string())
}

/// Output path for a chapter inside a batch output directory.
pub fn shotscript_path(output_dir: &Path, chapter_id: &str) -> PathBuf {
    output_dir.join(format!("{}.shotscript.json", chapter_id))
}

/// `*.txt` files in `dir`, sorted by name.
pub async fn chapter_files(dir: &Path) -> ShotsplitResult<Vec<PathBuf>> {
    let io_err = |e: std::io::Error| {
        IoError::new(IoErrorKind::List {
            path: dir.display().to_string(),
            message: e.to_string(),
        })
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Result of one chapter in a batch.
#[derive(Debug)]
pub struct ChapterReport {
    /// Chapter identifier
    pub chapter_id: String,
    /// Where the ShotScript was written, or why the chapter failed
    pub result: ShotsplitResult<ChapterSummary>,
}

/// Summary of a successfully written chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSummary {
    /// Output path
    pub output: PathBuf,
    /// Number of shots written
    pub shots: usize,
    /// Whether the baseline was kept
    pub used_fallback: bool,
}

/// Process chapters concurrently, at most `jobs` at a time.
///
/// Each chapter is independent: a failure is reported in its
/// [`ChapterReport`] and never affects the others. Reports are sorted by
/// chapter id.
#[instrument(skip(segmenter, chapters), fields(chapters = chapters.len(), output_dir = %output_dir.display()))]
pub async fn run_batch<C>(
    segmenter: Arc<ChapterSegmenter<C>>,
    chapters: Vec<PathBuf>,
    output_dir: &Path,
    jobs: usize,
) -> Vec<ChapterReport>
where
    C: PatchCollaborator + 'static,
{
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();

    for input in chapters {
        let chapter_id = chapter_id_for(&input);
        let output = shotscript_path(output_dir, &chapter_id);
        let segmenter = Arc::clone(&segmenter);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("Semaphore should not be closed");
            let result = segmenter
                .segment_file(&chapter_id, &input, &output)
                .await
                .map(|script| ChapterSummary {
                    output,
                    shots: script.shots.len(),
                    used_fallback: script.meta.refine.used_fallback,
                });
            if let Err(e) = &result {
                warn!(chapter_id = %chapter_id, error = %e, "Chapter failed");
            }
            ChapterReport { chapter_id, result }
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(report) => reports.push(report),
            Err(e) => error!("Chapter task aborted: {}", e),
        }
    }
    reports.sort_by(|a, b| a.chapter_id.cmp(&b.chapter_id));
    reports
}
