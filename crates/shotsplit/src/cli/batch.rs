//! `batch` command handler.

use super::{BatchArgs, build_segmenter, segmenter::load_config};
use shotsplit::{ShotsplitResult, chapter_files, run_batch};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Segment every chapter in a directory.
///
/// Individual chapter failures are logged and counted; the command itself
/// fails only if the directory cannot be listed.
pub async fn run_batch_command(args: BatchArgs, config_path: Option<&Path>) -> ShotsplitResult<()> {
    let config = load_config(config_path)?;
    let segmenter = Arc::new(build_segmenter(&config, &args.options));

    let chapters = chapter_files(&args.chapters_dir).await?;
    info!(chapters = chapters.len(), jobs = args.jobs, "Starting batch");

    let reports = run_batch(segmenter, chapters, &args.output_dir, args.jobs).await;

    let mut written = 0;
    let mut fallbacks = 0;
    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(summary) => {
                written += 1;
                if summary.used_fallback {
                    fallbacks += 1;
                }
            }
            Err(e) => {
                failed += 1;
                error!(chapter_id = %report.chapter_id, error = %e, "Chapter not written");
            }
        }
    }

    info!(written, fallbacks, failed, "Batch complete");
    Ok(())
}
