//! `split` command handler.

use super::{SplitArgs, build_segmenter, segmenter::load_config};
use shotsplit::{ShotsplitResult, chapter_id_for, read_chapter, write_shotscript};
use std::path::Path;
use tracing::info;

/// Segment one chapter and write its ShotScript to a file or stdout.
pub async fn run_split(args: SplitArgs, config_path: Option<&Path>) -> ShotsplitResult<()> {
    let config = load_config(config_path)?;
    let segmenter = build_segmenter(&config, &args.options);

    let chapter_id = args
        .chapter_id
        .unwrap_or_else(|| chapter_id_for(&args.input));
    let text = read_chapter(&args.input).await?;
    let script = segmenter.segment(&chapter_id, &text).await;

    match &args.output {
        Some(output) => {
            write_shotscript(output, &script).await?;
            info!(output = %output.display(), shots = script.shots.len(), "ShotScript written");
        }
        None => {
            let json = script.to_json_pretty()?;
            println!("{}", json);
        }
    }

    Ok(())
}
