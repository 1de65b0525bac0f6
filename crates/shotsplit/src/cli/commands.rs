//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Shotsplit - shot segmentation for Chinese novel chapters
#[derive(Parser, Debug)]
#[command(name = "shotsplit")]
#[command(about = "Shot segmentation for Chinese novel chapters with optional refinement", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./shotsplit.toml, then ~/.config/shotsplit/shotsplit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment one chapter file
    Split(SplitArgs),

    /// Segment every *.txt chapter in a directory
    Batch(BatchArgs),
}

/// Options shared by both commands
#[derive(Args, Debug, Clone, Default)]
pub struct SegmentOptions {
    /// Skip refinement and keep the baseline
    #[arg(long)]
    pub no_refine: bool,

    /// Advisory minimum shot length in chars
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Emit a shot once it reaches this many chars
    #[arg(long)]
    pub soft_target: Option<usize>,

    /// Always emit a shot at this many chars
    #[arg(long)]
    pub hard_cut: Option<usize>,

    /// Lower bound of the refined shot count
    #[arg(long)]
    pub min_shots: Option<usize>,

    /// Upper bound of the refined shot count
    #[arg(long)]
    pub max_shots: Option<usize>,

    /// Allow merge/move_tail across scene breaks
    #[arg(long)]
    pub allow_cross_scene_break: bool,

    /// Collaborator model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Collaborator API root
    #[arg(long)]
    pub base_url: Option<String>,

    /// Collaborator request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for `split`
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Chapter text file (UTF-8)
    #[arg(long)]
    pub input: PathBuf,

    /// Chapter identifier (default: input file stem)
    #[arg(long)]
    pub chapter_id: Option<String>,

    /// Output path (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Segmentation and refinement options
    #[command(flatten)]
    pub options: SegmentOptions,
}

/// Arguments for `batch`
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory of chapter *.txt files
    #[arg(long)]
    pub chapters_dir: PathBuf,

    /// Directory for {chapter_id}.shotscript.json outputs
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Maximum chapters processed at once
    #[arg(long, default_value = "4")]
    pub jobs: usize,

    /// Segmentation and refinement options
    #[command(flatten)]
    pub options: SegmentOptions,
}
