//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the shotsplit binary.

mod batch;
mod commands;
mod segmenter;
mod split;

pub use batch::run_batch_command;
pub use commands::{BatchArgs, Cli, Commands, SegmentOptions, SplitArgs};
pub use segmenter::build_segmenter;
pub use split::run_split;
