//! Shotsplit CLI binary.
//!
//! - Segment a single chapter file into a ShotScript
//! - Segment a directory of chapters concurrently

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_batch_command, run_split};

    let cli = Cli::parse();

    shotsplit::init_tracing(cli.verbose);

    match cli.command {
        Commands::Split(args) => {
            run_split(args, cli.config.as_deref()).await?;
        }

        Commands::Batch(args) => {
            run_batch_command(args, cli.config.as_deref()).await?;
        }
    }

    Ok(())
}
