use std::path::PathBuf;

use blockfall_engine::SourceSeed;
use clap::Parser;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Piece sequence seed as 32 hex digits; random when omitted
    #[clap(long)]
    seed: Option<SourceSeed>,
    /// Hand control to the autopilot from the first piece
    #[clap(long)]
    ai: bool,
    /// Milliseconds between autopilot actions
    #[clap(long, default_value_t = 500)]
    ai_cadence_ms: u64,
    /// File the best score is read from and written to
    #[clap(long, default_value = "high_score.txt")]
    high_score_file: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&args)
}
