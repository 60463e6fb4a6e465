use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crawl_core::{ReplayResult, replay_to_end};
use crawl_tools::{init_logging, read_journal};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Ticks to keep simulating after the last recorded input
    #[arg(short, long, default_value_t = 600)]
    trailing_ticks: u32,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let journal = read_journal(&args.journal)?;
    log::info!("replaying {} inputs from seed {}", journal.inputs.len(), journal.seed);

    let result: ReplayResult = replay_to_end(&journal, args.trailing_ticks)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {:?}", e))?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Phase: {:?}", result.final_phase);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
