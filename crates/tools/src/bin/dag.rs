use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crawl_core::{Game, START_NODE_ID};
use crawl_tools::{init_logging, load_tuning};

#[derive(Parser)]
#[command(author, version, about = "Print the progression graph a seed generates", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// JSON file overriding tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Also enter the start node and draw its dungeon
    #[arg(long)]
    enter: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let tuning = load_tuning(args.tuning.as_deref())?;
    let mut game = Game::new(args.seed, tuning);

    println!("Seed {} generated {} nodes:", args.seed, game.dag().len());
    for node in game.dag().nodes() {
        let requires = if node.required_nodes.is_empty() {
            "-".to_string()
        } else {
            node.required_nodes.join(", ")
        };
        println!(
            "  {:<8} {:<22} difficulty {}  at ({:>6.1}, {:>6.1})  requires {}{}",
            node.id,
            node.name,
            node.difficulty,
            node.position.0,
            node.position.1,
            requires,
            if node.unlocked { "  [unlocked]" } else { "" },
        );
    }

    if args.enter {
        game.enter_node(START_NODE_ID).context("failed to enter the start node")?;
        let node = game.current_node().context("start node has no visit")?;
        let grid = node.grid.as_ref().context("start node has no grid")?;
        let enemies: Vec<_> = node.enemies.values().map(|enemy| enemy.pos).collect();
        println!(
            "\n{} ({} enemies, {} treasures):",
            node.name,
            enemies.len(),
            node.total_treasures
        );
        print!("{}", grid.draw_diag(game.player().map(|player| player.pos), &enemies));
    }
    Ok(())
}
