use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use crawl_core::{
    AdvanceStopReason, CellKind, Direction, Game, InputJournal, InputPayload, PlayerCommand,
    RunPhase, apply_input,
};
use crawl_tools::{init_logging, load_tuning, write_journal};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    /// JSON file overriding tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Write the inputs this session applied as a replayable journal
    #[arg(long)]
    record: Option<PathBuf>,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn next_input(game: &Game, rng: &mut ChaCha8Rng) -> Option<InputPayload> {
    match game.phase() {
        RunPhase::MapView => {
            let open: Vec<String> = game
                .dag()
                .nodes()
                .filter(|node| node.unlocked && !node.completed)
                .map(|node| node.id.clone())
                .collect();
            if open.is_empty() {
                return None;
            }
            Some(InputPayload::EnterNode { node: choose(rng, &open) })
        }
        RunPhase::Dungeon { .. } => {
            // Bias towards moving so the autopilot actually explores
            let direction = choose(rng, &Direction::ALL);
            let command = choose(
                rng,
                &[
                    PlayerCommand::Move(direction),
                    PlayerCommand::Move(direction),
                    PlayerCommand::Move(direction),
                    PlayerCommand::Shoot(None),
                ],
            );
            Some(InputPayload::Command(command))
        }
        RunPhase::Victory | RunPhase::GameOver => None,
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    if let Some(player) = game.player()
        && !(0..=player.max_health).contains(&player.health)
    {
        bail!("player health {} outside 0..={}", player.health, player.max_health);
    }
    let Some(node) = game.current_node() else {
        return Ok(());
    };
    let Some(grid) = node.grid.as_ref() else {
        bail!("visited node `{}` has no grid", node.id);
    };
    if let Some(player) = game.player()
        && grid.cell(player.pos) == CellKind::Wall
    {
        bail!("player inside a wall at {:?}", player.pos);
    }
    for enemy in node.enemies.values().filter(|enemy| enemy.alive) {
        if grid.cell(enemy.pos) == CellKind::Wall {
            bail!("{} inside a wall at {:?}", enemy.kind.name(), enemy.pos);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let tuning = load_tuning(args.tuning.as_deref())?;

    println!("Starting Fuzz harness on seed {} for max {} ticks...", args.seed, args.ticks);
    let mut game = Game::new(args.seed, tuning.clone());
    let mut journal = InputJournal::new(args.seed, tuning);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_ticks = 0;
    while total_ticks < args.ticks {
        let Some(input) = next_input(&game, &mut rng) else {
            break;
        };
        apply_input(&mut game, &input)
            .map_err(|err| anyhow::anyhow!("fuzz applied an invalid input {input:?}: {err}"))?;
        journal.append(game.current_tick(), input);

        let result = game.advance(10);
        total_ticks += result.simulated_ticks;
        match result.stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                println!("Finished with outcome {outcome:?} after {total_ticks} ticks");
                break;
            }
            AdvanceStopReason::NodeCompleted { node } => {
                println!("Completed `{node}` at tick {}", game.current_tick());
            }
            AdvanceStopReason::NotInDungeon | AdvanceStopReason::BudgetExhausted => {}
        }
        check_invariants(&game)?;
    }

    if let Some(path) = &args.record {
        write_journal(path, &journal)?;
        println!("Journal with {} inputs written to {}", journal.inputs.len(), path.display());
    }
    println!("Fuzzing completed successfully. Snapshot hash: {}", game.snapshot_hash());
    Ok(())
}
