//! Run orchestration over the progression graph, the player and the active visit.
//! This module exists to own the seeded generator, the event log and the phase
//! machine that moves between the map view and dungeon visits.

use rand_chacha::ChaCha8Rng;

use crate::config::Tuning;
use crate::dag::{DungeonNode, ProgressionDag};
use crate::mapgen::DungeonSource;
use crate::state::{GameState, Player, Visit};
use crate::types::*;

mod bootstrap;
mod combat;
mod commands;
mod enemy_ai;
mod engine;
mod hash;
mod pathfinding;
mod progression;
mod roster;
mod visibility;

#[cfg(test)]
mod test_support;

pub use pathfinding::find_path;
pub use visibility::has_line_of_sight;

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    tuning: Tuning,
    source: Box<dyn DungeonSource>,
    state: GameState,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> &RunPhase {
        &self.state.phase
    }

    pub fn dag(&self) -> &ProgressionDag {
        &self.state.dag
    }

    pub fn player(&self) -> Option<&Player> {
        self.state.player.as_ref()
    }

    pub fn visit(&self) -> Option<&Visit> {
        self.state.visit.as_ref()
    }

    pub fn current_node(&self) -> Option<&DungeonNode> {
        self.state.visit.as_ref().and_then(|visit| self.state.dag.node(&visit.node))
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
