//! Construction of a fresh run.
//! This module exists to isolate generator seeding and graph creation from the
//! runtime phase machine.

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::dag::generation::generate_dag;
use crate::mapgen::RoomsAndCorridors;

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_source(seed, tuning, Box::new(RoomsAndCorridors))
    }

    pub fn with_source(seed: u64, tuning: Tuning, source: Box<dyn DungeonSource>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dag = generate_dag(&mut rng, &tuning.layout);
        log::info!("new run seeded with {seed}: {} dungeon nodes", dag.len());
        Self { seed, tick: 0, rng, tuning, source, state: fresh_state(dag), log: Vec::new() }
    }

    /// Throws away the graph and the player and rolls a new graph from the same stream.
    pub fn restart(&mut self) {
        let dag = generate_dag(&mut self.rng, &self.tuning.layout);
        self.state = fresh_state(dag);
        self.log.push(LogEvent::RunRestarted);
        log::info!("run restarted at tick {}", self.tick);
    }
}

fn fresh_state(dag: ProgressionDag) -> GameState {
    GameState { phase: RunPhase::MapView, dag, player: None, visit: None }
}
