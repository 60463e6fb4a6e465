//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating grid, roster and run setup across many tests.
//! It does not own production gameplay logic.

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::mapgen::GeneratedDungeon;
use crate::state::{Enemy, Grid};

/// Spawn at (1,1), two treasures and an exit in the far corner.
pub(crate) const OPEN_ROOM: [&str; 8] = [
    "############",
    "#..........#",
    "#..........#",
    "#....T.....#",
    "#..........#",
    "#.......T..#",
    "#.........X#",
    "############",
];

pub(crate) const CORRIDOR: [&str; 3] = ["########", "#......#", "########"];

/// Treasure and exit right next to the spawn.
pub(crate) const SHORT_HALL: [&str; 3] = ["######", "#.TX.#", "######"];

/// Hands every node a copy of the same hand-made grid.
pub(crate) struct PresetSource {
    grid: Grid,
}

impl PresetSource {
    pub(crate) fn new(rows: &[&str]) -> Self {
        Self { grid: Grid::from_rows(rows) }
    }
}

impl DungeonSource for PresetSource {
    fn generate(
        &self,
        _width: usize,
        _height: usize,
        _difficulty: u8,
        _rng: &mut ChaCha8Rng,
    ) -> GeneratedDungeon {
        GeneratedDungeon::from_grid(self.grid.clone())
    }
}

/// `start -> {a, b} -> boss`, every node at difficulty 1.
pub(crate) fn diamond_dag() -> ProgressionDag {
    let mut dag = ProgressionDag::new();
    for id in [START_NODE_ID, "a", "b", BOSS_NODE_ID] {
        dag.add_node(DungeonNode::new(id, id, 1));
    }
    dag.add_edge(START_NODE_ID, "a");
    dag.add_edge(START_NODE_ID, "b");
    dag.add_edge("a", BOSS_NODE_ID);
    dag.add_edge("b", BOSS_NODE_ID);
    dag.update_unlocked_nodes();
    dag
}

pub(crate) fn diamond_game(rows: &[&str]) -> Game {
    let mut game = Game::with_source(7, Tuning::default(), Box::new(PresetSource::new(rows)));
    game.state.dag = diamond_dag();
    game
}

/// Enters `id` and removes whatever roster the placement rolled.
pub(crate) fn enter_empty(game: &mut Game, id: &str) {
    game.enter_node(id).expect("node should be enterable");
    clear_roster(game);
}

pub(crate) fn enemy_at(kind: EnemyKind, pos: Pos) -> Enemy {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    Enemy::spawn(kind, 1, pos, &Tuning::default(), &mut rng)
}

pub(crate) fn current_node_mut(game: &mut Game) -> &mut DungeonNode {
    let id = game.state.visit.as_ref().map(|visit| visit.node.clone()).expect("no active visit");
    game.state.dag.node_mut(&id).expect("visited node is registered")
}

pub(crate) fn clear_roster(game: &mut Game) {
    current_node_mut(game).enemies.clear();
}

pub(crate) fn add_enemy(game: &mut Game, kind: EnemyKind, pos: Pos) -> EnemyId {
    current_node_mut(game).enemies.insert(enemy_at(kind, pos))
}

/// An enemy that never takes a movement turn during a test.
pub(crate) fn add_rooted_enemy(game: &mut Game, kind: EnemyKind, pos: Pos) -> EnemyId {
    let id = add_enemy(game, kind, pos);
    current_node_mut(game).enemies[id].move_timer = 1_000_000;
    id
}

pub(crate) fn player_mut(game: &mut Game) -> &mut Player {
    game.state.player.as_mut().expect("player exists after entering a node")
}
