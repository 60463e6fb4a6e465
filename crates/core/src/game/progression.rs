//! Phase transitions between the map view and dungeon visits.
//! This module exists to own node entry, completion, leaving and the two run outcomes.
//! It does not own per-tick simulation or the unlock rule itself.

use super::roster::place_roster;
use super::*;
use crate::state::Grid;

impl Game {
    /// Starts a visit to an unlocked node. The first visit generates the grid and
    /// places the roster; later visits keep both and drop the dead. The player
    /// lands on the first Empty cell not held by a living enemy.
    pub fn enter_node(&mut self, id: &str) -> Result<(), GameError> {
        if self.state.phase != RunPhase::MapView {
            return Err(GameError::NotOnMap);
        }
        let node =
            self.state.dag.node_mut(id).ok_or_else(|| GameError::UnknownNode(id.to_string()))?;
        if !node.unlocked {
            return Err(GameError::NodeLocked(id.to_string()));
        }

        let first_visit = node.grid.is_none();
        if first_visit {
            let dungeon = self.source.generate(
                self.tuning.dungeon_width,
                self.tuning.dungeon_height,
                node.difficulty,
                &mut self.rng,
            );
            let spawn = dungeon.grid.first_empty();
            let roster =
                place_roster(&dungeon.grid, spawn, node.difficulty, &self.tuning, &mut self.rng);
            node.enemies.clear();
            for enemy in roster {
                node.enemies.insert(enemy);
            }
            node.enemy_count = node.enemies.len();
            node.total_treasures = dungeon.total_treasures;
            node.treasures_collected = 0;
            node.grid = Some(dungeon.grid);
            log::debug!(
                "node `{id}` generated with {} enemies and {} treasures",
                node.enemy_count,
                node.total_treasures
            );
        } else {
            node.enemies.retain(|_, enemy| enemy.alive);
        }

        let occupied: Vec<Pos> =
            node.enemies.values().filter(|enemy| enemy.alive).map(|enemy| enemy.pos).collect();
        let spawn = node
            .grid
            .as_ref()
            .and_then(|grid| spawn_cell(grid, &occupied))
            .ok_or_else(|| GameError::NoSpawnCell(id.to_string()))?;
        match self.state.player.as_mut() {
            Some(player) => player.pos = spawn,
            None => {
                self.state.player = Some(Player::new(spawn, self.tuning.player_max_health));
            }
        }
        self.state.visit = Some(Visit::new(id));
        self.state.phase = RunPhase::Dungeon { node: id.to_string() };
        self.log.push(LogEvent::NodeEntered { node: id.to_string(), first_visit });
        log::info!("entered node `{id}` at tick {} (first visit: {first_visit})", self.tick);
        Ok(())
    }

    /// Leaves the Victory screen for the map. The run stays finished; every node
    /// is already completed.
    pub fn return_to_map(&mut self) -> Result<(), GameError> {
        if self.state.phase != RunPhase::Victory {
            return Err(GameError::NotFinished);
        }
        self.state.phase = RunPhase::MapView;
        Ok(())
    }

    pub(super) fn leave_visit(&mut self) -> Result<(), GameError> {
        let visit = self.state.visit.take().ok_or(GameError::NotInDungeon)?;
        self.state.phase = RunPhase::MapView;
        log::info!("left node `{}` at tick {}", visit.node, self.tick);
        self.log.push(LogEvent::NodeLeft { node: visit.node });
        Ok(())
    }

    /// Marks the visited node completed, propagates unlocks and picks the next phase.
    pub(super) fn complete_visit(&mut self, id: &str) -> AdvanceStopReason {
        if let Err(err) = self.state.dag.mark_completed(id) {
            log::warn!("completion of a missing node: {err}");
        }
        self.log.push(LogEvent::NodeCompleted { node: id.to_string() });
        for unlocked in self.state.dag.update_unlocked_nodes() {
            log::info!("node `{unlocked}` unlocked");
            self.log.push(LogEvent::NodeUnlocked { node: unlocked });
        }
        self.state.visit = None;

        if self.state.dag.all_completed() {
            self.state.phase = RunPhase::Victory;
            self.log.push(LogEvent::RunFinished(RunOutcome::Victory));
            log::info!("run won at tick {}", self.tick);
            return AdvanceStopReason::Finished(RunOutcome::Victory);
        }
        self.state.phase = RunPhase::MapView;
        AdvanceStopReason::NodeCompleted { node: id.to_string() }
    }

    pub(super) fn record_defeat(&mut self) -> AdvanceStopReason {
        self.state.visit = None;
        self.state.phase = RunPhase::GameOver;
        self.log.push(LogEvent::RunFinished(RunOutcome::Defeat));
        log::info!("run lost at tick {}", self.tick);
        AdvanceStopReason::Finished(RunOutcome::Defeat)
    }
}

/// First Empty cell in row-major order outside `occupied`.
fn spawn_cell(grid: &Grid, occupied: &[Pos]) -> Option<Pos> {
    grid.positions().find(|pos| grid.cell(*pos) == CellKind::Empty && !occupied.contains(pos))
}
