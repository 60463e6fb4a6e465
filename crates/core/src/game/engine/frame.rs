//! One dungeon tick over borrowed run state.
//! This module exists so a tick mutates exactly the visited node, the player and
//! the visit, with no other path to the rest of the run.
//! It does not own phase changes; it only reports how the tick ended.

use slotmap::SlotMap;

use super::*;
use crate::game::combat::{AttackOutcome, advance_projectile, resolve_attack};
use crate::game::enemy_ai::take_movement_turn;
use crate::state::{Enemy, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FrameOutcome {
    Continue,
    Defeat,
    Completed,
}

pub(super) struct Frame<'a> {
    grid: &'a mut Grid,
    enemies: &'a mut SlotMap<EnemyId, Enemy>,
    treasures_collected: &'a mut u32,
    total_treasures: u32,
    player: &'a mut Player,
    visit: &'a mut Visit,
    tuning: &'a Tuning,
    rng: &'a mut ChaCha8Rng,
    log: &'a mut Vec<LogEvent>,
}

impl Game {
    /// Lends the visited node to a frame and runs one tick. `None` when the
    /// phase names a node that has no live visit behind it.
    pub(super) fn run_frame(&mut self, id: &str) -> Option<FrameOutcome> {
        let state = &mut self.state;
        let player = state.player.as_mut()?;
        let visit = state.visit.as_mut()?;
        let node = state.dag.node_mut(id)?;
        let grid = node.grid.as_mut()?;
        let frame = Frame {
            grid,
            enemies: &mut node.enemies,
            treasures_collected: &mut node.treasures_collected,
            total_treasures: node.total_treasures,
            player,
            visit,
            tuning: &self.tuning,
            rng: &mut self.rng,
            log: &mut self.log,
        };
        Some(frame.run())
    }
}

impl Frame<'_> {
    pub(super) fn run(mut self) -> FrameOutcome {
        if self.player.is_dead() {
            return FrameOutcome::Defeat;
        }
        if self.enemy_turns() {
            return FrameOutcome::Defeat;
        }
        self.fly_player_projectiles();
        if self.fly_enemy_projectiles() {
            return FrameOutcome::Defeat;
        }
        self.collect_treasure();
        if self.node_cleared() {
            return FrameOutcome::Completed;
        }
        FrameOutcome::Continue
    }

    /// Movement then attack for every living enemy in roster order. Returns true
    /// when a melee hit killed the player.
    fn enemy_turns(&mut self) -> bool {
        let ids: Vec<EnemyId> = self.enemies.keys().collect();
        for id in ids {
            let others: Vec<Pos> = self
                .enemies
                .iter()
                .filter(|(other, enemy)| *other != id && enemy.alive)
                .map(|(_, enemy)| enemy.pos)
                .collect();
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            if !enemy.alive {
                continue;
            }

            take_movement_turn(enemy, self.player.pos, self.grid, &others, self.tuning, self.rng);
            let from = enemy.pos;
            match resolve_attack(id, enemy, self.player.pos, self.grid, self.tuning) {
                AttackOutcome::Idle => {}
                AttackOutcome::Struck { damage } => {
                    if hurt_player(self.player, self.log, damage, DamageSource::Melee(id)) {
                        return true;
                    }
                }
                AttackOutcome::Fired(shot) => {
                    self.log.push(LogEvent::ProjectileFired { from, enemy: Some(id) });
                    self.visit.enemy_projectiles.push(shot);
                }
            }
        }
        false
    }

    fn fly_player_projectiles(&mut self) {
        let cell_size = self.tuning.cell_size;
        for shot in &mut self.visit.player_projectiles {
            advance_projectile(shot, self.grid, cell_size);
            if !shot.active {
                continue;
            }
            let cell = shot.cell(cell_size);
            let Some((id, enemy)) =
                self.enemies.iter_mut().find(|(_, enemy)| enemy.alive && enemy.pos == cell)
            else {
                continue;
            };
            shot.active = false;
            if enemy.take_damage(self.tuning.player_projectile_damage) {
                self.log.push(LogEvent::EnemySlain { enemy: id, kind: enemy.kind });
                log::debug!("{} slain at {:?}", enemy.kind.name(), enemy.pos);
                grant_experience(self.player, self.log, self.tuning.kill_experience, self.tuning);
            }
        }
        self.visit.player_projectiles.retain(|shot| shot.active);
    }

    /// Returns true when a hit killed the player.
    fn fly_enemy_projectiles(&mut self) -> bool {
        let cell_size = self.tuning.cell_size;
        let mut killed = false;
        for shot in &mut self.visit.enemy_projectiles {
            advance_projectile(shot, self.grid, cell_size);
            if !shot.active || shot.cell(cell_size) != self.player.pos {
                continue;
            }
            shot.active = false;
            let damage = self.tuning.enemy_projectile_damage;
            if hurt_player(self.player, self.log, damage, DamageSource::Projectile) {
                killed = true;
                break;
            }
        }
        self.visit.enemy_projectiles.retain(|shot| shot.active);
        killed
    }

    fn collect_treasure(&mut self) {
        let pos = self.player.pos;
        if !self.grid.take_treasure(pos) {
            return;
        }
        *self.treasures_collected += 1;
        self.player.heal(self.tuning.treasure_heal);
        self.log.push(LogEvent::TreasureCollected { pos });
        grant_experience(self.player, self.log, self.tuning.treasure_experience, self.tuning);
    }

    fn node_cleared(&self) -> bool {
        *self.treasures_collected >= self.total_treasures
            && self.enemies.values().all(|enemy| !enemy.alive)
            && self.grid.cell(self.player.pos) == CellKind::Exit
    }
}

fn hurt_player(player: &mut Player, log: &mut Vec<LogEvent>, amount: i32, source: DamageSource) -> bool {
    let died = player.take_damage(amount);
    log.push(LogEvent::PlayerDamaged { amount, source, remaining: player.health });
    died
}

fn grant_experience(player: &mut Player, log: &mut Vec<LogEvent>, amount: u32, tuning: &Tuning) {
    let start_level = player.level;
    let gained = player.gain_experience(amount, tuning);
    for level in (start_level + 1)..=(start_level + gained) {
        log.push(LogEvent::PlayerLeveledUp { level });
    }
}
