//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::state::{Enemy, Grid, Projectile};

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.log.len() as u64);
        match &self.state.phase {
            RunPhase::MapView => hasher.write_u8(0),
            RunPhase::Dungeon { node } => {
                hasher.write_u8(1);
                hasher.write(node.as_bytes());
            }
            RunPhase::Victory => hasher.write_u8(2),
            RunPhase::GameOver => hasher.write_u8(3),
        }

        if let Some(player) = &self.state.player {
            hasher.write_i32(player.pos.x);
            hasher.write_i32(player.pos.y);
            hasher.write_i32(player.health);
            hasher.write_i32(player.max_health);
            hasher.write_u32(player.level);
            hasher.write_u32(player.experience);
        }
        if let Some(visit) = &self.state.visit {
            hasher.write_u8(visit.facing as u8);
            for shot in visit.player_projectiles.iter().chain(&visit.enemy_projectiles) {
                hash_projectile(&mut hasher, shot);
            }
        }

        for node in self.state.dag.nodes() {
            hasher.write(node.id.as_bytes());
            hasher.write_u8(u8::from(node.unlocked) | (u8::from(node.completed) << 1));
            hasher.write_u32(node.treasures_collected);
            hasher.write_u32(node.total_treasures);
            if let Some(grid) = &node.grid {
                hash_grid(&mut hasher, grid);
            }
            for enemy in node.enemies.values() {
                hash_enemy(&mut hasher, enemy);
            }
        }
        hasher.finish()
    }
}

fn hash_grid(hasher: &mut Xxh3, grid: &Grid) {
    hasher.write_usize(grid.width());
    hasher.write_usize(grid.height());
    for pos in grid.positions() {
        hasher.write_u8(grid.cell(pos) as u8);
    }
}

fn hash_enemy(hasher: &mut Xxh3, enemy: &Enemy) {
    hasher.write_u8(enemy.kind as u8);
    hasher.write_u8(u8::from(enemy.alive));
    hasher.write_i32(enemy.pos.x);
    hasher.write_i32(enemy.pos.y);
    hasher.write_i32(enemy.health);
    hasher.write_u32(enemy.move_timer);
    hasher.write_u32(enemy.attack_timer);
    hasher.write_u8(enemy.patrol.heading as u8);
    hasher.write_u32(enemy.patrol.steps_taken);
}

fn hash_projectile(hasher: &mut Xxh3, shot: &Projectile) {
    for value in [shot.x, shot.y, shot.dx, shot.dy] {
        hasher.write_u32(value.to_bits());
    }
    hasher.write_u8(u8::from(shot.owner.is_some()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn identical_runs_hash_identically_and_diverge_on_input() {
        let play = |moves: &[Direction]| {
            let mut game = diamond_game(&OPEN_ROOM);
            game.enter_node(START_NODE_ID).unwrap();
            for direction in moves {
                game.apply_command(PlayerCommand::Move(*direction)).unwrap();
                game.advance(7);
            }
            game.snapshot_hash()
        };
        let route = [Direction::Right, Direction::Down, Direction::Right];
        assert_eq!(play(&route), play(&route));
        assert_ne!(play(&route), play(&[Direction::Down, Direction::Down, Direction::Right]));
    }
}
