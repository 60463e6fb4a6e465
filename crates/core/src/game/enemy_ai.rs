//! Enemy movement decisions: chase, avoidance, unsticking and patrol.
//! This module exists to keep the behaviour state machine testable without a full run.
//! It does not own attacks, projectiles or the order in which enemies act.

use rand_chacha::rand_core::Rng;

use super::pathfinding::find_path;
use crate::config::Tuning;
use crate::roll::{roll_percent, shuffle};
use crate::state::{Enemy, Grid};
use crate::types::*;

/// Runs the movement half of an enemy's turn. `others` holds the cells of every
/// other living enemy. Returns the mode that decided the turn, or `None` while
/// the movement cooldown is still running.
pub(super) fn take_movement_turn<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    player: Pos,
    grid: &Grid,
    others: &[Pos],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<EnemyMode> {
    if enemy.move_timer > 0 {
        enemy.move_timer -= 1;
        return None;
    }
    enemy.move_timer = tuning.move_cooldown;

    if manhattan(enemy.pos, player) > tuning.detection_range {
        patrol(enemy, grid, others, tuning, rng);
        return Some(EnemyMode::Patrol);
    }

    let path = find_path(grid, enemy.pos, player);
    let Some(&next) = path.first() else {
        unstuck(enemy, player, grid, others, rng);
        return Some(EnemyMode::Unstuck);
    };
    if next == player {
        return Some(EnemyMode::Chase);
    }
    if others.contains(&next) {
        avoid(enemy, player, grid, others);
        return Some(EnemyMode::Avoid);
    }
    enemy.pos = next;
    Some(EnemyMode::Chase)
}

fn is_free(grid: &Grid, pos: Pos, player: Pos, others: &[Pos]) -> bool {
    grid.is_passable(pos) && pos != player && !others.contains(&pos)
}

/// Steps to the neighbour closest to the player, first found on ties, and only
/// when that does not increase the distance.
fn avoid(enemy: &mut Enemy, player: Pos, grid: &Grid, others: &[Pos]) {
    let current = manhattan(enemy.pos, player);
    let mut best: Option<(u32, Pos)> = None;
    for direction in Direction::ALL {
        let next = enemy.pos.step(direction);
        if !is_free(grid, next, player, others) {
            continue;
        }
        let distance = manhattan(next, player);
        if best.is_none_or(|(known, _)| distance < known) {
            best = Some((distance, next));
        }
    }
    if let Some((distance, next)) = best
        && distance <= current
    {
        enemy.pos = next;
    }
}

fn unstuck<R: Rng + ?Sized>(enemy: &mut Enemy, player: Pos, grid: &Grid, others: &[Pos], rng: &mut R) {
    let mut directions = Direction::ALL;
    shuffle(rng, &mut directions);
    if let Some(next) = directions
        .into_iter()
        .map(|direction| enemy.pos.step(direction))
        .find(|next| is_free(grid, *next, player, others))
    {
        enemy.pos = next;
    }
}

fn patrol<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    grid: &Grid,
    others: &[Pos],
    tuning: &Tuning,
    rng: &mut R,
) {
    let patrol = &mut enemy.patrol;
    if patrol.steps_taken >= patrol.step_budget
        || roll_percent(rng, tuning.patrol_turn_chance_percent)
    {
        patrol.reroll(tuning, rng);
    }

    let next = enemy.pos.step(patrol.heading);
    let within_range = manhattan(next, patrol.origin) <= tuning.patrol_range;
    if grid.is_passable(next) && within_range && !others.contains(&next) {
        enemy.pos = next;
        patrol.steps_taken += 1;
    } else {
        patrol.turn(rng);
    }
}
