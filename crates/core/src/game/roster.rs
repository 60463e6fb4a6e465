//! Enemy roster placement for a freshly generated node.
//! This module exists to keep spawn-cell selection and kind rolling out of node entry.
//! It does not own enemy behaviour or the grid generation itself.

use rand_chacha::rand_core::Rng;

use crate::config::Tuning;
use crate::content::enemy_pool;
use crate::roll::choose;
use crate::state::{Enemy, Grid};
use crate::types::*;

/// Places `2 + difficulty` enemies. Random picks among well-connected Empty cells
/// are tried first and must keep their distance from `player_start`; a row-major
/// interior sweep covers whatever those picks could not place.
pub(super) fn place_roster<R: Rng + ?Sized>(
    grid: &Grid,
    player_start: Option<Pos>,
    difficulty: u8,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<Enemy> {
    let count = 2 + usize::from(difficulty);
    let candidates: Vec<Pos> = grid
        .positions()
        .filter(|pos| grid.cell(*pos) == CellKind::Empty && grid.empty_neighbor_count(*pos) >= 2)
        .collect();

    let mut roster: Vec<Enemy> = Vec::with_capacity(count);
    let mut boss_placed = false;
    for _ in 0..count {
        let occupied: Vec<Pos> = roster.iter().map(|enemy| enemy.pos).collect();
        let spot = pick_spread_cell(&candidates, player_start, &occupied, tuning, rng)
            .or_else(|| sweep_interior(grid, player_start, &occupied));
        let Some(pos) = spot else {
            log::debug!("no free cell left for enemy {} of {count}", roster.len() + 1);
            continue;
        };
        let kind = roll_kind(difficulty, &mut boss_placed, rng);
        roster.push(Enemy::spawn(kind, difficulty, pos, tuning, rng));
    }
    roster
}

fn pick_spread_cell<R: Rng + ?Sized>(
    candidates: &[Pos],
    player_start: Option<Pos>,
    occupied: &[Pos],
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Pos> {
    if candidates.is_empty() {
        return None;
    }
    for _ in 0..tuning.placement_attempts {
        let pos = choose(rng, candidates);
        let far_enough =
            player_start.is_none_or(|start| manhattan(pos, start) >= tuning.min_spawn_distance);
        if far_enough && !occupied.contains(&pos) {
            return Some(pos);
        }
    }
    None
}

fn sweep_interior(grid: &Grid, player_start: Option<Pos>, occupied: &[Pos]) -> Option<Pos> {
    let height = grid.height() as i32;
    let width = grid.width() as i32;
    (1..height - 1)
        .flat_map(|y| (1..width - 1).map(move |x| Pos { y, x }))
        .find(|pos| {
            grid.cell(*pos) == CellKind::Empty
                && grid.empty_neighbor_count(*pos) >= 1
                && Some(*pos) != player_start
                && !occupied.contains(pos)
        })
}

/// At most one boss, and only in difficulty-5 nodes; any other boss roll falls
/// back to a non-boss kind.
fn roll_kind<R: Rng + ?Sized>(difficulty: u8, boss_placed: &mut bool, rng: &mut R) -> EnemyKind {
    let kind = choose(rng, enemy_pool(difficulty));
    if kind != EnemyKind::Boss {
        return kind;
    }
    if *boss_placed || difficulty < 5 {
        return choose(rng, &EnemyKind::NON_BOSS);
    }
    *boss_placed = true;
    kind
}
