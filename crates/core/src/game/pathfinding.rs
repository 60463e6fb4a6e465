//! Grid A* used by chasing enemies.
//! This module exists so shortest-path rules stay reusable and deterministic.
//! It does not own movement decisions or collision with other actors.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::Grid;
use crate::types::{Direction, Pos, manhattan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    seq: u64,
    y: i32,
    x: i32,
}

/// Shortest 4-connected path from `start` to `goal`, excluding `start` and
/// including `goal`. Empty when the goal is the start or cannot be reached.
/// Neighbours expand Down, Up, Right, Left and equal f-scores pop in insertion order.
pub fn find_path(grid: &Grid, start: Pos, goal: Pos) -> Vec<Pos> {
    if start == goal || !grid.is_passable(goal) {
        return Vec::new();
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::from([(start, 0_u32)]);
    let mut came_from = BTreeMap::new();
    let mut seq = 0_u64;
    open_set.insert(OpenNode { f: manhattan(start, goal), seq, y: start.y, x: start.x });

    while let Some(current) = open_set.pop_first() {
        let pos = Pos { y: current.y, x: current.x };
        if pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&current_g) = g_score.get(&pos) else {
            continue;
        };
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if !grid.is_passable(next) {
                continue;
            }
            let tentative = current_g + 1;
            if g_score.get(&next).is_none_or(|&known| tentative < known) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative);
                seq += 1;
                let f = tentative + manhattan(next, goal);
                open_set.insert(OpenNode { f, seq, y: next.y, x: next.x });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut pos = goal;
    while let Some(&previous) = came_from.get(&pos) {
        if previous == start {
            path.reverse();
            return path;
        }
        path.push(previous);
        pos = previous;
    }
    Vec::new()
}
