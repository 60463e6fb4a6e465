//! Default room-and-corridor dungeon source.

use rand_chacha::ChaCha8Rng;

use crate::state::Grid;
use crate::types::CellKind;

use super::DungeonSource;
use super::layout::{carve_corridors, carve_room, roll_rooms};
use super::model::GeneratedDungeon;
use super::placement::{place_exit, place_treasures};

/// `3 + difficulty` rooms joined in roll order, `2 + difficulty` treasures and an
/// exit in the last room.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomsAndCorridors;

impl DungeonSource for RoomsAndCorridors {
    fn generate(
        &self,
        width: usize,
        height: usize,
        difficulty: u8,
        rng: &mut ChaCha8Rng,
    ) -> GeneratedDungeon {
        let mut grid = Grid::filled(width, height, CellKind::Wall);
        let rooms = roll_rooms(rng, width, height, 3 + usize::from(difficulty));
        for room in &rooms {
            carve_room(&mut grid, room);
        }
        carve_corridors(&mut grid, &rooms);

        let target = 2 + usize::from(difficulty);
        let placed = place_treasures(&mut grid, &rooms, target, rng);
        let exit = place_exit(&mut grid, &rooms);

        // The exit may land on a treasure, so count what is actually left.
        let total_treasures = grid.count(CellKind::Treasure) as u32;
        log::debug!(
            "generated {width}x{height} dungeon: {} rooms, {placed}/{target} treasures placed, {total_treasures} kept",
            rooms.len()
        );
        GeneratedDungeon { grid, total_treasures, rooms, exit }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::types::{Direction, Pos};

    fn reachable_from(grid: &Grid, start: Pos) -> BTreeSet<Pos> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for dir in Direction::ALL {
                let next = pos.step(dir);
                if grid.is_passable(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn generated_dungeons_are_connected_with_one_exit() {
        for seed in 0..40 {
            for difficulty in 1..=5 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let dungeon = RoomsAndCorridors.generate(25, 20, difficulty, &mut rng);
                let grid = &dungeon.grid;
                assert_eq!(grid.count(CellKind::Exit), 1, "seed {seed} difficulty {difficulty}");
                assert_eq!(dungeon.total_treasures as usize, grid.count(CellKind::Treasure));

                let start = grid.first_empty().expect("dungeon must contain floor");
                let reachable = reachable_from(grid, start);
                for pos in grid.positions() {
                    if grid.is_passable(pos) {
                        assert!(reachable.contains(&pos), "seed {seed}: {pos:?} is cut off");
                    }
                }
            }
        }
    }

    #[test]
    fn border_is_never_carved() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let dungeon = RoomsAndCorridors.generate(25, 20, 5, &mut rng);
        for pos in dungeon.grid.positions() {
            let on_border = pos.x == 0 || pos.y == 0 || pos.x == 24 || pos.y == 19;
            if on_border {
                assert_eq!(dungeon.grid.cell(pos), CellKind::Wall, "{pos:?}");
            }
        }
    }
}
