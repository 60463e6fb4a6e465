//! Treasure and exit placement inside carved rooms.

use rand_chacha::rand_core::Rng;

use crate::roll::roll_range;
use crate::state::Grid;
use crate::types::{CellKind, Pos};

use super::layout::RoomRect;

const TRIES_PER_ROOM: u32 = 10;

/// Places up to `target` treasures on room interiors: at most one random pick per
/// room first, then a row-by-row sweep of the interiors. Returns how many landed.
pub(super) fn place_treasures<R: Rng + ?Sized>(
    grid: &mut Grid,
    rooms: &[RoomRect],
    target: usize,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for room in rooms {
        if placed >= target {
            break;
        }
        if room.width < 3 || room.height < 3 {
            continue;
        }
        for _ in 0..TRIES_PER_ROOM {
            let x = roll_range(rng, (room.x + 1) as u32, (room.x + room.width - 2) as u32);
            let y = roll_range(rng, (room.y + 1) as u32, (room.y + room.height - 2) as u32);
            let pos = Pos { y: y as i32, x: x as i32 };
            if grid.cell(pos) == CellKind::Empty {
                grid.set_cell(pos, CellKind::Treasure);
                placed += 1;
                break;
            }
        }
    }

    for room in rooms {
        for pos in room.inner() {
            if placed >= target {
                return placed;
            }
            if grid.cell(pos) == CellKind::Empty {
                grid.set_cell(pos, CellKind::Treasure);
                placed += 1;
            }
        }
    }
    placed
}

/// The exit sits one cell in from the bottom-right corner of the last room.
pub(super) fn place_exit(grid: &mut Grid, rooms: &[RoomRect]) -> Option<Pos> {
    let last = rooms.last()?;
    let exit = Pos { y: (last.y + last.height - 2) as i32, x: (last.x + last.width - 2) as i32 };
    grid.set_cell(exit, CellKind::Exit);
    Some(exit)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::super::layout::carve_room;
    use super::*;

    #[test]
    fn sweep_fills_the_shortfall_when_random_picks_run_out() {
        let mut grid = Grid::filled(10, 10, CellKind::Wall);
        let room = RoomRect { x: 1, y: 1, width: 4, height: 4 };
        carve_room(&mut grid, &room);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(place_treasures(&mut grid, &[room], 4, &mut rng), 4);
        assert_eq!(grid.count(CellKind::Treasure), 4);
        assert!(room.inner().all(|pos| grid.cell(pos) == CellKind::Treasure));
    }

    #[test]
    fn treasures_stop_when_room_interiors_are_full() {
        let mut grid = Grid::filled(10, 10, CellKind::Wall);
        let room = RoomRect { x: 1, y: 1, width: 4, height: 4 };
        carve_room(&mut grid, &room);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(place_treasures(&mut grid, &[room], 9, &mut rng), 4);
    }

    #[test]
    fn exit_lands_inside_the_last_room() {
        let mut grid = Grid::filled(12, 12, CellKind::Wall);
        let rooms =
            [RoomRect { x: 1, y: 1, width: 4, height: 4 }, RoomRect { x: 5, y: 5, width: 5, height: 6 }];
        assert_eq!(place_exit(&mut grid, &rooms), Some(Pos { y: 9, x: 8 }));
        assert_eq!(grid.cell(Pos { y: 9, x: 8 }), CellKind::Exit);
        assert_eq!(place_exit(&mut grid, &[]), None);
    }
}
