//! Room rolling and corridor carving for the base dungeon topology.

use rand_chacha::rand_core::Rng;

use crate::roll::roll_range;
use crate::state::Grid;
use crate::types::{CellKind, Pos};

const MIN_ROOM_SIDE: u32 = 4;
const MAX_ROOM_SIDE: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }

    /// Interior cells, excluding the room's outer ring.
    pub fn inner(self) -> impl Iterator<Item = Pos> {
        (self.y + 1..self.y + self.height.saturating_sub(1)).flat_map(move |y| {
            (self.x + 1..self.x + self.width.saturating_sub(1))
                .map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }
}

/// Rolls rooms anywhere inside the border. Rooms may overlap.
pub(super) fn roll_rooms<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    count: usize,
) -> Vec<RoomRect> {
    let max_width = MAX_ROOM_SIDE.min(width.saturating_sub(2) as u32);
    let max_height = MAX_ROOM_SIDE.min(height.saturating_sub(2) as u32);
    if max_width < MIN_ROOM_SIDE || max_height < MIN_ROOM_SIDE {
        return Vec::new();
    }

    let mut rooms = Vec::with_capacity(count);
    for _ in 0..count {
        let room_width = roll_range(rng, MIN_ROOM_SIDE, max_width) as usize;
        let room_height = roll_range(rng, MIN_ROOM_SIDE, max_height) as usize;
        let x = roll_range(rng, 1, (width - room_width - 1) as u32) as usize;
        let y = roll_range(rng, 1, (height - room_height - 1) as u32) as usize;
        rooms.push(RoomRect { x, y, width: room_width, height: room_height });
    }
    rooms
}

pub(super) fn carve_room(grid: &mut Grid, room: &RoomRect) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            grid.set_cell(Pos { y: y as i32, x: x as i32 }, CellKind::Empty);
        }
    }
}

/// Joins consecutive rooms with an L: along the first room's centre row, then
/// down the second room's centre column.
pub(super) fn carve_corridors(grid: &mut Grid, rooms: &[RoomRect]) {
    for pair in rooms.windows(2) {
        let from = pair[0].center();
        let to = pair[1].center();
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            grid.set_cell(Pos { y: from.y, x }, CellKind::Empty);
        }
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            grid.set_cell(Pos { y, x: to.x }, CellKind::Empty);
        }
    }
}
