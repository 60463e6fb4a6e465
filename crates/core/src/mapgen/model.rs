//! Public data model for a generated dungeon.

use crate::state::Grid;
use crate::types::{CellKind, Pos};

use super::layout::RoomRect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    pub total_treasures: u32,
    pub rooms: Vec<RoomRect>,
    pub exit: Option<Pos>,
}

impl GeneratedDungeon {
    /// Wraps a hand-made grid, counting its treasures.
    pub fn from_grid(grid: Grid) -> Self {
        let total_treasures = grid.count(CellKind::Treasure) as u32;
        let exit = grid.positions().find(|pos| grid.cell(*pos) == CellKind::Exit);
        Self { grid, total_treasures, rooms: Vec::new(), exit }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for pos in self.grid.positions() {
            bytes.push(match self.grid.cell(pos) {
                CellKind::Empty => 0,
                CellKind::Wall => 1,
                CellKind::Treasure => 2,
                CellKind::Exit => 3,
                CellKind::PlayerMarker | CellKind::EnemyMarker => 4,
            });
        }
        bytes.extend(self.total_treasures.to_le_bytes());
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }
        bytes
    }
}
