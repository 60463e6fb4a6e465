//! Dungeon layout generation behind a small source trait.
//! This module exists so the simulation only depends on a finished grid and its
//! treasure count, whatever produced them.

use rand_chacha::ChaCha8Rng;

pub mod model;

mod generator;
mod layout;
mod placement;

pub use generator::RoomsAndCorridors;
pub use layout::RoomRect;
pub use model::GeneratedDungeon;

/// Produces the grid for a node on its first visit. Implementations may assume
/// `width` and `height` leave room for a one-cell border.
pub trait DungeonSource {
    fn generate(
        &self,
        width: usize,
        height: usize,
        difficulty: u8,
        rng: &mut ChaCha8Rng,
    ) -> GeneratedDungeon;
}

pub fn generate_dungeon(
    width: usize,
    height: usize,
    difficulty: u8,
    rng: &mut ChaCha8Rng,
) -> GeneratedDungeon {
    RoomsAndCorridors.generate(width, height, difficulty, rng)
}
