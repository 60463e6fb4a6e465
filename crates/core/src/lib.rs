pub mod config;
pub mod content;
pub mod dag;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod roll;
pub mod state;
pub mod types;

pub use config::{LayoutConfig, Tuning, TuningError};
pub use dag::{DungeonNode, ProgressionDag};
pub use game::{Game, find_path, has_line_of_sight};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use mapgen::{DungeonSource, GeneratedDungeon, RoomsAndCorridors};
pub use replay::*;
pub use state::{Enemy, GameState, Grid, Player, Projectile, Visit};
pub use types::*;
