use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct EnemyId;
}

pub const START_NODE_ID: &str = "start";
pub const BOSS_NODE_ID: &str = "boss";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Cardinal step directions, listed in the order the pathfinder expands them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    /// Returns `(dx, dy)` with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Wall,
    Treasure,
    Exit,
    /// Presentation overlay only, never stored in a grid.
    PlayerMarker,
    /// Presentation overlay only, never stored in a grid.
    EnemyMarker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Archer,
    Mage,
    Boss,
}

impl EnemyKind {
    pub const NON_BOSS: [EnemyKind; 4] =
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Archer, EnemyKind::Mage];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::Orc => "orc",
            EnemyKind::Archer => "archer",
            EnemyKind::Mage => "mage",
            EnemyKind::Boss => "boss",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    Chase,
    Avoid,
    Patrol,
    Unstuck,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunPhase {
    MapView,
    Dungeon { node: String },
    Victory,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Move(Direction),
    /// Fires along the given direction, or the current facing when `None`.
    Shoot(Option<Direction>),
    Leave,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    NodeCompleted { node: String },
    Finished(RunOutcome),
    NotInDungeon,
    BudgetExhausted,
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Melee(EnemyId),
    Projectile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    NodeEntered { node: String, first_visit: bool },
    NodeLeft { node: String },
    NodeCompleted { node: String },
    NodeUnlocked { node: String },
    TreasureCollected { pos: Pos },
    ProjectileFired { from: Pos, enemy: Option<EnemyId> },
    PlayerDamaged { amount: i32, source: DamageSource, remaining: i32 },
    PlayerLeveledUp { level: u32 },
    EnemySlain { enemy: EnemyId, kind: EnemyKind },
    RunFinished(RunOutcome),
    RunRestarted,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unknown dungeon node `{0}`")]
    UnknownNode(String),
    #[error("dungeon node `{0}` is still locked")]
    NodeLocked(String),
    #[error("dungeon nodes can only be entered from the map view")]
    NotOnMap,
    #[error("no dungeon visit is active")]
    NotInDungeon,
    #[error("the run has not been won")]
    NotFinished,
    #[error("dungeon node `{0}` has no empty cell to spawn on")]
    NoSpawnCell(String),
}
