use crate::types::EnemyKind;

pub const START_NODE_NAME: &str = "Entrance Hall";

pub struct Theme {
    pub name: &'static str,
    pub node_names: [&'static str; 5],
}

pub const THEMES: [Theme; 6] = [
    Theme {
        name: "Cave",
        node_names: ["Dark Cave", "Crystal Cave", "Shadow Cave", "Ice Cave", "Lava Cave"],
    },
    Theme {
        name: "Temple",
        node_names: [
            "Ancient Temple",
            "Sacred Chamber",
            "Mystic Shrine",
            "Lost Temple",
            "Forbidden Sanctum",
        ],
    },
    Theme {
        name: "Fortress",
        node_names: ["Goblin Fortress", "Orc Keep", "Bandit Stronghold", "Ruined Fort", "Stone Citadel"],
    },
    Theme {
        name: "Underground",
        node_names: [
            "Underground Lake",
            "Sunken Ruins",
            "Flooded Cavern",
            "Deep Tunnels",
            "Forgotten Depths",
        ],
    },
    Theme {
        name: "Forest",
        node_names: ["Enchanted Grove", "Dark Forest", "Twisted Woods", "Elder Tree", "Fairy Ring"],
    },
    Theme {
        name: "Desert",
        node_names: ["Sand Tomb", "Mirage Palace", "Scorching Dunes", "Oasis Temple", "Pyramid Chamber"],
    },
];

pub const BOSS_NODE_NAMES: [&str; 5] =
    ["Dragon's Lair", "Demon King's Throne", "Ancient Evil", "Dark Lord's Chamber", "Final Boss"];

/// Inclusive stat ranges rolled once when an enemy is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyProfile {
    pub health: (u32, u32),
    pub damage: (u32, u32),
    pub ranged: bool,
    pub attack_range: u32,
}

pub fn enemy_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Goblin => {
            EnemyProfile { health: (20, 30), damage: (15, 20), ranged: false, attack_range: 1 }
        }
        EnemyKind::Orc => {
            EnemyProfile { health: (40, 60), damage: (25, 35), ranged: false, attack_range: 1 }
        }
        EnemyKind::Archer => {
            EnemyProfile { health: (20, 20), damage: (20, 30), ranged: true, attack_range: 6 }
        }
        EnemyKind::Mage => {
            EnemyProfile { health: (40, 40), damage: (30, 45), ranged: true, attack_range: 8 }
        }
        EnemyKind::Boss => {
            EnemyProfile { health: (100, 100), damage: (40, 60), ranged: true, attack_range: 10 }
        }
    }
}

/// Enemy kinds that may spawn in a node of the given difficulty.
pub fn enemy_pool(difficulty: u8) -> &'static [EnemyKind] {
    match difficulty {
        0 | 1 => &[EnemyKind::Goblin],
        2 => &[EnemyKind::Goblin, EnemyKind::Orc],
        3 => &[EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Archer],
        4 => &[EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Archer, EnemyKind::Mage],
        _ => &[EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Archer, EnemyKind::Mage, EnemyKind::Boss],
    }
}
