//! Tunable numbers for the simulation and the progression map layout.
//! This module exists so balance constants live in one serializable place.
//! It does not own static content tables such as enemy stats or node names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dungeon_width: usize,
    pub dungeon_height: usize,
    pub detection_range: u32,
    pub patrol_range: u32,
    pub move_cooldown: u32,
    pub melee_cooldown: u32,
    pub ranged_cooldown: u32,
    pub patrol_turn_chance_percent: u32,
    pub patrol_min_steps: u32,
    pub patrol_max_steps: u32,
    pub cell_size: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    pub player_projectile_damage: i32,
    pub enemy_projectile_damage: i32,
    pub kill_experience: u32,
    pub treasure_heal: i32,
    pub treasure_experience: u32,
    pub player_max_health: i32,
    pub level_up_health_bonus: i32,
    pub experience_per_level: u32,
    pub min_spawn_distance: u32,
    pub placement_attempts: u32,
    pub layout: LayoutConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dungeon_width: 25,
            dungeon_height: 20,
            detection_range: 8,
            patrol_range: 3,
            move_cooldown: 30,
            melee_cooldown: 30,
            ranged_cooldown: 60,
            patrol_turn_chance_percent: 10,
            patrol_min_steps: 3,
            patrol_max_steps: 6,
            cell_size: 25.0,
            player_projectile_speed: 5.0,
            enemy_projectile_speed: 3.0,
            player_projectile_damage: 20,
            enemy_projectile_damage: 20,
            kill_experience: 25,
            treasure_heal: 20,
            treasure_experience: 10,
            player_max_health: 100,
            level_up_health_bonus: 15,
            experience_per_level: 100,
            min_spawn_distance: 5,
            placement_attempts: 50,
            layout: LayoutConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

impl Tuning {
    /// Parses and validates a tuning file. Missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(raw)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Level threshold must be non-zero, the patrol step range ordered and the
    /// cell size positive.
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |message: String| Err(TuningError::Invalid(message));
        if self.experience_per_level == 0 {
            return invalid("experience_per_level must be at least 1".to_string());
        }
        if self.patrol_min_steps > self.patrol_max_steps {
            return invalid(format!(
                "patrol_min_steps {} exceeds patrol_max_steps {}",
                self.patrol_min_steps, self.patrol_max_steps
            ));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return invalid(format!("cell_size {} must be positive", self.cell_size));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub top_offset: f32,
    pub reserved_height: f32,
    pub spread_margin: f32,
    pub refined_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 768.0,
            top_offset: 200.0,
            reserved_height: 250.0,
            spread_margin: 150.0,
            refined_margin: 120.0,
        }
    }
}
