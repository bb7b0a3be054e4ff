//! Player tuning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// m/s
    pub walk_speed: f32,
    /// m/s while run is held
    pub run_speed: f32,
    /// Initial vertical speed of a jump (m/s)
    pub jump_speed: f32,
    /// m/s², negative is down
    pub gravity: f32,
    /// Eye height the player rests at
    pub ground_height: f32,
    pub radius: f32,
    pub max_health: u32,
    /// Further damage ignored for this long after a hit (seconds)
    pub damage_immunity: f64,
    /// Pitch is clamped to ±this (radians)
    pub max_pitch: f32,
    /// Extra clearance when pushed out of static geometry
    pub obstacle_push_margin: f32,
    /// Extra clearance when pushed away from an enemy
    pub enemy_push_margin: f32,
    /// Shots are aimed this much below the camera forward (Y offset before renormalising)
    pub aim_drop: f32,
    /// Seconds the damage flash stays visible
    pub damage_flash_duration: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 8.0,
            jump_speed: 8.0,
            gravity: -20.0,
            ground_height: 1.8,
            radius: 0.4,
            max_health: 100,
            damage_immunity: 0.5,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.1,
            obstacle_push_margin: 0.2,
            enemy_push_margin: 0.1,
            aim_drop: 0.02,
            damage_flash_duration: 0.2,
        }
    }
}
