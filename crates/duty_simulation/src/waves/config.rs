//! Wave and spawn tuning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Live enemy cap
    pub max_enemies: usize,
    /// Wave N spawns base + (N - 1), capped at max_enemies
    pub base_enemies_per_wave: usize,
    /// Seconds between staggered wave spawns
    pub spawn_stagger: f64,
    /// Pause between a completed wave and the next one
    pub next_wave_delay: f64,
    /// Minimum seconds between mid-wave replacement spawns
    pub replacement_cooldown: f64,
    /// Per-tick chance of a replacement once the cooldown has elapsed
    pub replacement_chance: f32,
    /// Spawn points closer than this to the player (XZ) are avoided
    pub min_spawn_distance: f32,
    /// Projectile-vs-enemy sphere radius
    pub hit_radius: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            max_enemies: 8,
            base_enemies_per_wave: 4,
            spawn_stagger: 0.5,
            next_wave_delay: 5.0,
            replacement_cooldown: 3.0,
            replacement_chance: 0.3,
            min_spawn_distance: 8.0,
            hit_radius: 1.2,
        }
    }
}
