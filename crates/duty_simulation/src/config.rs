//! Top-level simulation configuration.
//!
//! Plain serde structs with tuned defaults. A host can insert its own
//! `SimulationConfig` resource before adding `SimulationPlugin`; otherwise
//! defaults are used.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::EnemyConfig;
use crate::combat::WeaponStats;
use crate::level::LevelLayout;
use crate::player::PlayerConfig;
use crate::waves::WaveConfig;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed of the simulation RNG (spread, spawn points, replacement rolls)
    pub seed: u64,
    /// FixedUpdate rate when driven by `SimulationPlugin`
    pub tick_rate_hz: f64,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub weapon: WeaponStats,
    pub waves: WaveConfig,
    /// None = no level loaded (no static geometry, fallback spawn points)
    pub level: Option<LevelLayout>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_rate_hz: 60.0,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            weapon: WeaponStats::default(),
            waves: WaveConfig::default(),
            level: Some(LevelLayout::default()),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
