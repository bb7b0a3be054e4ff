//! FSM AI state and tuning for hostile enemies.

use serde::{Deserialize, Serialize};

/// Enemy AI states
///
/// Idle → Chasing → Attacking, Dead from any live state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AIState {
    /// Spawned, target out of detection range
    Idle,

    /// Walking straight at the target
    Chasing,

    /// In range, hitting on cooldown
    Attacking,

    /// Terminal: no AI, no movement, waits for removal
    Dead {
        /// Simulation time of death (seconds)
        died_at: f64,
    },
}

impl Default for AIState {
    fn default() -> Self {
        Self::Idle
    }
}

impl AIState {
    pub fn is_dead(&self) -> bool {
        matches!(self, AIState::Dead { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            AIState::Idle => "idle",
            AIState::Chasing => "chasing",
            AIState::Attacking => "attacking",
            AIState::Dead { .. } => "dead",
        }
    }

    /// Distance-driven transition for a live state. Dead stays dead.
    ///
    /// `distance` is measured in the XZ plane.
    pub fn next(self, distance: f32, config: &EnemyConfig) -> AIState {
        match self {
            AIState::Idle if distance <= config.detection_range => AIState::Chasing,
            AIState::Chasing if distance <= config.attack_range => AIState::Attacking,
            AIState::Chasing if distance > config.detection_range * config.lose_interest_factor => AIState::Idle,
            AIState::Attacking if distance > config.attack_range => AIState::Chasing,
            other => other,
        }
    }
}

/// Enemy tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub max_health: u32,
    /// Chase speed (m/s)
    pub speed: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    /// Chasing gives up beyond detection_range × this (hysteresis)
    pub lose_interest_factor: f32,
    pub attack_damage: u32,
    /// Seconds between attacks
    pub attack_cooldown: f64,
    pub radius: f32,
    pub height: f32,
    /// Corpse stays this long after removal from the live collection
    pub death_settle_delay: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 50,
            speed: 2.0,
            attack_range: 2.0,
            detection_range: 15.0,
            lose_interest_factor: 1.5, // chase until 22.5m
            attack_damage: 10,
            attack_cooldown: 1.5,
            radius: 0.4,
            height: 1.8,
            death_settle_delay: 1.0,
        }
    }
}
