//! Simulation events (core → presentation/audio) and input intents (host → core).
//!
//! The core never touches rendering or audio. It pushes `SimulationEvent`s
//! into a `Signals` queue during a tick; the host drains the queue afterwards
//! (the Bevy plugin republishes them as Bevy events).

use bevy::prelude::*;

use crate::components::EnemyId;
use crate::level::BoxKind;
use crate::player::MoveDirection;
use crate::simulation::GamePhase;

/// Sound cue names understood by the audio collaborator.
pub mod sounds {
    pub const GUNSHOT: &str = "gunshot";
    pub const EMPTY_CLICK: &str = "empty_click";
    pub const RELOAD: &str = "reload";
    pub const ENEMY_HIT: &str = "enemy_hit";
    pub const ENEMY_DEATH: &str = "enemy_death";
    pub const PLAYER_HURT: &str = "player_hurt";
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// Fire-and-forget sound
    Sound { name: &'static str, volume: f32 },

    WeaponFired { origin: Vec3, direction: Vec3, ammo: u32 },
    EmptyClick,
    ReloadStarted,
    ReloadFinished { ammo: u32 },

    /// Projectile stopped against static geometry (impact effect)
    ProjectileImpact { point: Vec3, kind: BoxKind },

    EnemySpawned { enemy: EnemyId, position: Vec3, wave: u32 },
    EnemyDamaged { enemy: EnemyId, amount: u32, remaining: u32 },
    /// Health reached zero (death animation starts)
    EnemyDied { enemy: EnemyId, position: Vec3 },
    /// Dead enemy left the live collection and was counted
    EnemyKilled { enemy: EnemyId, total_kills: u32 },

    PlayerDamaged { amount: u32, remaining: u32 },
    /// Game over
    PlayerDied,

    WaveStarted { wave: u32, enemy_count: u32 },
    WaveCompleted { wave: u32 },

    PhaseChanged { phase: GamePhase },
}

/// Outgoing event queue filled during a tick.
#[derive(Debug, Default)]
pub struct Signals {
    queue: Vec<SimulationEvent>,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimulationEvent) {
        self.queue.push(event);
    }

    pub fn sound(&mut self, name: &'static str, volume: f32) {
        self.queue.push(SimulationEvent::Sound { name, volume });
    }

    pub fn drain(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Discrete input from the host (raw device state stays outside the core).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum InputIntent {
    Move { direction: MoveDirection, pressed: bool },
    /// Radians, already scaled by mouse sensitivity
    Look { delta_yaw: f32, delta_pitch: f32 },
    Fire,
    Reload,
    Jump(bool),
    Run(bool),
    TogglePause,
}
