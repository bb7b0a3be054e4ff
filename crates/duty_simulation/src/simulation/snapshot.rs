//! Pollable presentation state.
//!
//! Plain data copied out of the simulation once per tick. Positions are
//! `[x, y, z]` arrays so the snapshot serialises without math-crate features.

use serde::{Deserialize, Serialize};

use super::{GamePhase, Simulation};
use crate::ai::AIState;
use crate::components::EnemyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub clock: f64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub weapon: WeaponView,
    pub wave: u32,
    pub wave_in_progress: bool,
    pub enemies_killed: u32,
    pub enemies: Vec<EnemyView>,
    pub corpses: Vec<CorpseView>,
    pub projectiles: Vec<ProjectileView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub health: u32,
    pub max_health: u32,
    pub health_percent: f32,
    pub alive: bool,
    pub on_ground: bool,
    pub damage_flash: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: [f32; 3],
    pub yaw: f32,
    pub state: AIState,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpseView {
    pub id: EnemyId,
    pub position: [f32; 3],
    pub yaw: f32,
    pub died_at: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: [f32; 3],
    pub direction: [f32; 3],
}

impl SimulationSnapshot {
    pub fn capture(simulation: &Simulation) -> Self {
        let player = simulation.player();
        let weapon = player.weapon();
        let manager = simulation.enemy_manager();

        Self {
            tick: simulation.tick_count(),
            clock: simulation.clock(),
            phase: simulation.phase(),
            player: PlayerView {
                position: player.position().to_array(),
                yaw: player.yaw(),
                pitch: player.pitch(),
                health: player.health().current,
                max_health: player.health().max,
                health_percent: player.health_percent(),
                alive: player.is_alive(),
                on_ground: player.is_on_ground(),
                damage_flash: player.damage_flash(),
            },
            weapon: WeaponView {
                name: weapon.name().to_string(),
                ammo: weapon.ammo(),
                max_ammo: weapon.max_ammo(),
                reloading: weapon.is_reloading(),
            },
            wave: manager.current_wave(),
            wave_in_progress: manager.is_wave_in_progress(),
            enemies_killed: manager.enemies_killed(),
            enemies: manager
                .enemies()
                .iter()
                .map(|enemy| EnemyView {
                    id: enemy.id(),
                    position: enemy.position().to_array(),
                    yaw: enemy.yaw(),
                    state: enemy.state(),
                    health: enemy.health().current,
                })
                .collect(),
            corpses: manager
                .corpses()
                .iter()
                .map(|corpse| CorpseView {
                    id: corpse.id,
                    position: corpse.position.to_array(),
                    yaw: corpse.yaw,
                    died_at: corpse.died_at,
                })
                .collect(),
            projectiles: weapon
                .projectiles()
                .filter(|p| p.is_active())
                .map(|p| ProjectileView {
                    position: p.position().to_array(),
                    direction: p.direction().to_array(),
                })
                .collect(),
        }
    }
}
