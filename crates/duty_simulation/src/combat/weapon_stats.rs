//! Ranged weapon tuning.

use serde::{Deserialize, Serialize};

/// Weapon stats (pistol/rifle style hitscan-free projectile weapon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub name: String,

    /// Damage per projectile
    pub damage: u32,

    /// Minimum seconds between shots
    pub fire_rate: f64,

    /// Magazine size
    pub max_ammo: u32,

    /// Projectile travel budget (meters)
    pub range: f32,

    /// Full jitter width per direction axis
    pub spread: f32,

    /// Projectile speed (m/s)
    pub projectile_speed: f32,

    /// Pool cap, oldest projectile evicted beyond it
    pub max_projectiles: usize,

    /// Seconds until a started reload refills the magazine
    pub reload_duration: f64,

    pub fire_volume: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            name: "Assault Rifle".to_string(),
            damage: 25,
            fire_rate: 0.1,
            max_ammo: 30,
            range: 100.0,
            spread: 0.02,
            projectile_speed: 50.0,
            max_projectiles: 50,
            reload_duration: 2.0,
            fire_volume: 0.3,
        }
    }
}
