//! Ranged combat: weapon, projectiles, tuning.
//!
//! The weapon owns its projectiles outright; the enemy manager only marks
//! them consumed during the hit test, the weapon drops them on its next update.

pub mod projectile;
pub mod weapon;
pub mod weapon_stats;

pub use projectile::{Projectile, ProjectileFate};
pub use weapon::{Weapon, WeaponTask};
pub use weapon_stats::WeaponStats;

#[cfg(test)]
mod weapon_tests;
