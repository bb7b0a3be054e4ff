//! Data shared between simulation domains
//!
//! - actor: health pool, enemy and projectile-owner handles

pub mod actor;

pub use actor::*;
