//! Ballistic projectile: straight line, constant speed, no gravity.

use bevy::prelude::*;

use crate::components::ProjectileOwner;
use crate::level::{BoxKind, LevelGeometry};

/// Horizontal envelope (|x|, |z|) beyond which projectiles are dropped
pub const OUT_OF_BOUNDS_HORIZONTAL: f32 = 50.0;
pub const OUT_OF_BOUNDS_MIN_Y: f32 = -10.0;
pub const OUT_OF_BOUNDS_MAX_Y: f32 = 20.0;

/// Why a projectile is (no longer) in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileFate {
    InFlight,
    HitWorld { point: Vec3, kind: BoxKind },
    /// Travel budget spent
    Expired,
    OutOfBounds,
    /// Hit an enemy
    Consumed,
    /// Dropped by the weapon's pool cap
    Evicted,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    origin: Vec3,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    damage: u32,
    max_range: f32,
    distance_traveled: f32,
    owner: ProjectileOwner,
    fate: ProjectileFate,
}

impl Projectile {
    /// `direction` is normalised; a zero vector falls back to +Z.
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        damage: u32,
        max_range: f32,
        owner: ProjectileOwner,
    ) -> Self {
        Self {
            origin,
            position: origin,
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
            speed,
            damage,
            max_range,
            distance_traveled: 0.0,
            owner,
            fate: ProjectileFate::InFlight,
        }
    }

    /// Advances one step. Returns false once the projectile is no longer in flight.
    pub fn update(&mut self, dt: f32, level: &LevelGeometry) -> bool {
        if !self.is_active() {
            return false;
        }

        let displacement = self.direction * self.speed * dt;
        let step = displacement.length();

        if step > 0.0 {
            if let Some(hit) = level.raycast(self.position, self.direction, step) {
                self.position = hit.point;
                self.fate = ProjectileFate::HitWorld {
                    point: hit.point,
                    kind: hit.kind,
                };
                return false;
            }
        }

        self.position += displacement;
        self.distance_traveled += step;

        if self.distance_traveled >= self.max_range {
            self.fate = ProjectileFate::Expired;
            return false;
        }

        if self.is_out_of_bounds() {
            self.fate = ProjectileFate::OutOfBounds;
            return false;
        }

        true
    }

    fn is_out_of_bounds(&self) -> bool {
        let p = self.position;
        p.x.abs() > OUT_OF_BOUNDS_HORIZONTAL
            || p.z.abs() > OUT_OF_BOUNDS_HORIZONTAL
            || p.y < OUT_OF_BOUNDS_MIN_Y
            || p.y > OUT_OF_BOUNDS_MAX_Y
    }

    /// Deactivates with the given fate. No-op if already stopped.
    pub fn destroy(&mut self, fate: ProjectileFate) {
        if self.is_active() {
            self.fate = fate;
        }
    }

    pub fn is_active(&self) -> bool {
        self.fate == ProjectileFate::InFlight
    }

    pub fn fate(&self) -> ProjectileFate {
        self.fate
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    pub fn owner(&self) -> ProjectileOwner {
        self.owner
    }
}
