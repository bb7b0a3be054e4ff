//! Weapon: fire-rate gate, magazine, reload timer, projectile pool.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::Rng;

use super::projectile::{Projectile, ProjectileFate};
use super::weapon_stats::WeaponStats;
use crate::components::ProjectileOwner;
use crate::events::{sounds, SimulationEvent, Signals};
use crate::level::LevelGeometry;
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTask {
    FinishReload,
}

#[derive(Debug, Clone)]
pub struct Weapon {
    stats: WeaponStats,
    ammo: u32,
    reloading: bool,
    last_fire_time: Option<f64>,
    /// Oldest first
    projectiles: VecDeque<Projectile>,
    timeline: Timeline<WeaponTask>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponStats::default())
    }
}

impl Weapon {
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            ammo: stats.max_ammo,
            stats,
            reloading: false,
            last_fire_time: None,
            projectiles: VecDeque::new(),
            timeline: Timeline::new(),
        }
    }

    pub fn can_fire(&self, now: f64) -> bool {
        if self.reloading || self.ammo == 0 {
            return false;
        }

        self.last_fire_time
            .map_or(true, |last| now - last >= self.stats.fire_rate)
    }

    /// Spawns one projectile with spread. Returns false (plus an empty click
    /// when the magazine is exactly empty) if the weapon cannot fire.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        origin: Vec3,
        direction: Vec3,
        owner: ProjectileOwner,
        rng: &mut R,
        signals: &mut Signals,
    ) -> bool {
        if !self.can_fire(now) {
            if self.ammo == 0 {
                signals.push(SimulationEvent::EmptyClick);
                signals.sound(sounds::EMPTY_CLICK, 0.2);
            }
            return false;
        }

        self.ammo -= 1;
        self.last_fire_time = Some(now);

        let spread = self.stats.spread;
        let jitter = Vec3::new(
            (rng.gen::<f32>() - 0.5) * spread,
            (rng.gen::<f32>() - 0.5) * spread,
            (rng.gen::<f32>() - 0.5) * spread,
        );

        let projectile = Projectile::new(
            origin,
            direction + jitter,
            self.stats.projectile_speed,
            self.stats.damage,
            self.stats.range,
            owner,
        );
        let direction = projectile.direction();
        self.projectiles.push_back(projectile);

        while self.projectiles.len() > self.stats.max_projectiles {
            if let Some(mut oldest) = self.projectiles.pop_front() {
                oldest.destroy(ProjectileFate::Evicted);
            }
        }

        signals.push(SimulationEvent::WeaponFired {
            origin,
            direction,
            ammo: self.ammo,
        });
        signals.sound(sounds::GUNSHOT, self.stats.fire_volume);

        true
    }

    /// Starts a reload. No-op when already reloading or the magazine is full.
    pub fn reload(&mut self, now: f64, signals: &mut Signals) -> bool {
        if self.reloading || self.ammo == self.stats.max_ammo {
            return false;
        }

        self.reloading = true;
        self.timeline
            .schedule(now + self.stats.reload_duration, WeaponTask::FinishReload);

        crate::logger::log(&format!("🔄 Reloading {} ({}s)", self.stats.name, self.stats.reload_duration));
        signals.push(SimulationEvent::ReloadStarted);
        signals.sound(sounds::RELOAD, 0.4);

        true
    }

    /// Completes due reloads, then advances owned projectiles and drops the stopped ones.
    pub fn update(&mut self, dt: f32, now: f64, level: &LevelGeometry, signals: &mut Signals) {
        while let Some(task) = self.timeline.pop_due(now) {
            match task {
                WeaponTask::FinishReload => self.finish_reload(signals),
            }
        }

        self.projectiles.retain_mut(|projectile| {
            if projectile.update(dt, level) {
                return true;
            }

            if let ProjectileFate::HitWorld { point, kind } = projectile.fate() {
                signals.push(SimulationEvent::ProjectileImpact { point, kind });
            }
            false
        });
    }

    fn finish_reload(&mut self, signals: &mut Signals) {
        if !self.reloading {
            return;
        }

        self.ammo = self.stats.max_ammo;
        self.reloading = false;
        signals.push(SimulationEvent::ReloadFinished { ammo: self.ammo });
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.stats.max_ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn is_out_of_ammo(&self) -> bool {
        self.ammo == 0
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn damage(&self) -> u32 {
        self.stats.damage
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }
}
