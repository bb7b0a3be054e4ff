//! Enemy waves
//!
//! `EnemyManager` owns the live enemy collection. Per tick (driven by
//! `Simulation`):
//! 1. `update_enemies`: AI + movement + attacks
//! 2. `check_projectile_hits`: after the weapon advanced its projectiles
//! 3. `update_waves`: due timers, dead-enemy removal/kill count, wave
//!    completion, replacement spawns

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{AttackTarget, Enemy, EnemyConfig};
use crate::combat::{Projectile, ProjectileFate};
use crate::components::{EnemyId, ProjectileOwner};
use crate::events::{SimulationEvent, Signals};
use crate::level::LevelGeometry;
use crate::timeline::Timeline;

pub mod config;

pub use config::WaveConfig;


/// Used when the level provides no enemy spawn points.
pub const FALLBACK_SPAWN_POINTS: [Vec3; 8] = [
    Vec3::new(10.0, 0.0, 10.0),
    Vec3::new(-10.0, 0.0, 10.0),
    Vec3::new(10.0, 0.0, -10.0),
    Vec3::new(-10.0, 0.0, -10.0),
    Vec3::new(15.0, 0.0, 0.0),
    Vec3::new(-15.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 15.0),
    Vec3::new(0.0, 0.0, -15.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTask {
    /// Staggered spawn belonging to a wave
    SpawnEnemy { wave: u32 },
    StartWave,
    /// Drop a corpse once its death animation is over
    ClearCorpse(EnemyId),
}

/// Enemy removed from the live collection, kept for its death animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corpse {
    pub id: EnemyId,
    pub position: Vec3,
    pub yaw: f32,
    pub died_at: f64,
}

#[derive(Debug, Clone)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    corpses: Vec<Corpse>,
    spawn_points: Vec<Vec3>,
    config: WaveConfig,
    enemy_config: EnemyConfig,
    current_wave: u32,
    wave_in_progress: bool,
    enemies_killed: u32,
    last_replacement_spawn: f64,
    next_enemy_id: u64,
    timeline: Timeline<WaveTask>,
}

impl EnemyManager {
    pub fn new(level: &LevelGeometry, config: WaveConfig, enemy_config: EnemyConfig) -> Self {
        let spawn_points = if level.enemy_spawns().is_empty() {
            FALLBACK_SPAWN_POINTS.to_vec()
        } else {
            level.enemy_spawns().to_vec()
        };

        Self {
            enemies: Vec::new(),
            corpses: Vec::new(),
            spawn_points,
            config,
            enemy_config,
            current_wave: 1,
            wave_in_progress: false,
            enemies_killed: 0,
            last_replacement_spawn: 0.0,
            next_enemy_id: 1,
            timeline: Timeline::new(),
        }
    }

    /// Schedules the current wave's spawns, staggered. No-op while a wave runs.
    pub fn start_wave(&mut self, now: f64, signals: &mut Signals) {
        if self.wave_in_progress {
            return;
        }

        self.wave_in_progress = true;
        let count = self.wave_size(self.current_wave);
        for i in 0..count {
            self.timeline.schedule(
                now + i as f64 * self.config.spawn_stagger,
                WaveTask::SpawnEnemy {
                    wave: self.current_wave,
                },
            );
        }

        crate::logger::log_info(&format!("🌊 Wave {} started: {} enemies", self.current_wave, count));
        signals.push(SimulationEvent::WaveStarted {
            wave: self.current_wave,
            enemy_count: count as u32,
        });
    }

    pub fn wave_size(&self, wave: u32) -> usize {
        let extra = wave.saturating_sub(1) as usize;
        (self.config.base_enemies_per_wave + extra).min(self.config.max_enemies)
    }

    /// Spawns one enemy at a random spawn point, preferring points far from
    /// the player. None at the live cap.
    pub fn spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        player_position: Option<Vec3>,
        rng: &mut R,
        signals: &mut Signals,
    ) -> Option<EnemyId> {
        if self.enemies.len() >= self.config.max_enemies || self.spawn_points.is_empty() {
            return None;
        }

        let far_enough: Vec<Vec3> = match player_position {
            Some(player) => self
                .spawn_points
                .iter()
                .copied()
                .filter(|point| horizontal_distance(*point, player) >= self.config.min_spawn_distance)
                .collect(),
            None => Vec::new(),
        };
        let candidates = if far_enough.is_empty() {
            &self.spawn_points
        } else {
            &far_enough
        };
        let position = candidates[rng.gen_range(0..candidates.len())];

        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.push(Enemy::new(id, position, self.enemy_config));

        crate::logger::log(&format!("👾 Spawned {} at {:?} ({} alive)", id, position, self.enemies.len()));
        signals.push(SimulationEvent::EnemySpawned {
            enemy: id,
            position,
            wave: self.current_wave,
        });

        Some(id)
    }

    /// Out-of-band spawn (debug / scripted), same rules as a wave spawn.
    pub fn force_spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        player_position: Option<Vec3>,
        rng: &mut R,
        signals: &mut Signals,
    ) -> Option<EnemyId> {
        self.spawn_enemy(player_position, rng, signals)
    }

    /// Drops every enemy, corpse and pending task; stops the current wave.
    /// Nothing is counted as killed.
    pub fn clear_all_enemies(&mut self) {
        self.enemies.clear();
        self.corpses.clear();
        self.timeline.clear();
        self.wave_in_progress = false;
    }

    /// AI step for every live enemy, in collection order.
    pub fn update_enemies(
        &mut self,
        dt: f32,
        now: f64,
        mut target: Option<&mut dyn AttackTarget>,
        level: &LevelGeometry,
        signals: &mut Signals,
    ) {
        for enemy in self.enemies.iter_mut() {
            // Fresh short reborrow per enemy
            let target = match target {
                Some(ref mut t) => Some(&mut **t as &mut dyn AttackTarget),
                None => None,
            };
            enemy.update(dt, now, target, level, signals);
        }
    }

    /// Each active projectile damages at most one enemy (the first living
    /// one within the hit radius) and is consumed by the hit.
    /// Returns the number of hits.
    pub fn check_projectile_hits<'p>(
        &mut self,
        projectiles: impl IntoIterator<Item = &'p mut Projectile>,
        now: f64,
        signals: &mut Signals,
    ) -> u32 {
        let mut hits = 0;

        for projectile in projectiles {
            if !projectile.is_active() {
                continue;
            }

            let shooter = match projectile.owner() {
                ProjectileOwner::Enemy(id) => Some(id),
                ProjectileOwner::Player => None,
            };

            let target = self.enemies.iter_mut().find(|enemy| {
                enemy.is_alive()
                    && Some(enemy.id()) != shooter
                    && projectile.position().distance(enemy.center()) <= self.config.hit_radius
            });

            if let Some(enemy) = target {
                let killed = enemy.take_damage(projectile.damage(), now, signals);
                projectile.destroy(ProjectileFate::Consumed);
                hits += 1;

                crate::logger::log(&format!(
                    "🎯 Projectile hit {} for {}{}",
                    enemy.id(),
                    projectile.damage(),
                    if killed { " (lethal)" } else { "" }
                ));
            }
        }

        hits
    }

    /// Timers, dead-enemy reconciliation, wave completion, replacement spawns.
    pub fn update_waves<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        player_position: Option<Vec3>,
        rng: &mut R,
        signals: &mut Signals,
    ) {
        while let Some(task) = self.timeline.pop_due(now) {
            match task {
                WaveTask::SpawnEnemy { wave } => {
                    // Stale spawn from a wave that is no longer running
                    if wave == self.current_wave && self.wave_in_progress {
                        self.spawn_enemy(player_position, rng, signals);
                    }
                }
                WaveTask::StartWave => self.start_wave(now, signals),
                WaveTask::ClearCorpse(id) => self.corpses.retain(|corpse| corpse.id != id),
            }
        }

        self.reconcile_dead(now, signals);

        if self.wave_in_progress && self.enemies.is_empty() && self.pending_wave_spawns() == 0 {
            self.complete_wave(now, signals);
        }

        self.handle_replacement_spawning(now, player_position, rng, signals);
    }

    /// Removal from the live collection is the single point where kills are counted.
    fn reconcile_dead(&mut self, now: f64, signals: &mut Signals) {
        if self.enemies.iter().all(Enemy::is_alive) {
            return;
        }

        let (alive, dead): (Vec<Enemy>, Vec<Enemy>) =
            std::mem::take(&mut self.enemies).into_iter().partition(Enemy::is_alive);
        self.enemies = alive;

        for enemy in dead {
            self.enemies_killed += 1;

            let died_at = match enemy.state() {
                crate::ai::AIState::Dead { died_at } => died_at,
                _ => now,
            };
            self.corpses.push(Corpse {
                id: enemy.id(),
                position: enemy.position(),
                yaw: enemy.yaw(),
                died_at,
            });
            self.timeline.schedule(
                died_at + self.enemy_config.death_settle_delay,
                WaveTask::ClearCorpse(enemy.id()),
            );

            crate::logger::log(&format!("Enemy eliminated! Total killed: {}", self.enemies_killed));
            signals.push(SimulationEvent::EnemyKilled {
                enemy: enemy.id(),
                total_kills: self.enemies_killed,
            });
        }
    }

    fn complete_wave(&mut self, now: f64, signals: &mut Signals) {
        let finished = self.current_wave;
        self.wave_in_progress = false;
        self.current_wave += 1;
        self.timeline.schedule(now + self.config.next_wave_delay, WaveTask::StartWave);

        crate::logger::log_info(&format!(
            "✅ Wave {} complete, next wave in {}s",
            finished, self.config.next_wave_delay
        ));
        signals.push(SimulationEvent::WaveCompleted { wave: finished });
    }

    /// Frame-coupled: one roll per eligible tick.
    fn handle_replacement_spawning<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        player_position: Option<Vec3>,
        rng: &mut R,
        signals: &mut Signals,
    ) {
        if !self.wave_in_progress || self.enemies.len() >= self.config.max_enemies {
            return;
        }

        if now - self.last_replacement_spawn < self.config.replacement_cooldown {
            return;
        }

        if rng.gen::<f32>() < self.config.replacement_chance {
            self.spawn_enemy(player_position, rng, signals);
            self.last_replacement_spawn = now;
        }
    }

    fn pending_wave_spawns(&self) -> usize {
        self.timeline
            .count_matching(|task| matches!(task, WaveTask::SpawnEnemy { .. }))
    }

    /// Live enemies, in spawn order
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id() == id)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn corpses(&self) -> &[Corpse] {
        &self.corpses
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn is_wave_in_progress(&self) -> bool {
        self.wave_in_progress
    }

    pub fn spawn_points(&self) -> &[Vec3] {
        &self.spawn_points
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
