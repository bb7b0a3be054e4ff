//! The player: intent-driven movement, gravity, collision response, health, weapon.

use bevy::prelude::*;
use rand::Rng;

use super::config::PlayerConfig;
use super::{MoveDirection, MovementIntents};
use crate::ai::{AttackTarget, Enemy};
use crate::combat::Weapon;
use crate::components::{Health, ProjectileOwner};
use crate::events::{sounds, SimulationEvent, Signals};
use crate::level::LevelGeometry;

#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
    intents: MovementIntents,
    health: Health,
    alive: bool,
    last_damage_time: Option<f64>,
    damage_flash: f32,
    weapon: Weapon,
    config: PlayerConfig,
}

impl Player {
    pub fn new(spawn: Vec3, config: PlayerConfig, weapon: Weapon) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: true,
            intents: MovementIntents::default(),
            health: Health::new(config.max_health),
            alive: true,
            last_damage_time: None,
            damage_flash: 0.0,
            weapon,
            config,
        }
    }

    /// Movement and collision for one tick:
    /// 1. horizontal velocity from intents (camera-yaw space), jump
    /// 2. gravity while airborne
    /// 3. integrate
    /// 4. clamp to the play area
    /// 5. ground snap
    /// 6. push out of static geometry
    /// 7. push away from living enemies
    pub fn update(&mut self, dt: f32, level: &LevelGeometry, enemies: &[Enemy]) {
        if !self.alive {
            return;
        }

        self.damage_flash = (self.damage_flash - dt).max(0.0);

        let speed = if self.intents.run {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };
        let wish = self.wish_direction() * speed;
        self.velocity.x = wish.x;
        self.velocity.z = wish.z;

        if self.intents.jump && self.on_ground {
            self.velocity.y = self.config.jump_speed;
            self.on_ground = false;
        }

        if !self.on_ground {
            self.velocity.y += self.config.gravity * dt;
        }

        let integrated = self.position + self.velocity * dt;
        self.position = level.clamp_to_play_area(integrated);

        if self.position.y <= self.config.ground_height {
            self.position.y = self.config.ground_height;
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        self.resolve_level_collision(level);
        self.resolve_enemy_collisions(enemies);
    }

    /// Radial push from the obstacle center out to its half extent plus clearance.
    /// Standing exactly on the center axis gives no direction, nothing happens.
    fn resolve_level_collision(&mut self, level: &LevelGeometry) {
        let Some(hit) = level.check_collision(self.position, self.config.radius) else {
            return;
        };

        let center = hit.bounds.center();
        let half = hit.bounds.half_extents();
        let dx = self.position.x - center.x;
        let dz = self.position.z - center.z;
        let distance = (dx * dx + dz * dz).sqrt();
        if distance <= 0.0 {
            return;
        }

        let clearance = self.config.radius + self.config.obstacle_push_margin;
        self.position.x = center.x + dx / distance * (half.x + clearance);
        self.position.z = center.z + dz / distance * (half.z + clearance);
    }

    fn resolve_enemy_collisions(&mut self, enemies: &[Enemy]) {
        for enemy in enemies.iter().filter(|e| e.is_alive()) {
            let enemy_position = enemy.position();
            let dx = self.position.x - enemy_position.x;
            let dz = self.position.z - enemy_position.z;
            let distance = (dx * dx + dz * dz).sqrt();
            let total_radius = self.config.radius + enemy.radius();

            if distance < total_radius && distance > 0.0 {
                let push = total_radius - distance + self.config.enemy_push_margin;
                self.position.x += dx / distance * push;
                self.position.z += dz / distance * push;
            }
        }
    }

    fn wish_direction(&self) -> Vec3 {
        let forward = self.forward_direction();
        let right = self.right_direction();
        let mut wish = Vec3::ZERO;

        if self.intents.forward {
            wish += forward;
        }
        if self.intents.backward {
            wish -= forward;
        }
        if self.intents.right {
            wish += right;
        }
        if self.intents.left {
            wish -= right;
        }

        wish.normalize_or_zero()
    }

    /// Horizontal forward from yaw (yaw 0 looks down -Z).
    pub fn forward_direction(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right_direction(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Camera forward from yaw/pitch, lowered by `aim_drop`, unit length.
    pub fn shooting_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let camera_forward = Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch);

        (camera_forward - Vec3::Y * self.config.aim_drop)
            .try_normalize()
            .unwrap_or(camera_forward)
    }

    pub fn set_movement_intent(&mut self, direction: MoveDirection, pressed: bool) {
        self.intents.set(direction, pressed);
    }

    pub fn jump_pressed(&mut self, pressed: bool) {
        self.intents.jump = pressed;
    }

    pub fn run_pressed(&mut self, pressed: bool) {
        self.intents.run = pressed;
    }

    /// Deltas in radians. Pitch is clamped, yaw wraps freely.
    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.config.max_pitch, self.config.max_pitch);
    }

    /// Fires the weapon along the shooting direction. False if dead or the weapon refuses.
    pub fn shoot<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, signals: &mut Signals) -> bool {
        if !self.alive {
            return false;
        }

        let direction = self.shooting_direction();
        self.weapon
            .fire(now, self.position, direction, ProjectileOwner::Player, rng, signals)
    }

    pub fn reload(&mut self, now: f64, signals: &mut Signals) -> bool {
        if !self.alive {
            return false;
        }
        self.weapon.reload(now, signals)
    }

    /// Applies damage unless dead or inside the immunity window.
    /// Returns true only for the hit that killed the player.
    pub fn take_damage(&mut self, amount: u32, now: f64, signals: &mut Signals) -> bool {
        if !self.alive {
            return false;
        }

        if let Some(last) = self.last_damage_time {
            if now - last < self.config.damage_immunity {
                return false;
            }
        }

        self.health.take_damage(amount);
        self.last_damage_time = Some(now);
        self.damage_flash = self.config.damage_flash_duration;

        signals.push(SimulationEvent::PlayerDamaged {
            amount,
            remaining: self.health.current,
        });
        signals.sound(sounds::PLAYER_HURT, 0.5);

        if self.health.is_alive() {
            return false;
        }

        self.alive = false;
        self.velocity = Vec3::ZERO;
        crate::logger::log_info("☠️ Player died, game over");
        signals.push(SimulationEvent::PlayerDied);
        true
    }

    /// No-op when dead. Clamped at max health.
    pub fn heal(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health.heal(amount);
        true
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health(&self) -> Health {
        self.health
    }

    /// 0..=100
    pub fn health_percent(&self) -> f32 {
        self.health.fraction() * 100.0
    }

    /// Seconds of damage flash left (presentation)
    pub fn damage_flash(&self) -> f32 {
        self.damage_flash
    }

    pub fn intents(&self) -> &MovementIntents {
        &self.intents
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }
}

impl AttackTarget for Player {
    fn target_position(&self) -> Vec3 {
        self.position
    }

    fn is_targetable(&self) -> bool {
        self.alive
    }

    fn receive_attack(&mut self, damage: u32, now: f64, signals: &mut Signals) -> bool {
        self.take_damage(damage, now, signals)
    }
}
