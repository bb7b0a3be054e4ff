//! Hostile enemy: direct-pursuit FSM, melee attack on cooldown.

use bevy::prelude::*;

use super::components::{AIState, EnemyConfig};
use crate::components::{EnemyId, Health};
use crate::events::{sounds, SimulationEvent, Signals};
use crate::level::LevelGeometry;

/// Something enemies can chase and hit (the player).
pub trait AttackTarget {
    fn target_position(&self) -> Vec3;

    /// Dead or otherwise untargetable targets are ignored by the AI
    fn is_targetable(&self) -> bool;

    /// Returns true if this attack killed the target
    fn receive_attack(&mut self, damage: u32, now: f64, signals: &mut Signals) -> bool;
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    position: Vec3,
    velocity: Vec3,
    /// Facing around Y (radians), atan2(dx, dz)
    yaw: f32,
    health: Health,
    state: AIState,
    last_attack_time: Option<f64>,
    config: EnemyConfig,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Vec3, config: EnemyConfig) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            health: Health::new(config.max_health),
            state: AIState::Idle,
            last_attack_time: None,
            config,
        }
    }

    /// One AI step. Dead enemies and enemies without a live target do nothing.
    ///
    /// A tick that changes state only applies the transition; the behaviour
    /// of the new state starts on the next tick.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        target: Option<&mut dyn AttackTarget>,
        level: &LevelGeometry,
        signals: &mut Signals,
    ) {
        if self.state.is_dead() {
            return;
        }

        let Some(target) = target.filter(|t| t.is_targetable()) else {
            self.velocity = Vec3::ZERO;
            return;
        };

        let offset = target.target_position() - self.position;
        let flat = Vec3::new(offset.x, 0.0, offset.z);
        let distance = flat.length();

        let previous = self.state;
        let next = previous.next(distance, &self.config);

        if next != previous {
            crate::logger::log(&format!(
                "AI: {} {} → {} (distance {:.1})",
                self.id,
                previous.name(),
                next.name(),
                distance
            ));
            if matches!(next, AIState::Idle | AIState::Attacking) {
                self.velocity = Vec3::ZERO;
            }
            self.state = next;
        } else {
            match self.state {
                AIState::Chasing => {
                    let direction = flat.normalize_or_zero();
                    self.velocity = direction * self.config.speed;
                    self.face(direction);
                }
                AIState::Attacking => {
                    self.face(flat.normalize_or_zero());
                    self.try_attack(now, target, signals);
                }
                AIState::Idle | AIState::Dead { .. } => {}
            }
        }

        self.apply_movement(dt, level);
    }

    fn face(&mut self, direction: Vec3) {
        if direction != Vec3::ZERO {
            self.yaw = direction.x.atan2(direction.z);
        }
    }

    fn try_attack(&mut self, now: f64, target: &mut dyn AttackTarget, signals: &mut Signals) {
        if let Some(last) = self.last_attack_time {
            if now - last < self.config.attack_cooldown {
                return;
            }
        }

        self.last_attack_time = Some(now);
        target.receive_attack(self.config.attack_damage, now, signals);
    }

    /// Straight integration clamped to the play area. Static boxes are not
    /// consulted: no avoidance, no sliding.
    fn apply_movement(&mut self, dt: f32, level: &LevelGeometry) {
        if self.velocity == Vec3::ZERO {
            return;
        }

        self.position = level.clamp_to_play_area(self.position + self.velocity * dt);
    }

    /// Returns true only for the call that killed the enemy.
    pub fn take_damage(&mut self, amount: u32, now: f64, signals: &mut Signals) -> bool {
        if self.state.is_dead() {
            return false;
        }

        self.health.take_damage(amount);
        signals.push(SimulationEvent::EnemyDamaged {
            enemy: self.id,
            amount,
            remaining: self.health.current,
        });

        if !self.health.is_alive() {
            self.die(now, signals);
            return true;
        }

        signals.sound(sounds::ENEMY_HIT, 0.4);

        // Getting shot wakes an idle enemy up
        if self.state == AIState::Idle {
            self.state = AIState::Chasing;
        }

        false
    }

    fn die(&mut self, now: f64, signals: &mut Signals) {
        self.state = AIState::Dead { died_at: now };
        self.velocity = Vec3::ZERO;

        crate::logger::log(&format!("💀 {} died at {:?}", self.id, self.position));
        signals.push(SimulationEvent::EnemyDied {
            enemy: self.id,
            position: self.position,
        });
        signals.sound(sounds::ENEMY_DEATH, 0.5);
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Body center, used by the projectile hit test
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height * 0.5)
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn state(&self) -> AIState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        !self.state.is_dead()
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }
}
