//! Fixed-step simulation driver
//!
//! `Simulation` owns the level, the player (and through it the weapon and
//! its projectiles), the enemy manager, the RNG and the clock. One `tick(dt)`
//! runs, in this order:
//! 1. player movement + collision
//! 2. enemy AI + movement + attacks
//! 3. weapon timers + projectile advancement
//! 4. projectile-vs-enemy hits
//! 5. wave bookkeeping (timers, dead removal, completion, spawning)
//!
//! Events produced during the tick queue up until `drain_events`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::AttackTarget;
use crate::combat::Weapon;
use crate::components::EnemyId;
use crate::config::SimulationConfig;
use crate::events::{InputIntent, SimulationEvent, Signals};
use crate::level::{LevelError, LevelGeometry};
use crate::player::{MoveDirection, Player};
use crate::waves::EnemyManager;
use crate::DeterministicRng;

pub mod snapshot;
pub mod systems;

pub use snapshot::SimulationSnapshot;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Terminal: the player died
    GameOver,
}

#[derive(Resource)]
pub struct Simulation {
    level: LevelGeometry,
    player: Player,
    enemies: EnemyManager,
    rng: DeterministicRng,
    /// Seconds since start. f64 so fixed-rate gates stay exact over long runs
    clock: f64,
    tick_count: u64,
    phase: GamePhase,
    signals: Signals,
}

impl Simulation {
    /// Builds the level from `config.level` (None = no level) and starts wave 1.
    pub fn new(config: SimulationConfig) -> Result<Self, LevelError> {
        let level = match &config.level {
            Some(layout) => LevelGeometry::from_layout(layout)?,
            None => LevelGeometry::empty(),
        };
        Ok(Self::with_level(level, config))
    }

    /// Same as `new` but ignores `config.level`.
    pub fn without_level(config: SimulationConfig) -> Self {
        Self::with_level(LevelGeometry::empty(), config)
    }

    pub fn with_level(level: LevelGeometry, config: SimulationConfig) -> Self {
        let player = Player::new(level.player_spawn(), config.player, Weapon::new(config.weapon));
        let enemies = EnemyManager::new(&level, config.waves, config.enemy);

        let mut simulation = Self {
            level,
            player,
            enemies,
            rng: DeterministicRng::new(config.seed),
            clock: 0.0,
            tick_count: 0,
            phase: GamePhase::Playing,
            signals: Signals::new(),
        };
        simulation.enemies.start_wave(0.0, &mut simulation.signals);

        crate::logger::log_info(&format!(
            "Simulation ready (seed {}, {} static boxes, {} enemy spawns)",
            config.seed,
            simulation.level.boxes().len(),
            simulation.enemies.spawn_points().len()
        ));

        simulation
    }

    /// Advances by `dt` seconds. Ignored unless playing; negative or
    /// non-finite `dt` is dropped.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing || !dt.is_finite() || dt < 0.0 {
            return;
        }

        self.clock += f64::from(dt);
        self.tick_count += 1;
        let now = self.clock;

        let Self {
            level,
            player,
            enemies,
            rng,
            signals,
            ..
        } = self;

        player.update(dt, level, enemies.enemies());
        enemies.update_enemies(dt, now, Some(&mut *player as &mut dyn AttackTarget), level, signals);
        player.weapon_mut().update(dt, now, level, signals);
        enemies.check_projectile_hits(player.weapon_mut().projectiles_mut(), now, signals);
        enemies.update_waves(now, Some(player.position()), &mut rng.rng, signals);

        if !self.player.is_alive() {
            self.set_phase(GamePhase::GameOver);
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        crate::logger::log_info(&format!("Game phase {:?} → {:?}", self.phase, phase));
        self.phase = phase;
        self.signals.push(SimulationEvent::PhaseChanged { phase });
    }

    /// Playing ↔ Paused. Game over is final.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            GamePhase::GameOver => {}
        }
    }

    pub fn set_movement_intent(&mut self, direction: MoveDirection, pressed: bool) {
        self.player.set_movement_intent(direction, pressed);
    }

    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if self.phase == GamePhase::Playing {
            self.player.look(delta_yaw, delta_pitch);
        }
    }

    pub fn jump_pressed(&mut self, pressed: bool) {
        self.player.jump_pressed(pressed);
    }

    pub fn run_pressed(&mut self, pressed: bool) {
        self.player.run_pressed(pressed);
    }

    /// Shoots at the current simulation time. False when not playing.
    pub fn fire(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.shoot(self.clock, &mut self.rng.rng, &mut self.signals)
    }

    pub fn reload(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.player.reload(self.clock, &mut self.signals)
    }

    pub fn apply_intent(&mut self, intent: &InputIntent) {
        match *intent {
            InputIntent::Move { direction, pressed } => self.set_movement_intent(direction, pressed),
            InputIntent::Look {
                delta_yaw,
                delta_pitch,
            } => self.look(delta_yaw, delta_pitch),
            InputIntent::Fire => {
                self.fire();
            }
            InputIntent::Reload => {
                self.reload();
            }
            InputIntent::Jump(pressed) => self.jump_pressed(pressed),
            InputIntent::Run(pressed) => self.run_pressed(pressed),
            InputIntent::TogglePause => self.toggle_pause(),
        }
    }

    pub fn force_spawn_enemy(&mut self) -> Option<EnemyId> {
        let player_position = self.player.position();
        self.enemies
            .force_spawn_enemy(Some(player_position), &mut self.rng.rng, &mut self.signals)
    }

    pub fn clear_all_enemies(&mut self) {
        self.enemies.clear_all_enemies();
    }

    /// Takes everything queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        self.signals.drain()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(self)
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemy_manager(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn level(&self) -> &LevelGeometry {
        &self.level
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed
    }
}
