//! Duty Simulation Core
//!
//! Headless first-person arena combat: player, hostile AI waves, projectile
//! ballistics and static AABB level geometry, advanced by a fixed-step loop.
//!
//! Architecture:
//! - domain types (level, combat, ai, player, waves) are plain structs
//!   owned by `Simulation`, stepped with an explicit `dt`
//! - `SimulationPlugin` wraps `Simulation` as a Bevy resource ticked in FixedUpdate
//! - rendering, audio and raw input are collaborators: they read snapshots
//!   and events, and feed `InputIntent`s back

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod events;
pub mod level;
pub mod logger;
pub mod player;
pub mod simulation;
pub mod timeline;
pub mod waves;

pub use ai::{AIState, AttackTarget, Enemy, EnemyConfig};
pub use combat::{Projectile, ProjectileFate, Weapon, WeaponStats};
pub use components::*;
pub use config::{SimulationConfig, DEFAULT_SEED};
pub use events::{InputIntent, SimulationEvent, Signals};
pub use level::{Aabb, LevelError, LevelGeometry, LevelLayout};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use player::{MoveDirection, Player, PlayerConfig};
pub use simulation::{GamePhase, Simulation, SimulationSnapshot};
pub use timeline::Timeline;
pub use waves::{EnemyManager, WaveConfig};

/// Main simulation plugin
///
/// Config precedence: an inserted `SimulationConfig` resource, else the seed
/// of an inserted `DeterministicRng` with default tuning, else defaults.
/// A rejected level layout is logged and the simulation runs without a level.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<SimulationConfig>() {
            Some(config) => config.clone(),
            None => {
                let seed = app
                    .world()
                    .get_resource::<DeterministicRng>()
                    .map_or(DEFAULT_SEED, |rng| rng.seed);
                SimulationConfig::with_seed(seed)
            }
        };

        let simulation = Simulation::new(config.clone()).unwrap_or_else(|err| {
            log_error(&format!("Level layout rejected: {}. Running without a level", err));
            Simulation::without_level(config.clone())
        });

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
            .insert_resource(config)
            .insert_resource(simulation)
            .add_event::<InputIntent>()
            .add_event::<SimulationEvent>()
            .add_systems(
                FixedUpdate,
                (
                    simulation::systems::apply_input_intents,
                    simulation::systems::advance_simulation,
                    simulation::systems::publish_simulation_events,
                )
                    .chain(),
            );
    }
}

/// Deterministic RNG (seeded ChaCha8)
#[derive(Resource, Debug, Clone)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Minimal headless Bevy App.
///
/// Time advances by exactly one fixed step (1/60 s) per `app.update()` after
/// the first one, independent of wall-clock time.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    let step = Duration::from_secs_f64(1.0 / 60.0);
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app
}
