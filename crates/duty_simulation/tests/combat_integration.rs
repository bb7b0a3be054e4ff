//! Combat integration tests
//!
//! Checks:
//! - enemy chase → melee attack on cooldown against the player
//! - full magazine, empty click, timed reload
//! - shooting down a wave, kill counting and the next wave
//! - the Bevy plugin publishes events and consumes intents

use approx::assert_abs_diff_eq;
use bevy::prelude::*;
use duty_simulation::*;

const DT: f32 = 1.0 / 60.0;

fn arena_config(waves: WaveConfig) -> SimulationConfig {
    SimulationConfig {
        level: None,
        waves,
        ..SimulationConfig::default()
    }
}

/// Look deltas that point the shooting direction at `target`.
fn aim_at(simulation: &Simulation, target: Vec3) -> InputIntent {
    let player = simulation.player();
    let offset = target - player.position();
    let horizontal = Vec2::new(offset.x, offset.z).length();

    let yaw = (-offset.x).atan2(-offset.z);
    let pitch = offset.y.atan2(horizontal) + player.config().aim_drop;

    InputIntent::Look {
        delta_yaw: yaw - player.yaw(),
        delta_pitch: pitch - player.pitch(),
    }
}

#[test]
fn test_enemy_chases_and_attacks_on_cooldown() {
    let level = LevelGeometry::empty();
    let mut player = Player::new(
        Vec3::new(0.0, 1.8, 0.0),
        PlayerConfig::default(),
        Weapon::new(WeaponStats::default()),
    );
    let mut enemy = Enemy::new(EnemyId(1), Vec3::new(5.0, 0.0, 0.0), EnemyConfig::default());
    let mut signals = Signals::new();

    let dt = 0.05;
    let mut now = 0.0;
    let mut hits = Vec::new();
    let mut last_health = player.health().current;

    for _ in 0..200 {
        now += f64::from(dt);
        player.update(dt, &level, std::slice::from_ref(&enemy));
        enemy.update(dt, now, Some(&mut player as &mut dyn AttackTarget), &level, &mut signals);

        let health = player.health().current;
        if health != last_health {
            hits.push((now, health));
            last_health = health;
        }
        if hits.len() == 2 {
            break;
        }
    }

    assert_eq!(enemy.state(), AIState::Attacking);
    assert!(enemy.position().x <= 2.0 + 1e-3);
    assert_eq!(hits.len(), 2, "expected two attacks, got {:?}", hits);
    assert_eq!(hits[0].1, 90);
    assert_eq!(hits[1].1, 80);
    assert_abs_diff_eq!(hits[1].0 - hits[0].0, 1.5, epsilon = f64::from(dt) + 1e-3);

    let damaged = signals
        .iter()
        .filter(|e| matches!(e, SimulationEvent::PlayerDamaged { .. }))
        .count();
    assert_eq!(damaged, 2);
}

#[test]
fn test_magazine_empty_click_and_reload() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();

    let mut shots = 0;
    for _ in 0..400 {
        if sim.fire() {
            shots += 1;
        }
        sim.tick(DT);
        if shots == 30 {
            break;
        }
    }
    assert_eq!(shots, 30);
    assert!(sim.player().weapon().is_out_of_ammo());

    sim.drain_events();
    for _ in 0..10 {
        sim.tick(DT);
    }
    assert!(!sim.fire());
    assert!(sim.drain_events().contains(&SimulationEvent::EmptyClick));

    assert!(sim.reload());
    assert!(sim.player().weapon().is_reloading());
    assert!(!sim.reload(), "reload while reloading is refused");

    for _ in 0..110 {
        sim.tick(DT);
    }
    assert!(sim.player().weapon().is_reloading());

    for _ in 0..20 {
        sim.tick(DT);
    }
    assert!(!sim.player().weapon().is_reloading());
    assert_eq!(sim.player().weapon().ammo(), 30);
    assert!(sim
        .drain_events()
        .contains(&SimulationEvent::ReloadFinished { ammo: 30 }));
}

#[test]
fn test_shooting_down_a_wave() {
    let mut sim = Simulation::new(arena_config(WaveConfig {
        base_enemies_per_wave: 1,
        replacement_chance: 0.0,
        ..WaveConfig::default()
    }))
    .unwrap();

    let mut events = Vec::new();
    for _ in 0..900 {
        if let Some(enemy) = sim.enemy_manager().enemies().iter().find(|e| e.is_alive()) {
            let target = enemy.center();
            let close = (target - sim.player().position()).length() < 10.0;
            let intent = aim_at(&sim, target);
            sim.apply_intent(&intent);
            if close {
                sim.fire();
            }
        }
        sim.tick(DT);
        events.extend(sim.drain_events());

        if sim.enemy_manager().enemies_killed() == 1 {
            break;
        }
    }

    assert_eq!(sim.enemy_manager().enemies_killed(), 1);
    assert!(sim.player().is_alive());
    assert_eq!(sim.enemy_manager().current_wave(), 2);
    assert!(!sim.enemy_manager().is_wave_in_progress());
    assert!(events.contains(&SimulationEvent::WaveCompleted { wave: 1 }));

    let died = events
        .iter()
        .filter(|e| matches!(e, SimulationEvent::EnemyDied { .. }))
        .count();
    assert_eq!(died, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimulationEvent::EnemyKilled { total_kills: 1, .. })));

    // Corpse lingers, then the next wave starts after the delay
    assert_eq!(sim.enemy_manager().corpses().len(), 1);
    for _ in 0..330 {
        sim.tick(DT);
    }
    assert!(sim.enemy_manager().corpses().is_empty());
    assert!(sim.enemy_manager().is_wave_in_progress());
    assert!(sim.drain_events().contains(&SimulationEvent::WaveStarted {
        wave: 2,
        enemy_count: 2
    }));
}

#[derive(Resource, Default)]
struct Recorded(Vec<SimulationEvent>);

fn record_events(mut reader: EventReader<SimulationEvent>, mut recorded: ResMut<Recorded>) {
    recorded.0.extend(reader.read().cloned());
}

#[test]
fn test_plugin_publishes_events() {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin)
        .init_resource::<Recorded>()
        .add_systems(Update, record_events);

    for _ in 0..120 {
        app.update();
    }

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.seed(), 42);
    assert!(simulation.tick_count() >= 100);
    assert_abs_diff_eq!(simulation.clock(), simulation.tick_count() as f64 * f64::from(DT), epsilon = 1e-3);

    let recorded = &app.world().resource::<Recorded>().0;
    assert!(recorded.contains(&SimulationEvent::WaveStarted {
        wave: 1,
        enemy_count: 4
    }));
    assert!(recorded
        .iter()
        .any(|e| matches!(e, SimulationEvent::EnemySpawned { .. })));
}

#[test]
fn test_plugin_consumes_intents() {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app.update();
    app.update();

    app.world_mut().send_event(InputIntent::Fire);
    app.update();
    assert_eq!(app.world().resource::<Simulation>().player().weapon().ammo(), 29);

    app.world_mut().send_event(InputIntent::TogglePause);
    app.update();
    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.phase(), GamePhase::Paused);

    let ticks = simulation.tick_count();
    app.update();
    assert_eq!(app.world().resource::<Simulation>().tick_count(), ticks);
}

#[test]
fn test_plugin_respects_inserted_config() {
    let mut app = create_headless_app(1);
    app.insert_resource(SimulationConfig {
        seed: 99,
        ..arena_config(WaveConfig::default())
    });
    app.add_plugins(SimulationPlugin);

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.seed(), 99);
    assert!(simulation.level().boxes().is_empty());
}
