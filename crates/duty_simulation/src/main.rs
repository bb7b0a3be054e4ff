//! Headless Duty simulation
//!
//! Runs the Bevy App without rendering, with a trivial autopilot that turns
//! towards the nearest enemy and holds the trigger.

use duty_simulation::{create_headless_app, log_info, InputIntent, Simulation, SimulationPlugin};

fn main() {
    let seed = 42;
    println!("Starting Duty headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    for tick in 0..1000 {
        for intent in autopilot(app.world().resource::<Simulation>()) {
            app.world_mut().send_event(intent);
        }
        app.update();

        if tick % 100 == 0 {
            let snapshot = app.world().resource::<Simulation>().snapshot();
            println!(
                "Tick {}: t={:.2}s wave {} | hp {} | ammo {}/{} | {} enemies, {} kills",
                tick,
                snapshot.clock,
                snapshot.wave,
                snapshot.player.health,
                snapshot.weapon.ammo,
                snapshot.weapon.max_ammo,
                snapshot.enemies.len(),
                snapshot.enemies_killed
            );
        }
    }

    let simulation = app.world().resource::<Simulation>();
    log_info(&format!(
        "Simulation complete: {:?}, {} kills",
        simulation.phase(),
        simulation.enemy_manager().enemies_killed()
    ));
}

/// Face the nearest live enemy, fire, reload when dry.
fn autopilot(simulation: &Simulation) -> Vec<InputIntent> {
    let player = simulation.player();
    let nearest = simulation
        .enemy_manager()
        .enemies()
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| enemy.position() - player.position())
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    let Some(offset) = nearest else {
        return Vec::new();
    };

    // forward = (-sin yaw, 0, -cos yaw)
    let target_yaw = (-offset.x).atan2(-offset.z);
    let mut intents = vec![InputIntent::Look {
        delta_yaw: target_yaw - player.yaw(),
        delta_pitch: -player.pitch(),
    }];

    if player.weapon().is_out_of_ammo() {
        intents.push(InputIntent::Reload);
    } else {
        intents.push(InputIntent::Fire);
    }
    intents
}
