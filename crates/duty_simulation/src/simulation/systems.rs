//! Bevy systems driving `Simulation` (registered by `SimulationPlugin`).
//!
//! All three run in FixedUpdate, chained:
//! apply_input_intents → advance_simulation → publish_simulation_events

use bevy::prelude::*;

use super::Simulation;
use crate::events::{InputIntent, SimulationEvent};

/// System: InputIntent events → player intents
pub fn apply_input_intents(mut simulation: ResMut<Simulation>, mut intents: EventReader<InputIntent>) {
    for intent in intents.read() {
        simulation.apply_intent(intent);
    }
}

/// System: one simulation tick per fixed step
pub fn advance_simulation(mut simulation: ResMut<Simulation>, time: Res<Time<Fixed>>) {
    simulation.tick(time.delta_secs());
}

/// System: queued simulation events → Bevy events (audio, UI, VFX listeners)
pub fn publish_simulation_events(mut simulation: ResMut<Simulation>, mut events: EventWriter<SimulationEvent>) {
    for event in simulation.drain_events() {
        events.write(event);
    }
}
