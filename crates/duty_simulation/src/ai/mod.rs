//! Enemy AI
//!
//! Simple distance-driven FSM: Idle → Chasing → Attacking, Dead is terminal.
//! Direct-vector pursuit only, no pathfinding. Distances are measured in the
//! XZ plane (the player's eye height does not count).

pub mod components;
pub mod enemy;

pub use components::{AIState, EnemyConfig};
pub use enemy::{AttackTarget, Enemy};

#[cfg(test)]
mod enemy_tests;
