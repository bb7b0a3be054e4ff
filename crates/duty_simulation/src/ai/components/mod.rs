//! AI components (FSM state, enemy tuning).

pub mod fsm;

pub use fsm::{AIState, EnemyConfig};
