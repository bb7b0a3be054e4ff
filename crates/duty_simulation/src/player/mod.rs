//! Player control
//!
//! The core only sees intents (held movement keys, look deltas, fire/reload).
//! Device state and mouse sensitivity stay with the input collaborator.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod player;

pub use config::PlayerConfig;
pub use player::Player;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Held movement intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntents {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
}

impl MovementIntents {
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        match direction {
            MoveDirection::Forward => self.forward = pressed,
            MoveDirection::Backward => self.backward = pressed,
            MoveDirection::Left => self.left = pressed,
            MoveDirection::Right => self.right = pressed,
        }
    }
}
