//! Declarative level description + validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Box described by center and full size (world units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl BoxSpec {
    pub const fn new(center: [f32; 3], size: [f32; 3]) -> Self {
        Self { center, size }
    }
}

/// Static arena layout: walls, cover, spawn points.
///
/// Walls are inserted before obstacles, which fixes the order collision
/// queries report boxes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub walls: Vec<BoxSpec>,
    pub obstacles: Vec<BoxSpec>,
    pub player_spawn: [f32; 3],
    pub enemy_spawns: Vec<[f32; 3]>,
    /// Entities are clamped to ±this on X and Z
    pub play_area_half_extent: f32,
    /// Half size of the room (wall centers), used by bounds queries
    pub level_half_size: f32,
}

impl Default for LevelLayout {
    /// 40×40 room with a central pillar and four cover blocks.
    fn default() -> Self {
        let size = 20.0;
        let height = 5.0;
        let thickness = 1.0;

        Self {
            walls: vec![
                BoxSpec::new([0.0, height / 2.0, -size], [size * 2.0, height, thickness]), // north
                BoxSpec::new([0.0, height / 2.0, size], [size * 2.0, height, thickness]),  // south
                BoxSpec::new([size, height / 2.0, 0.0], [thickness, height, size * 2.0]),  // east
                BoxSpec::new([-size, height / 2.0, 0.0], [thickness, height, size * 2.0]), // west
            ],
            obstacles: vec![
                BoxSpec::new([0.0, 2.0, 0.0], [2.0, 4.0, 2.0]),
                BoxSpec::new([8.0, 1.5, 8.0], [5.0, 3.0, 3.0]),
                BoxSpec::new([-8.0, 1.5, -8.0], [3.0, 3.0, 5.0]),
                BoxSpec::new([5.0, 1.5, -5.0], [6.0, 3.0, 3.0]),
                BoxSpec::new([-5.0, 1.5, 5.0], [3.0, 3.0, 6.0]),
            ],
            // Just south of the pillar
            player_spawn: [0.0, 1.8, 4.0],
            enemy_spawns: vec![
                [10.0, 0.0, 10.0],
                [-10.0, 0.0, 10.0],
                [10.0, 0.0, -10.0],
                [-10.0, 0.0, -10.0],
            ],
            play_area_half_extent: 18.0,
            level_half_size: size,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("enemy spawn point {index} at {position:?} lies inside static geometry")]
    EnemySpawnInsideGeometry { index: usize, position: [f32; 3] },

    #[error("player spawn at {0:?} lies inside static geometry")]
    PlayerSpawnInsideGeometry([f32; 3]),

    #[error("play area half extent must be positive and finite, got {0}")]
    InvalidPlayArea(f32),

    #[error("box {index} has a non-finite center or size")]
    NonFiniteBox { index: usize },
}
