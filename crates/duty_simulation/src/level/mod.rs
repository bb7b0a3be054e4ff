//! Static level geometry and collision queries.
//!
//! Built once from a `LevelLayout`, immutable afterwards. All queries are
//! total: an empty level answers "no collision" / "no hit".

use bevy::prelude::*;

pub mod aabb;
pub mod layout;

pub use aabb::Aabb;
pub use layout::{BoxSpec, LevelError, LevelLayout};


/// Play-area half extent used when no layout provides one.
pub const DEFAULT_PLAY_AREA: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Wall,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub kind: BoxKind,
    pub bounds: Aabb,
}

/// Nearest static box hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    /// Index into `LevelGeometry::boxes()`
    pub box_index: usize,
    pub kind: BoxKind,
}

#[derive(Debug, Clone)]
pub struct LevelGeometry {
    boxes: Vec<StaticBox>,
    player_spawn: Vec3,
    enemy_spawns: Vec<Vec3>,
    play_area_half_extent: f32,
    level_half_size: f32,
}

impl Default for LevelGeometry {
    fn default() -> Self {
        Self::empty()
    }
}

impl LevelGeometry {
    /// No geometry and no spawn points (level not loaded).
    pub fn empty() -> Self {
        Self {
            boxes: Vec::new(),
            player_spawn: Vec3::new(0.0, 1.8, 0.0),
            enemy_spawns: Vec::new(),
            play_area_half_extent: DEFAULT_PLAY_AREA,
            level_half_size: DEFAULT_PLAY_AREA + 2.0,
        }
    }

    pub fn from_layout(layout: &LevelLayout) -> Result<Self, LevelError> {
        let half = layout.play_area_half_extent;
        if !(half.is_finite() && half > 0.0) {
            return Err(LevelError::InvalidPlayArea(half));
        }

        let specs = layout
            .walls
            .iter()
            .map(|spec| (BoxKind::Wall, spec))
            .chain(layout.obstacles.iter().map(|spec| (BoxKind::Obstacle, spec)));

        let mut boxes = Vec::with_capacity(layout.walls.len() + layout.obstacles.len());
        for (index, (kind, spec)) in specs.enumerate() {
            let center = Vec3::from_array(spec.center);
            let size = Vec3::from_array(spec.size);
            if !(center.is_finite() && size.is_finite()) {
                return Err(LevelError::NonFiniteBox { index });
            }
            boxes.push(StaticBox {
                kind,
                bounds: Aabb::from_center_size(center, size),
            });
        }

        let player_spawn = Vec3::from_array(layout.player_spawn);
        if boxes.iter().any(|b| b.bounds.contains_point(player_spawn)) {
            return Err(LevelError::PlayerSpawnInsideGeometry(layout.player_spawn));
        }

        for (index, spawn) in layout.enemy_spawns.iter().enumerate() {
            let point = Vec3::from_array(*spawn);
            if boxes.iter().any(|b| b.bounds.contains_point(point)) {
                return Err(LevelError::EnemySpawnInsideGeometry {
                    index,
                    position: *spawn,
                });
            }
        }

        Ok(Self {
            boxes,
            player_spawn,
            enemy_spawns: layout.enemy_spawns.iter().copied().map(Vec3::from_array).collect(),
            play_area_half_extent: half,
            level_half_size: layout.level_half_size,
        })
    }

    /// First box (insertion order) overlapping the cube of half
    /// extent `radius` around `position`.
    pub fn check_collision(&self, position: Vec3, radius: f32) -> Option<&StaticBox> {
        let cube = Aabb::around(position, radius);
        self.boxes.iter().find(|b| cube.intersects(&b.bounds))
    }

    pub fn collides(&self, position: Vec3, radius: f32) -> bool {
        self.check_collision(position, radius).is_some()
    }

    /// Axis-separated slide: full move, then X only, then Z only, else stay.
    pub fn get_valid_position(&self, current: Vec3, proposed: Vec3, radius: f32) -> Vec3 {
        if !self.collides(proposed, radius) {
            return proposed;
        }

        let x_only = Vec3::new(proposed.x, current.y, current.z);
        if !self.collides(x_only, radius) {
            return x_only;
        }

        let z_only = Vec3::new(current.x, current.y, proposed.z);
        if !self.collides(z_only, radius) {
            return z_only;
        }

        current
    }

    /// Nearest static box along a unit `direction` within `max_distance`.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.boxes
            .iter()
            .enumerate()
            .filter_map(|(index, b)| {
                b.bounds
                    .ray_intersection(origin, direction, max_distance)
                    .map(|distance| (index, b, distance))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(box_index, b, distance)| RayHit {
                point: origin + direction * distance,
                distance,
                box_index,
                kind: b.kind,
            })
    }

    /// Inside the room (shrunk by `margin`) and within the vertical band.
    pub fn is_within_bounds(&self, position: Vec3, margin: f32) -> bool {
        let limit = self.level_half_size - margin;
        position.x.abs() <= limit && position.z.abs() <= limit && (-0.5..=10.0).contains(&position.y)
    }

    /// Horizontal clamp to the play area; Y untouched.
    pub fn clamp_to_play_area(&self, position: Vec3) -> Vec3 {
        let half = self.play_area_half_extent;
        Vec3::new(position.x.clamp(-half, half), position.y, position.z.clamp(-half, half))
    }

    pub fn boxes(&self) -> &[StaticBox] {
        &self.boxes
    }

    pub fn player_spawn(&self) -> Vec3 {
        self.player_spawn
    }

    pub fn enemy_spawns(&self) -> &[Vec3] {
        &self.enemy_spawns
    }

    pub fn play_area_half_extent(&self) -> f32 {
        self.play_area_half_extent
    }
}
