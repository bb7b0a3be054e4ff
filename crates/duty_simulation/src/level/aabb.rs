//! Axis-aligned boxes: overlap and ray queries.

use bevy::prelude::*;

/// Axis-aligned bounding box.
///
/// Invariant: `min <= max` on every axis (constructors normalise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Cube of half extent `radius` around `center` (entity collision volume).
    pub fn around(center: Vec3, radius: f32) -> Self {
        Self::from_center_size(center, Vec3::splat(radius * 2.0))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Strict overlap on all three axes; touching faces do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        ranges_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && ranges_overlap(self.min.y, self.max.y, other.min.y, other.max.y)
            && ranges_overlap(self.min.z, self.max.z, other.min.z, other.max.z)
    }

    /// Strict interior test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x > self.min.x
            && point.x < self.max.x
            && point.y > self.min.y
            && point.y < self.max.y
            && point.z > self.min.z
            && point.z < self.max.z
    }

    /// Slab test. Returns the entry distance along `direction` (unit) if the
    /// ray reaches the box within `max_distance`. A ray starting inside hits
    /// at distance 0.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let local = origin - self.center();
        let half = self.half_extents();

        let (t_min, t_max) = slab_interval(local.x, direction.x, half.x, 0.0, max_distance)?;
        let (t_min, t_max) = slab_interval(local.y, direction.y, half.y, t_min, t_max)?;
        let (t_min, _) = slab_interval(local.z, direction.z, half.z, t_min, t_max)?;

        Some(t_min)
    }
}

fn slab_interval(local_coord: f32, ray_dir: f32, half_extent: f32, t_min: f32, t_max: f32) -> Option<(f32, f32)> {
    if ray_dir.abs() > 1e-6 {
        let t1 = (-half_extent - local_coord) / ray_dir;
        let t2 = (half_extent - local_coord) / ray_dir;
        let new_min = t_min.max(t1.min(t2));
        let new_max = t_max.min(t1.max(t2));
        if new_min <= new_max {
            Some((new_min, new_max))
        } else {
            None
        }
    } else if local_coord.abs() > half_extent {
        // Parallel to this slab and outside it
        None
    } else {
        Some((t_min, t_max))
    }
}

fn ranges_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min < b_max && a_max > b_min
}
