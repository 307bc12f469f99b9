//! Axis-aligned bounding boxes

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of an entity standing at `feet` with the given footprint
    pub fn from_feet(feet: DVec3, width: f64, height: f64) -> Self {
        let half = width / 2.0;
        Self {
            min: DVec3::new(feet.x - half, feet.y, feet.z - half),
            max: DVec3::new(feet.x + half, feet.y + height, feet.z + half),
        }
    }

    /// Grow the box by `amount` on every side
    pub fn expand(&self, amount: f64) -> Self {
        let grow = DVec3::splat(amount);
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

}
