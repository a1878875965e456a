use crate::{BlockPos, Point, Vector};

/// Axis-aligned bounding box used for block collision geometry.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Point, max: Point) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Unit cube spanning (0,0,0)-(1,1,1), the full-block collision shape.
    pub fn unit() -> Self {
        Self::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0))
    }

    /// Copy translated by an integer block coordinate. Block geometry is
    /// expressed relative to its block; this places it in world space.
    pub fn offset(self, pos: BlockPos) -> Self {
        let v = Vector::new(pos.x as f64, pos.y as f64, pos.z as f64);
        Self {
            min: self.min.translated(v),
            max: self.max.translated(v),
        }
    }

    /// Tests whether a point lies inside or on the boundary of the box.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}
