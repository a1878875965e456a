use crate::{Aabb, Point, Vector};

/// A parametric ray: `origin + t * direction`.
///
/// The direction is not normalized; when built with [`Ray::between`] the
/// parameter `t = 1` lands exactly on the destination point, which is what
/// the segment-bounded traces rely on. A zero component means the ray is
/// parallel to that axis and the plane-intersection methods return `None`
/// for it instead of dividing.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ray {
    /// Ray origin.
    pub origin: Point,
    /// Ray direction (not necessarily unit length).
    pub direction: Vector,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    pub const fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Ray from `src` pointing at `dest`, with `dest` at `t = 1`.
    pub fn between(src: Point, dest: Point) -> Self {
        Self::new(src, Vector::between(src, dest))
    }

    /// Point at parametric distance `t`.
    pub fn point_at(&self, t: f64) -> Point {
        self.origin.translated(self.direction * t)
    }

    /// Parametric distance at which the ray crosses the plane `x = value`,
    /// or `None` if the ray is parallel to it.
    pub fn intersect_x(&self, value: f64) -> Option<f64> {
        if self.direction.x == 0.0 {
            return None;
        }
        Some((value - self.origin.x) / self.direction.x)
    }

    /// Parametric distance at which the ray crosses the plane `y = value`,
    /// or `None` if the ray is parallel to it.
    pub fn intersect_y(&self, value: f64) -> Option<f64> {
        if self.direction.y == 0.0 {
            return None;
        }
        Some((value - self.origin.y) / self.direction.y)
    }

    /// Parametric distance at which the ray crosses the plane `z = value`,
    /// or `None` if the ray is parallel to it.
    pub fn intersect_z(&self, value: f64) -> Option<f64> {
        if self.direction.z == 0.0 {
            return None;
        }
        Some((value - self.origin.z) / self.direction.z)
    }

    /// Points where the ray enters and exits `aabb`, in ray order.
    ///
    /// Slab method: each axis constrains the valid parameter interval to the
    /// span between its two bounding planes; an axis the ray is parallel to
    /// contributes no constraint when the origin already lies within its
    /// slab, and rules out the intersection entirely when it does not. The
    /// surviving interval is clamped to `t >= 0` (the box may sit behind the
    /// origin). Returns 0 points for a miss, 1 for a graze of an edge or
    /// corner, 2 otherwise.
    pub fn intersect(&self, aabb: &Aabb) -> Vec<Point> {
        let origin = [self.origin.x, self.origin.y, self.origin.z];
        let dir = [self.direction.x, self.direction.y, self.direction.z];
        let lo = [aabb.min.x, aabb.min.y, aabb.min.z];
        let hi = [aabb.max.x, aabb.max.y, aabb.max.z];

        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        for axis in 0..3 {
            if dir[axis] == 0.0 {
                if origin[axis] < lo[axis] || origin[axis] > hi[axis] {
                    return Vec::new();
                }
                continue;
            }
            let t1 = (lo[axis] - origin[axis]) / dir[axis];
            let t2 = (hi[axis] - origin[axis]) / dir[axis];
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        // A fully degenerate direction leaves the interval unbounded.
        if !t_exit.is_finite() {
            return Vec::new();
        }

        let t_enter = t_enter.max(0.0);
        if t_enter > t_exit {
            return Vec::new();
        }
        if t_enter == t_exit {
            return vec![self.point_at(t_enter)];
        }
        vec![self.point_at(t_enter), self.point_at(t_exit)]
    }
}
