use voxtrace_geom::{Aabb, BlockPos, Point, Ray, Vector};

use crate::{Face, Hit};

/// Tolerance for matching a hit point to a box face plane.
///
/// Intersection points come out of `origin + t * direction` while face planes
/// are raw box coordinates; the two arithmetic paths need not agree to the
/// last bit, so matching is tolerance-based rather than exact.
pub const FACE_EPSILON: f64 = 1e-7;

/// Closest-hit raytrace against the collision boxes of a single block.
///
/// Built fresh per trace; holds only the segment being traced and the block
/// coordinate. The box lookup is supplied to [`BlockRaytrace::trace`] so the
/// tracer never owns world storage.
#[derive(Debug, Clone, Copy)]
pub struct BlockRaytrace {
    ray: Ray,
    src: Point,
    dest: Point,
    block: BlockPos,
}

impl BlockRaytrace {
    /// Trace the segment from `src` to `dest` against the block at `block`.
    pub fn new(src: Point, dest: Point, block: BlockPos) -> Self {
        Self {
            ray: Ray::between(src, dest),
            src,
            dest,
            block,
        }
    }

    /// Trace from `src` along `direction`, with the segment ending at
    /// `src + direction`.
    pub fn from_direction(src: Point, direction: Vector, block: BlockPos) -> Self {
        let ray = Ray::new(src, direction);
        Self {
            src,
            dest: ray.point_at(1.0),
            ray,
            block,
        }
    }

    /// Direction of the trace.
    pub fn direction(&self) -> Vector {
        self.ray.direction
    }

    /// Length of the traced segment.
    pub fn distance(&self) -> f64 {
        self.ray.direction.length()
    }

    /// Find the closest hit among the block's collision boxes.
    ///
    /// `boxes` yields the block's collision geometry relative to the block
    /// origin; absent entries are skipped. Only intersection points strictly
    /// within the segment (closer to `src` than `dest` is) count. Returns
    /// `None` when nothing qualifies, letting the caller fall back to its own
    /// un-boxed collision check.
    ///
    /// Face determination scans the candidate boxes in west, east, down, up,
    /// north, south order and reports the first face plane the hit point lies
    /// on within [`FACE_EPSILON`]. A point on an edge or corner shared by
    /// several boxes may therefore report the face of an earlier box; this is
    /// a known limitation kept from the design, not a defect to compensate
    /// for here.
    pub fn trace<F>(&self, mut boxes: F) -> Option<Hit>
    where
        F: FnMut(BlockPos) -> Vec<Option<Aabb>>,
    {
        let candidates: Vec<Aabb> = boxes(self.block)
            .into_iter()
            .flatten()
            .map(|aabb| aabb.offset(self.block))
            .collect();

        let max_dist = self.src.distance_squared(self.dest);
        let mut closest: Option<(f64, Point)> = None;
        for aabb in &candidates {
            for p in self.ray.intersect(aabb) {
                let d = self.src.distance_squared(p);
                if d < max_dist && closest.map_or(true, |(best, _)| d < best) {
                    closest = Some((d, p));
                }
            }
        }

        let (_, point) = closest?;
        Some(Hit::block(point, face_at(&candidates, point), self.block))
    }
}

/// First face plane among `aabbs` that `point` lies on, in west, east, down,
/// up, north, south order.
fn face_at(aabbs: &[Aabb], point: Point) -> Face {
    for aabb in aabbs {
        if (point.x - aabb.min.x).abs() <= FACE_EPSILON {
            return Face::West;
        }
        if (point.x - aabb.max.x).abs() <= FACE_EPSILON {
            return Face::East;
        }
        if (point.y - aabb.min.y).abs() <= FACE_EPSILON {
            return Face::Down;
        }
        if (point.y - aabb.max.y).abs() <= FACE_EPSILON {
            return Face::Up;
        }
        if (point.z - aabb.min.z).abs() <= FACE_EPSILON {
            return Face::North;
        }
        if (point.z - aabb.max.z).abs() <= FACE_EPSILON {
            return Face::South;
        }
    }
    Face::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HitKind;

    fn full_block(_: BlockPos) -> Vec<Option<Aabb>> {
        vec![Some(Aabb::unit())]
    }

    #[test]
    fn diagonal_segment_strikes_west_face() {
        // Ray through the block at (2,9,2); entry point lies on both the
        // west and south planes, and west wins by scan order.
        let trace = BlockRaytrace::new(
            Point::new(0.0, 10.0, 0.0),
            Point::new(5.0, 10.0, 5.0),
            BlockPos::new(2, 9, 2),
        );
        let hit = trace.trace(full_block).expect("block in path");
        assert_eq!(hit.kind, HitKind::Block);
        assert_eq!(hit.face, Face::West);
        assert_eq!(hit.block, BlockPos::new(2, 9, 2));
        assert!(hit.point.approx_eq(Point::new(2.0, 10.0, 2.0), 1e-9));
    }

    #[test]
    fn block_beyond_segment_is_ignored() {
        let trace = BlockRaytrace::new(
            Point::new(0.5, 0.5, 0.5),
            Point::new(3.0, 0.5, 0.5),
            BlockPos::new(5, 0, 0),
        );
        assert!(trace.trace(full_block).is_none());
    }

    #[test]
    fn absent_boxes_are_skipped() {
        let trace = BlockRaytrace::new(
            Point::new(-1.0, 0.5, 0.5),
            Point::new(3.0, 0.5, 0.5),
            BlockPos::new(0, 0, 0),
        );
        let hit = trace
            .trace(|_| vec![None, Some(Aabb::unit()), None])
            .expect("present box still hit");
        assert_eq!(hit.face, Face::West);
        assert!(hit.point.approx_eq(Point::new(0.0, 0.5, 0.5), 1e-9));
    }

    #[test]
    fn empty_geometry_yields_none() {
        let trace = BlockRaytrace::new(
            Point::new(-1.0, 0.5, 0.5),
            Point::new(3.0, 0.5, 0.5),
            BlockPos::new(0, 0, 0),
        );
        assert!(trace.trace(|_| Vec::new()).is_none());
        assert!(trace.trace(|_| vec![None, None]).is_none());
    }

    #[test]
    fn closest_of_two_boxes_wins() {
        // Two half-slabs; the ray meets the lower one first.
        let slabs = |_: BlockPos| {
            vec![
                Some(Aabb::new(
                    Point::new(0.0, 0.0, 0.0),
                    Point::new(1.0, 0.5, 1.0),
                )),
                Some(Aabb::new(
                    Point::new(0.0, 0.5, 0.0),
                    Point::new(1.0, 1.0, 1.0),
                )),
            ]
        };
        let trace = BlockRaytrace::new(
            Point::new(0.5, -1.0, 0.5),
            Point::new(0.5, 2.0, 0.5),
            BlockPos::new(0, 0, 0),
        );
        let hit = trace.trace(slabs).expect("slab in path");
        assert_eq!(hit.face, Face::Down);
        assert!(hit.point.approx_eq(Point::new(0.5, 0.0, 0.5), 1e-9));
    }

    #[test]
    fn direction_constructor_matches_segment_form() {
        let src = Point::new(0.0, 10.0, 0.0);
        let dest = Point::new(5.0, 10.0, 5.0);
        let a = BlockRaytrace::new(src, dest, BlockPos::new(2, 9, 2));
        let b = BlockRaytrace::from_direction(
            src,
            Vector::between(src, dest),
            BlockPos::new(2, 9, 2),
        );
        assert_eq!(a.trace(full_block), b.trace(full_block));
    }

    #[test]
    fn repeated_traces_are_bit_identical() {
        let trace = BlockRaytrace::new(
            Point::new(0.1, 10.2, 0.3),
            Point::new(5.4, 9.5, 5.6),
            BlockPos::new(2, 9, 2),
        );
        assert_eq!(trace.trace(full_block), trace.trace(full_block));
    }
}
