use voxtrace_geom::{ChunkPos, Point, Ray, Vector, CHUNK_SIZE};

use crate::Hit;

/// Upper bound on chunks visited by one walk. The walk has no other
/// termination guarantee against degenerate direction or geometry data, so
/// exceeding it stops the trace with a diagnostic rather than running on.
pub const MAX_CHUNKS: u32 = 16;

/// Exclusive upper edge of the valid world-height range.
pub const WORLD_HEIGHT: f64 = 256.0;

/// Residency answer for one chunk of the walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChunkStatus {
    /// The chunk is not resident; the walk stops here.
    Unloaded,
    /// The chunk is resident, with the outcome of the host's own per-chunk
    /// collision checks, if any. The tracer treats it as one more candidate
    /// hit to merge by distance.
    Loaded(Option<Hit>),
}

/// Incremental raytrace across the chunks crossed by a ray.
///
/// The walk steps from the chunk containing the ray origin to whichever
/// neighbour the ray exits into, on X, Z, or both at an exact corner
/// crossing, merging each resident chunk's candidate hit by distance from
/// the origin. Chunk residency stays behind the lookup handed to
/// [`ChunkRaytrace::trace`]; the tracer is a per-call value with no shared
/// state.
#[derive(Debug, Clone, Copy)]
pub struct ChunkRaytrace {
    ray: Ray,
    src: Point,
    dest: Option<Point>,
    step_x: i32,
    step_z: i32,
}

impl ChunkRaytrace {
    /// Walk along `ray` with no destination bound.
    pub fn new(ray: Ray) -> Self {
        let step_x = if ray.direction.x < 0.0 { -1 } else { 1 };
        let step_z = if ray.direction.z < 0.0 { -1 } else { 1 };
        Self {
            src: ray.origin,
            ray,
            dest: None,
            step_x,
            step_z,
        }
    }

    /// Walk from `src` along `direction` with no destination bound.
    pub fn from_direction(src: Point, direction: Vector) -> Self {
        Self::new(Ray::new(src, direction))
    }

    /// Walk the segment from `src` to `dest`; reaching `dest` unobstructed
    /// produces a miss hit there.
    pub fn between(src: Point, dest: Point) -> Self {
        let mut walk = Self::new(Ray::between(src, dest));
        walk.dest = Some(dest);
        walk
    }

    /// Run the walk, querying `chunks` for residency and per-chunk candidate
    /// hits.
    ///
    /// The walk stops at the first of: the step bound, the exit point leaving
    /// the world-height range, the ray passing the destination, an unloaded
    /// chunk, or the exit point landing exactly on the destination. A ray
    /// parallel to both grid axes checks only its starting chunk. With a
    /// destination set the result is always `Some` (a miss at the destination
    /// when nothing was struck); without one it may be `None`.
    pub fn trace<F>(&self, mut chunks: F) -> Option<Hit>
    where
        F: FnMut(ChunkPos) -> ChunkStatus,
    {
        let mut first_hit: Option<Hit> = None;
        let mut current = ChunkPos::containing(self.src);
        let mut count: u32 = 0;
        let mut done = false;

        while !done && count <= MAX_CHUNKS {
            count += 1;

            let t_x = self
                .ray
                .intersect_x(boundary(current.x, self.ray.direction.x));
            let t_z = self
                .ray
                .intersect_z(boundary(current.z, self.ray.direction.z));
            let min = nearest(t_x, t_z);
            let exit = min.map(|t| self.ray.point_at(t));

            match exit {
                // Parallel to both grid axes, or leaving the world height
                // range: the current chunk is still checked below, then the
                // walk ends.
                None => done = true,
                Some(p) if p.y <= 0.0 || p.y >= WORLD_HEIGHT => done = true,
                Some(p) => {
                    if let Some(dest) = self.dest {
                        if self.src.distance_squared(dest) < self.src.distance_squared(p) {
                            done = true;
                        }
                    }
                }
            }

            match chunks(current) {
                ChunkStatus::Unloaded => done = true,
                ChunkStatus::Loaded(candidate) => {
                    first_hit = Hit::closest(self.src, first_hit, candidate);
                }
            }

            if !done {
                // Both axes advance when the ray exits exactly through a
                // chunk corner.
                if t_x == min {
                    current.x += self.step_x;
                }
                if t_z == min {
                    current.z += self.step_z;
                }
            }

            if self.dest.is_some() && exit == self.dest {
                done = true;
            }
        }

        if first_hit.is_none() {
            if let Some(dest) = self.dest {
                first_hit = Some(Hit::miss(dest, current.base()));
            }
        }

        if !done {
            tracing::warn!(
                chunk_x = current.x,
                chunk_z = current.z,
                max_chunks = MAX_CHUNKS,
                "chunk raytrace exceeded step bound"
            );
        }

        first_hit
    }
}

/// World-space coordinate of the chunk boundary the ray exits through on one
/// axis: the far edge when stepping positive, the near edge otherwise.
fn boundary(chunk_coord: i32, direction: f64) -> f64 {
    let edge = chunk_coord + if direction > 0.0 { 1 } else { 0 };
    (edge * CHUNK_SIZE) as f64
}

/// Smaller of two optional boundary distances; `None` only when both axes
/// are parallel to the ray.
fn nearest(t_x: Option<f64>, t_z: Option<f64>) -> Option<f64> {
    match (t_x, t_z) {
        (Some(x), Some(z)) => Some(x.min(z)),
        (Some(x), None) => Some(x),
        (None, Some(z)) => Some(z),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Face, HitKind};
    use voxtrace_geom::BlockPos;

    /// Lookup that records visited chunks and reports everything loaded and
    /// empty.
    fn recording(visited: &mut Vec<ChunkPos>) -> impl FnMut(ChunkPos) -> ChunkStatus + '_ {
        move |pos| {
            visited.push(pos);
            ChunkStatus::Loaded(None)
        }
    }

    #[test]
    fn unloaded_world_misses_at_destination() {
        let walk = ChunkRaytrace::between(Point::new(8.0, 64.0, 8.0), Point::new(100.0, 64.0, 8.0));
        let mut calls = 0;
        let hit = walk.trace(|_| {
            calls += 1;
            ChunkStatus::Unloaded
        });
        assert_eq!(calls, 1);
        let hit = hit.expect("destination set");
        assert_eq!(hit.kind, HitKind::Miss);
        assert_eq!(hit.point, Point::new(100.0, 64.0, 8.0));
        assert_eq!(hit.face, Face::Unknown);
    }

    #[test]
    fn vertical_ray_checks_only_starting_chunk() {
        let walk = ChunkRaytrace::between(Point::new(8.0, 10.0, 8.0), Point::new(8.0, 200.0, 8.0));
        let mut visited = Vec::new();
        let hit = walk.trace(recording(&mut visited));
        assert_eq!(visited, vec![ChunkPos::new(0, 0)]);
        assert_eq!(hit.map(|h| h.kind), Some(HitKind::Miss));
    }

    #[test]
    fn corner_crossing_advances_both_axes() {
        // Diagonal through the corner at (16, 16): the walk must go
        // (0,0) -> (1,1) -> (2,2) without visiting (1,0) or (0,1).
        let walk = ChunkRaytrace::between(Point::new(8.0, 64.0, 8.0), Point::new(40.0, 64.0, 40.0));
        let mut visited = Vec::new();
        walk.trace(recording(&mut visited));
        assert_eq!(
            visited,
            vec![ChunkPos::new(0, 0), ChunkPos::new(1, 1), ChunkPos::new(2, 2)]
        );
    }

    #[test]
    fn negative_direction_steps_down() {
        let walk = ChunkRaytrace::between(Point::new(8.0, 64.0, 8.0), Point::new(-40.0, 64.0, 8.0));
        let mut visited = Vec::new();
        walk.trace(recording(&mut visited));
        assert_eq!(
            visited,
            vec![
                ChunkPos::new(0, 0),
                ChunkPos::new(-1, 0),
                ChunkPos::new(-2, 0),
                ChunkPos::new(-3, 0),
            ]
        );
    }

    #[test]
    fn block_hit_preempts_miss() {
        let src = Point::new(8.0, 64.0, 8.0);
        let strike = Hit::block(
            Point::new(20.0, 64.0, 8.0),
            Face::West,
            BlockPos::new(20, 64, 8),
        );
        let walk = ChunkRaytrace::between(src, Point::new(100.0, 64.0, 8.0));
        let hit = walk.trace(|pos| {
            if pos == ChunkPos::new(1, 0) {
                ChunkStatus::Loaded(Some(strike))
            } else {
                ChunkStatus::Loaded(None)
            }
        });
        assert_eq!(hit, Some(strike));
    }

    #[test]
    fn closer_chunk_hit_wins_over_later_one() {
        let src = Point::new(8.0, 64.0, 8.0);
        let near = Hit::block(
            Point::new(20.0, 64.0, 8.0),
            Face::West,
            BlockPos::new(20, 64, 8),
        );
        let far = Hit::block(
            Point::new(36.0, 64.0, 8.0),
            Face::West,
            BlockPos::new(36, 64, 8),
        );
        let walk = ChunkRaytrace::between(src, Point::new(100.0, 64.0, 8.0));
        let hit = walk.trace(|pos| match pos {
            ChunkPos { x: 1, z: 0 } => ChunkStatus::Loaded(Some(near)),
            ChunkPos { x: 2, z: 0 } => ChunkStatus::Loaded(Some(far)),
            _ => ChunkStatus::Loaded(None),
        });
        assert_eq!(hit, Some(near));
    }

    #[test]
    fn step_bound_stops_runaway_walk() {
        // Destination far beyond the bound: the walk gives up after
        // MAX_CHUNKS + 1 chunks and still reports a miss at the destination.
        let walk =
            ChunkRaytrace::between(Point::new(0.5, 64.0, 8.0), Point::new(1000.0, 64.0, 8.0));
        let mut calls = 0u32;
        let hit = walk.trace(|_| {
            calls += 1;
            ChunkStatus::Loaded(None)
        });
        assert_eq!(calls, MAX_CHUNKS + 1);
        assert_eq!(hit.map(|h| h.kind), Some(HitKind::Miss));
    }

    #[test]
    fn exit_above_world_height_stops_walk() {
        let walk =
            ChunkRaytrace::between(Point::new(8.0, 250.0, 8.0), Point::new(108.0, 350.0, 8.0));
        let mut visited = Vec::new();
        walk.trace(recording(&mut visited));
        assert_eq!(visited, vec![ChunkPos::new(0, 0)]);
    }

    #[test]
    fn no_destination_and_no_hit_is_none() {
        let walk = ChunkRaytrace::from_direction(
            Point::new(8.0, 64.0, 8.0),
            Vector::new(0.0, 1.0, 0.0),
        );
        assert_eq!(walk.trace(|_| ChunkStatus::Loaded(None)), None);
    }

    #[test]
    fn repeated_walks_are_bit_identical() {
        let walk = ChunkRaytrace::between(Point::new(8.3, 64.0, 8.7), Point::new(43.0, 60.0, 29.0));
        let lookup = |_: ChunkPos| ChunkStatus::Loaded(None);
        assert_eq!(walk.trace(lookup), walk.trace(lookup));
    }
}
