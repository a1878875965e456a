use voxtrace_geom::{BlockPos, Point};

/// Block face struck by a ray, or `Unknown` when the hit point could not be
/// matched to a face plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Face {
    /// Negative X.
    West,
    /// Positive X.
    East,
    /// Negative Y.
    Down,
    /// Positive Y.
    Up,
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// No face plane matched.
    Unknown,
}

/// Whether a trace struck geometry or ran to its destination unobstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HitKind {
    /// Solid geometry was struck.
    Block,
    /// The destination was reached without obstruction.
    Miss,
}

/// Outcome of a raytrace.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hit {
    /// Block hit or miss.
    pub kind: HitKind,
    /// World-space point of the hit (for a miss, the destination).
    pub point: Point,
    /// Struck face; `Unknown` for misses.
    pub face: Face,
    /// Block coordinate of the struck block. A miss synthesized by the chunk
    /// walk carries the base corner of the last visited chunk instead.
    pub block: BlockPos,
}

impl Hit {
    /// A hit on solid geometry.
    pub const fn block(point: Point, face: Face, block: BlockPos) -> Self {
        Self {
            kind: HitKind::Block,
            point,
            face,
            block,
        }
    }

    /// An unobstructed miss at `point`.
    pub const fn miss(point: Point, block: BlockPos) -> Self {
        Self {
            kind: HitKind::Miss,
            point,
            face: Face::Unknown,
            block,
        }
    }

    /// The closer of two candidate hits, measured from `src`.
    ///
    /// Absent candidates are infinitely far; a miss loses to any block hit
    /// regardless of distance. Ties keep `a`, so callers folding candidates
    /// in encounter order keep the first.
    pub fn closest(src: Point, a: Option<Hit>, b: Option<Hit>) -> Option<Hit> {
        let (a, b) = match (a, b) {
            (None, None) => return None,
            (Some(a), None) => return Some(a),
            (None, Some(b)) => return Some(b),
            (Some(a), Some(b)) => (a, b),
        };
        match (a.kind, b.kind) {
            (HitKind::Block, HitKind::Miss) => Some(a),
            (HitKind::Miss, HitKind::Block) => Some(b),
            _ => {
                if src.distance_squared(a.point) <= src.distance_squared(b.point) {
                    Some(a)
                } else {
                    Some(b)
                }
            }
        }
    }
}
