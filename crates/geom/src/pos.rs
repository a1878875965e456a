use std::fmt;

use crate::Point;

/// Chunk width/depth in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Integer block coordinate (X, Y, Z) in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BlockPos {
    /// Block X coordinate.
    pub x: i32,
    /// Block Y coordinate.
    pub y: i32,
    /// Block Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing the given world-space point (floor per axis).
    pub fn containing(p: Point) -> Self {
        Self::new(
            p.x.floor() as i32,
            p.y.floor() as i32,
            p.z.floor() as i32,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk coordinate (X, Z) in chunk space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    /// Chunk X coordinate.
    pub x: i32,
    /// Chunk Z coordinate.
    pub z: i32,
}

impl ChunkPos {
    /// Create a new chunk position.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given world-space point (floor division by
    /// [`CHUNK_SIZE`]).
    pub fn containing(p: Point) -> Self {
        Self::new(
            (p.x.floor() as i32).div_euclid(CHUNK_SIZE),
            (p.z.floor() as i32).div_euclid(CHUNK_SIZE),
        )
    }

    /// Block position of this chunk's minimum corner (y = 0).
    pub const fn base(self) -> BlockPos {
        BlockPos::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
