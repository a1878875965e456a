//! Closest-hit ray tracing against block collision boxes and across the
//! chunk grid.
//!
//! Two operations are exposed: [`BlockRaytrace`] finds the closest struck
//! point and face among one block's collision boxes, and [`ChunkRaytrace`]
//! walks the chunks crossed by a ray, merging per-chunk candidate hits by
//! distance. Both are short-lived values built per trace; world and chunk
//! storage stay behind caller-supplied lookups so the tracer owns no engine
//! state and is freely reentrant.

mod block;
mod chunk;
mod hit;

pub use block::*;
pub use chunk::*;
pub use hit::*;
