#![warn(missing_docs)]
//! Geometric primitives for voxel ray tracing: points, vectors, rays,
//! axis-aligned boxes, and integer block/chunk coordinates.
//!
//! All types are plain `f64`/`i32` value types created per call; conversions
//! to and from `glam` live at the crate boundary so callers using the engine's
//! native vector types pay no friction.

mod aabb;
mod point;
mod pos;
mod ray;
mod vector;

pub use aabb::*;
pub use point::*;
pub use pos::*;
pub use ray::*;
pub use vector::*;
