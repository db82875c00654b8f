//! World module - solids and scene descriptions
//!
//! - Geometry builder: vertices, faces and smoothed normals
//! - Material assignment: per-face colors
//! - Scene files: RON descriptions of solids, camera and light

mod geometry;
mod material;
mod scene;

pub use geometry::*;
pub use material::*;
pub use scene::*;
