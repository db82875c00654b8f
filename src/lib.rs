//! Z-buffer software rasterizer with Gouraud shading
//!
//! Opaque triangles with per-vertex normals and colors are transformed by an
//! orbit camera, projected with a fixed field of view, scan-converted with
//! barycentric coordinates and resolved with a per-pixel depth buffer.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod export;
pub mod rasterizer;
pub mod world;
