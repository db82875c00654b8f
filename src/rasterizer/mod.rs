//! Z-buffer software rasterizer
//!
//! Features:
//! - Camera with accumulated X/Y/Z rotation and multiplicative zoom
//! - Fixed-FOV perspective projection
//! - Barycentric scan conversion with a per-pixel depth test
//! - Gouraud shading from a single directional light

mod camera;
mod math;
mod types;
mod render;

pub use camera::*;
pub use math::*;
pub use types::*;
pub use render::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;

/// Perspective strength: `scale = FOV / (FOV + z)`
pub const FOV: f64 = 300.0;
