//! Orbit-style camera: accumulated rotation angles plus a zoom factor

use super::math::{rotate_x, rotate_y, rotate_z, Vec3};
use serde::{Deserialize, Serialize};

/// Camera state
///
/// Angles are unbounded accumulators in radians; zoom is a multiplicative
/// accumulator starting at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
    pub zoom: f64,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            zoom: 1.0,
        }
    }

    /// Add deltas to the accumulated angles. No wrapping.
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.angle_x += dx;
        self.angle_y += dy;
        self.angle_z += dz;
    }

    /// Multiply the accumulated zoom by `scale`.
    /// Non-positive factors are applied as-is and flip or collapse the image.
    pub fn zoom(&mut self, scale: f64) {
        if scale <= 0.0 {
            tracing::warn!(scale, zoom = self.zoom, "applying non-positive zoom factor");
        }
        self.zoom *= scale;
    }

    /// World point to camera space: rotate about X, then Y, then Z, then scale by zoom
    pub fn transform(&self, p: Vec3) -> Vec3 {
        let rotated = rotate_x(p, self.angle_x);
        let rotated = rotate_y(rotated, self.angle_y);
        let rotated = rotate_z(rotated, self.angle_z);
        rotated.scale(self.zoom)
    }

    /// World normal to camera space: rotate about Z, then Y, then X; never scaled.
    ///
    /// The composition order is the reverse of `transform`. Each rotation is
    /// orthogonal so no inverse-transpose is computed. Keep all normal math
    /// behind this function.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        let rotated = rotate_z(n, self.angle_z);
        let rotated = rotate_y(rotated, self.angle_y);
        rotate_x(rotated, self.angle_x)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
