//! Vector math for 3D rendering

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector (points and directions alike)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction.
    /// A zero-length input yields the zero vector, not NaN.
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// Arithmetic mean of any number of normals (zero vector for an empty slice).
/// Callers renormalize the result.
pub fn average_normals(normals: &[Vec3]) -> Vec3 {
    if normals.is_empty() {
        return Vec3::ZERO;
    }
    let sum = normals.iter().fold(Vec3::ZERO, |acc, &n| acc + n);
    sum.scale(1.0 / normals.len() as f64)
}

/// Right-handed rotation about the X axis
pub fn rotate_x(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3 {
        x: p.x,
        y: p.y * cos - p.z * sin,
        z: p.y * sin + p.z * cos,
    }
}

/// Right-handed rotation about the Y axis
pub fn rotate_y(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3 {
        x: p.x * cos + p.z * sin,
        y: p.y,
        z: -p.x * sin + p.z * cos,
    }
}

/// Right-handed rotation about the Z axis
pub fn rotate_z(p: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3 {
        x: p.x * cos - p.y * sin,
        y: p.x * sin + p.y * cos,
        z: p.z,
    }
}

/// Project a camera-space point to screen coordinates.
/// Returns (screen_x, screen_y, camera_z); the camera-space z is kept for depth testing.
/// Screen Y grows downwards, so camera Y is flipped.
pub fn project(v: Vec3, fov: f64, width: usize, height: usize) -> Vec3 {
    let scale = fov / (fov + v.z);
    Vec3 {
        x: v.x * scale + (width / 2) as f64,
        y: -v.y * scale + (height / 2) as f64,
        z: v.z,
    }
}

/// Determinants smaller than this are treated as a collinear (zero-area) triangle
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Calculate barycentric coordinates (alpha, beta, gamma) of pixel (px, py)
/// relative to the screen-space triangle (v1, v2, v3).
/// Returns None for a degenerate triangle.
pub fn barycentric(px: f64, py: f64, v1: Vec3, v2: Vec3, v3: Vec3) -> Option<(f64, f64, f64)> {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.is_nan() || d.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let alpha = ((v2.y - v3.y) * (px - v3.x) + (v3.x - v2.x) * (py - v3.y)) / d;
    let beta = ((v3.y - v1.y) * (px - v3.x) + (v1.x - v3.x) * (py - v3.y)) / d;
    let gamma = 1.0 - alpha - beta;

    Some((alpha, beta, gamma))
}

/// Inside-triangle test with inclusive edges. NaN weights never pass.
pub fn is_inside(alpha: f64, beta: f64, gamma: f64) -> bool {
    alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
}
