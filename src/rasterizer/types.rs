//! Core types for the rasterizer

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    /// Per-channel factor of `darker()`
    pub const DARKEN_FACTOR: f64 = 0.7;

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `intensity`, truncating and clamping to 0-255.
    /// Intensity is not clamped, so values above 1.0 saturate.
    pub fn shade(self, intensity: f64) -> Self {
        let channel = |c: u8| (c as f64 * intensity).clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }

    /// Darkened variant used for the base face of a solid
    pub fn darker(self) -> Self {
        let channel = |c: u8| (c as f64 * Self::DARKEN_FACTOR) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }

    /// Convert to [u8; 4] RGBA for the framebuffer (opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// A world-space triangle with unit vertex normals and a flat base color.
/// Vertex order is kept but never used for culling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    pub n1: Vec3,
    pub n2: Vec3,
    pub n3: Vec3,
    pub color: Color,
}

impl Triangle {
    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3], color: Color) -> Self {
        Self {
            p1: positions[0],
            p2: positions[1],
            p3: positions[2],
            n1: normals[0],
            n2: normals[1],
            n3: normals[2],
            color,
        }
    }

    /// Triangle with the same normal at every vertex
    pub fn flat(positions: [Vec3; 3], normal: Vec3, color: Color) -> Self {
        Self::new(positions, [normal; 3], color)
    }
}

/// Minimum lighting intensity, keeps unlit faces from going pure black
pub const AMBIENT_FLOOR: f64 = 0.2;

/// Single directional light, normalized once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Vec3,
}

impl Light {
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Per-vertex intensity: `max(0.2, n . l)`, not clamped above 1.0
    pub fn intensity(&self, normal: Vec3) -> f64 {
        normal.dot(self.direction).max(AMBIENT_FLOOR)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 200.0))
    }
}
