//! Material assignment: turns solid geometry into colored triangles

use serde::{Deserialize, Serialize};
use crate::rasterizer::{Color, Triangle, Vec3};
use super::geometry::{tetrahedron, SolidGeometry};

/// Face colors for a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    /// Color of the geometry's base face
    pub base: Color,
}

impl Material {
    /// Base face gets the darkened variant of `color`
    pub fn new(color: Color) -> Self {
        Self {
            color,
            base: color.darker(),
        }
    }

    /// Same color on every face
    pub fn uniform(color: Color) -> Self {
        Self { color, base: color }
    }

    fn color_for(&self, geometry: &SolidGeometry, face: usize) -> Color {
        if geometry.base_face == Some(face) {
            self.base
        } else {
            self.color
        }
    }
}

/// Emit one triangle per face, in face order, sharing the precomputed vertex normals
pub fn paint(geometry: &SolidGeometry, material: &Material) -> Vec<Triangle> {
    (0..geometry.faces.len())
        .map(|face| {
            let (positions, normals) = geometry.face_corners(face);
            Triangle::new(positions, normals, material.color_for(geometry, face))
        })
        .collect()
}

/// The reference solid: four triangles, base face darkened
pub fn build_tetrahedron(center: Vec3, size: f64, color: Color) -> Vec<Triangle> {
    paint(&tetrahedron(center, size), &Material::new(color))
}
