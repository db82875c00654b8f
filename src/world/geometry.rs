//! Solid geometry builder
//!
//! Pure vertex/normal math: positions, triangular faces, face normals and
//! smoothed per-vertex normals. Colors are assigned separately (see `material`).
//!
//! Faces are wound so that `cross(b - a, c - a)` points into the solid. With the
//! light along +Z (away from the viewer) this lights the faces that face the camera.

use serde::{Deserialize, Serialize};
use crate::rasterizer::{average_normals, Vec3};

/// Which reference shape to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    Tetrahedron,
    Octahedron,
}

/// Convex polyhedron as indexed triangles with smoothed vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct SolidGeometry {
    pub vertices: Vec<Vec3>,
    /// Vertex indices per face; order fixes the face normal sign
    pub faces: Vec<[usize; 3]>,
    pub face_normals: Vec<Vec3>,
    /// Normalized mean of the normals of every face touching the vertex
    pub vertex_normals: Vec<Vec3>,
    /// Face drawn with the darkened material variant, if any
    pub base_face: Option<usize>,
}

impl SolidGeometry {
    /// Build from vertex positions and face index triplets.
    ///
    /// # Panics
    /// If a face references a vertex index out of range.
    pub fn from_faces(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Self {
        let face_normals: Vec<Vec3> = faces
            .iter()
            .map(|f| face_normal(vertices[f[0]], vertices[f[1]], vertices[f[2]]))
            .collect();

        let vertex_normals = (0..vertices.len())
            .map(|v| {
                let incident: Vec<Vec3> = faces
                    .iter()
                    .zip(&face_normals)
                    .filter(|(f, _)| f.contains(&v))
                    .map(|(_, &n)| n)
                    .collect();
                average_normals(&incident).normalize()
            })
            .collect();

        Self {
            vertices,
            faces,
            face_normals,
            vertex_normals,
            base_face: None,
        }
    }

    pub fn with_base_face(mut self, face: usize) -> Self {
        self.base_face = Some(face);
        self
    }

    /// Positions and vertex normals of one face, in face order
    pub fn face_corners(&self, face: usize) -> ([Vec3; 3], [Vec3; 3]) {
        let [a, b, c] = self.faces[face];
        (
            [self.vertices[a], self.vertices[b], self.vertices[c]],
            [self.vertex_normals[a], self.vertex_normals[b], self.vertex_normals[c]],
        )
    }
}

/// Unit normal of triangle (a, b, c): normalize(cross(b - a, c - a))
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize()
}

/// Tetrahedron with its apex `size` above `center` and a base `size` below.
/// Face 3 is the base.
pub fn tetrahedron(center: Vec3, size: f64) -> SolidGeometry {
    let vertices = vec![
        center + Vec3::new(0.0, size, 0.0),     // apex
        center + Vec3::new(-size, -size, -size), // base
        center + Vec3::new(size, -size, -size),  // base
        center + Vec3::new(0.0, -size, size),    // base
    ];

    let faces = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 1],
        [1, 3, 2],
    ];

    SolidGeometry::from_faces(vertices, faces).with_base_face(3)
}

/// Regular octahedron with vertices `size` away from `center` along each axis
pub fn octahedron(center: Vec3, size: f64) -> SolidGeometry {
    let vertices = vec![
        center + Vec3::new(0.0, size, 0.0),  // 0: top
        center + Vec3::new(0.0, -size, 0.0), // 1: bottom
        center + Vec3::new(size, 0.0, 0.0),  // 2: +X
        center + Vec3::new(-size, 0.0, 0.0), // 3: -X
        center + Vec3::new(0.0, 0.0, size),  // 4: +Z
        center + Vec3::new(0.0, 0.0, -size), // 5: -Z
    ];

    let faces = vec![
        [0, 2, 4],
        [0, 5, 2],
        [0, 3, 5],
        [0, 4, 3],
        [1, 4, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
    ];

    SolidGeometry::from_faces(vertices, faces)
}

/// Build the geometry for `kind`
pub fn build_geometry(kind: SolidKind, center: Vec3, size: f64) -> SolidGeometry {
    match kind {
        SolidKind::Tetrahedron => tetrahedron(center, size),
        SolidKind::Octahedron => octahedron(center, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn centroid(points: &[Vec3]) -> Vec3 {
        average_normals(points)
    }

    #[test]
    fn test_tetrahedron_vertices() {
        let g = tetrahedron(Vec3::new(1.0, 2.0, 3.0), 10.0);
        assert_eq!(g.vertices.len(), 4);
        assert_eq!(g.faces.len(), 4);
        assert_eq!(g.vertices[0], Vec3::new(1.0, 12.0, 3.0));
        assert_eq!(g.vertices[1], Vec3::new(-9.0, -8.0, -7.0));
        assert_eq!(g.vertices[2], Vec3::new(11.0, -8.0, -7.0));
        assert_eq!(g.vertices[3], Vec3::new(1.0, -8.0, 13.0));
        assert_eq!(g.base_face, Some(3));
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        assert!((face_normal(a, b, c) - Vec3::new(0.0, 0.0, 1.0)).len() < EPS);
        assert!((face_normal(a, c, b) - Vec3::new(0.0, 0.0, -1.0)).len() < EPS);
        assert_eq!(face_normal(a, a, c), Vec3::ZERO);
    }

    #[test]
    fn test_vertex_normals_are_unit_averages_of_three_faces() {
        let g = tetrahedron(Vec3::new(0.0, 0.0, 3.0), 1.0);
        for (v, n) in g.vertex_normals.iter().enumerate() {
            assert!((n.len() - 1.0).abs() < EPS);
            let incident: Vec<Vec3> = g
                .faces
                .iter()
                .zip(&g.face_normals)
                .filter(|(f, _)| f.contains(&v))
                .map(|(_, &fnorm)| fnorm)
                .collect();
            assert_eq!(incident.len(), 3);
            let expected = average_normals(&incident).normalize();
            assert!((*n - expected).len() < EPS);
        }
    }

    #[test]
    fn test_apex_normal_values() {
        let g = tetrahedron(Vec3::ZERO, 1.0);
        let top = face_normal(g.vertices[0], g.vertices[1], g.vertices[2]);
        let face1 = face_normal(g.vertices[0], g.vertices[2], g.vertices[3]);
        let face2 = face_normal(g.vertices[0], g.vertices[3], g.vertices[1]);
        let expected = average_normals(&[top, face1, face2]).normalize();
        assert!((g.vertex_normals[0] - expected).len() < EPS);
    }

    #[test]
    fn test_normals_point_inwards() {
        for g in [
            tetrahedron(Vec3::new(0.0, 0.0, 3.0), 2.0),
            octahedron(Vec3::new(5.0, -1.0, 2.0), 3.0),
        ] {
            let center = centroid(&g.vertices);
            for (face, n) in g.faces.iter().zip(&g.face_normals) {
                let mid = centroid(&[g.vertices[face[0]], g.vertices[face[1]], g.vertices[face[2]]]);
                assert!(n.dot(mid - center) < 0.0);
            }
            for (v, n) in g.vertices.iter().zip(&g.vertex_normals) {
                assert!(n.dot(*v - center) < 0.0);
            }
        }
    }

    #[test]
    fn test_octahedron_vertex_normals_point_along_axes() {
        let g = octahedron(Vec3::ZERO, 1.0);
        assert_eq!(g.faces.len(), 8);
        assert_eq!(g.base_face, None);
        assert!((g.vertex_normals[0] - Vec3::new(0.0, -1.0, 0.0)).len() < EPS);
        assert!((g.vertex_normals[2] - Vec3::new(-1.0, 0.0, 0.0)).len() < EPS);
        assert!((g.vertex_normals[4] - Vec3::new(0.0, 0.0, -1.0)).len() < EPS);
    }

    #[test]
    fn test_zero_size_solid_has_zero_normals() {
        let g = tetrahedron(Vec3::new(1.0, 1.0, 1.0), 0.0);
        for n in g.face_normals.iter().chain(&g.vertex_normals) {
            assert_eq!(*n, Vec3::ZERO);
        }
    }

    #[test]
    fn test_face_corners() {
        let g = tetrahedron(Vec3::ZERO, 1.0);
        let (pos, norms) = g.face_corners(3);
        assert_eq!(pos, [g.vertices[1], g.vertices[3], g.vertices[2]]);
        assert_eq!(norms, [g.vertex_normals[1], g.vertex_normals[3], g.vertex_normals[2]]);
    }
}
