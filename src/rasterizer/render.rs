//! Core rendering functions
//! Z-buffered triangle rasterization with Gouraud shading

use super::camera::Camera;
use super::math::{barycentric, is_inside, project, Vec3};
use super::types::{Color, Light, Triangle};
use super::{FOV, HEIGHT, WIDTH};

/// Framebuffer for software rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f64>,  // Camera-space depth per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f64::INFINITY; width * height],
            width,
            height,
        }
    }

    /// Fill with `color` and reset every depth cell to +infinity
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f64::INFINITY);
    }

    /// Write `color` only if `z` is strictly nearer than the stored depth.
    /// Equal depths keep the first writer.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f64, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
        } else {
            Color::BLACK
        }
    }

    pub fn depth(&self, x: usize, y: usize) -> f64 {
        if x < self.width && y < self.height {
            self.zbuffer[y * self.width + x]
        } else {
            f64::INFINITY
        }
    }

    /// Number of pixels holding a depth value (written this pass)
    pub fn covered_pixels(&self) -> usize {
        self.zbuffer.iter().filter(|z| z.is_finite()).count()
    }
}

/// Everything a render pass reads: geometry, camera, light and clear color
#[derive(Debug, Clone)]
pub struct Scene {
    pub triangles: Vec<Triangle>,
    pub camera: Camera,
    pub light: Light,
    pub background: Color,
    pub fov: f64,
}

impl Scene {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            camera: Camera::new(),
            light: Light::default(),
            background: Color::BLACK,
            fov: FOV,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Counters from one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles_drawn: usize,
    /// Triangles with a vertex at or behind the projection center
    pub triangles_rejected: usize,
    pub pixels_written: usize,
}

/// Triangle after camera transform and projection, ready for rasterization
struct Surface {
    pub v1: Vec3, // Screen-space vertex 1 (z = camera-space depth)
    pub v2: Vec3, // Screen-space vertex 2
    pub v3: Vec3, // Screen-space vertex 3
    pub i1: f64,  // Light intensity at vertex 1
    pub i2: f64,
    pub i3: f64,
    pub color: Color,
}

/// Transform, light and project one triangle.
/// Returns None if any vertex sits at or behind the projection center.
fn build_surface(triangle: &Triangle, scene: &Scene, width: usize, height: usize) -> Option<Surface> {
    let camera = &scene.camera;

    let c1 = camera.transform(triangle.p1);
    let c2 = camera.transform(triangle.p2);
    let c3 = camera.transform(triangle.p3);

    if scene.fov + c1.z <= 0.0 || scene.fov + c2.z <= 0.0 || scene.fov + c3.z <= 0.0 {
        return None;
    }

    let i1 = scene.light.intensity(camera.transform_normal(triangle.n1));
    let i2 = scene.light.intensity(camera.transform_normal(triangle.n2));
    let i3 = scene.light.intensity(camera.transform_normal(triangle.n3));

    Some(Surface {
        v1: project(c1, scene.fov, width, height),
        v2: project(c2, scene.fov, width, height),
        v3: project(c3, scene.fov, width, height),
        i1,
        i2,
        i3,
        color: triangle.color,
    })
}

/// Rasterize a single triangle, returns the number of pixels written
fn rasterize_triangle(fb: &mut Framebuffer, surface: &Surface) -> usize {
    if fb.width == 0 || fb.height == 0 {
        return 0;
    }

    // Bounding box clamped to the framebuffer (NaN bounds collapse onto the edges)
    let max_px = (fb.width - 1) as f64;
    let max_py = (fb.height - 1) as f64;
    let min_x = surface.v1.x.min(surface.v2.x).min(surface.v3.x).max(0.0) as i64;
    let max_x = surface.v1.x.max(surface.v2.x).max(surface.v3.x).min(max_px) as i64;
    let min_y = surface.v1.y.min(surface.v2.y).min(surface.v3.y).max(0.0) as i64;
    let max_y = surface.v1.y.max(surface.v2.y).max(surface.v3.y).min(max_py) as i64;

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let Some((alpha, beta, gamma)) =
                barycentric(x as f64, y as f64, surface.v1, surface.v2, surface.v3)
            else {
                // Collinear projection covers no pixels
                return written;
            };

            if !is_inside(alpha, beta, gamma) {
                continue;
            }

            let z = alpha * surface.v1.z + beta * surface.v2.z + gamma * surface.v3.z;
            let intensity = alpha * surface.i1 + beta * surface.i2 + gamma * surface.i3;
            if fb.set_pixel_with_depth(x as usize, y as usize, z, surface.color.shade(intensity)) {
                written += 1;
            }
        }
    }
    written
}

/// Full render pass: clear both buffers, then rasterize every triangle in list order.
///
/// The framebuffer keeps its own dimensions; the scene only supplies content.
pub fn render(scene: &Scene, fb: &mut Framebuffer) -> RenderStats {
    fb.clear(scene.background);

    let mut stats = RenderStats::default();
    for triangle in &scene.triangles {
        match build_surface(triangle, scene, fb.width, fb.height) {
            Some(surface) => {
                stats.triangles_drawn += 1;
                stats.pixels_written += rasterize_triangle(fb, &surface);
            }
            None => stats.triangles_rejected += 1,
        }
    }

    tracing::debug!(
        drawn = stats.triangles_drawn,
        rejected = stats.triangles_rejected,
        pixels = stats.pixels_written,
        "render pass complete"
    );
    stats
}

/// Stateful front end for UI shells: owns the scene and the framebuffer.
pub struct Renderer {
    scene: Scene,
    fb: Framebuffer,
}

impl Renderer {
    /// Framebuffer dimensions are fixed here
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            scene: Scene::default(),
            fb: Framebuffer::new(width, height),
        }
    }

    pub fn with_scene(scene: Scene, width: usize, height: usize) -> Self {
        Self {
            scene,
            fb: Framebuffer::new(width, height),
        }
    }

    /// Replace the scene geometry. No validation.
    pub fn set_triangles(&mut self, triangles: Vec<Triangle>) {
        self.scene.triangles = triangles;
    }

    pub fn rotate_camera(&mut self, dx: f64, dy: f64, dz: f64) {
        self.scene.camera.rotate(dx, dy, dz);
    }

    pub fn zoom_camera(&mut self, scale: f64) {
        self.scene.camera.zoom(scale);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.scene.camera = camera;
    }

    pub fn render(&mut self) -> RenderStats {
        render(&self.scene, &mut self.fb)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing(z: f64, half: f64, color: Color) -> Triangle {
        Triangle::flat(
            [
                Vec3::new(-half, -half, z),
                Vec3::new(half, -half, z),
                Vec3::new(0.0, half, z),
            ],
            Vec3::new(0.0, 0.0, 1.0),
            color,
        )
    }

    #[test]
    fn test_clear_resets_depth_and_color() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel_with_depth(1, 1, 2.0, Color::RED);
        fb.clear(Color::BLUE);
        assert_eq!(fb.get_pixel(1, 1), Color::BLUE);
        assert_eq!(fb.depth(1, 1), f64::INFINITY);
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn test_depth_test_keeps_nearest_and_first_tie() {
        let mut fb = Framebuffer::new(2, 2);
        assert!(fb.set_pixel_with_depth(0, 0, 10.0, Color::GREEN));
        assert!(fb.set_pixel_with_depth(0, 0, 5.0, Color::RED));
        assert!(!fb.set_pixel_with_depth(0, 0, 7.0, Color::BLUE));
        assert!(!fb.set_pixel_with_depth(0, 0, 5.0, Color::WHITE));
        assert_eq!(fb.get_pixel(0, 0), Color::RED);
        assert_eq!(fb.depth(0, 0), 5.0);
        assert!(!fb.set_pixel_with_depth(5, 5, 1.0, Color::RED));
    }

    #[test]
    fn test_render_single_facing_triangle() {
        let scene = Scene::new(vec![facing(0.0, 100.0, Color::new(200, 100, 50))]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let stats = render(&scene, &mut fb);

        assert_eq!(stats.triangles_drawn, 1);
        assert_eq!(stats.triangles_rejected, 0);
        assert!(stats.pixels_written > 0);
        assert_eq!(stats.pixels_written, fb.covered_pixels());
        // Normal along the light: full intensity
        assert_eq!(fb.get_pixel(400, 300), Color::new(200, 100, 50));
        assert_eq!(fb.depth(400, 300), 0.0);
        assert_eq!(fb.get_pixel(0, 0), Color::BLACK);
    }

    #[test]
    fn test_back_facing_normals_get_ambient_floor() {
        let mut tri = facing(0.0, 100.0, Color::new(200, 100, 50));
        tri.n1 = Vec3::new(0.0, 0.0, -1.0);
        tri.n2 = tri.n1;
        tri.n3 = tri.n1;
        let scene = Scene::new(vec![tri]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        render(&scene, &mut fb);
        assert_eq!(fb.get_pixel(400, 300), Color::new(40, 20, 10));
    }

    #[test]
    fn test_gouraud_interpolates_between_vertices() {
        let tri = Triangle::new(
            [
                Vec3::new(-200.0, -100.0, 0.0),
                Vec3::new(200.0, -100.0, 0.0),
                Vec3::new(0.0, 200.0, 0.0),
            ],
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
            Color::WHITE,
        );
        let scene = Scene::new(vec![tri]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        render(&scene, &mut fb);

        // Near the bright base vs near the dim apex
        let bottom = fb.get_pixel(400, 399);
        let top = fb.get_pixel(400, 110);
        assert!(bottom.r > top.r);
        assert!(top.r >= (255.0 * 0.2) as u8);
    }

    #[test]
    fn test_degenerate_triangle_writes_nothing() {
        let tri = Triangle::flat(
            [
                Vec3::new(-10.0, -10.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 10.0, 0.0),
            ],
            Vec3::new(0.0, 0.0, 1.0),
            Color::WHITE,
        );
        let scene = Scene::new(vec![tri]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let stats = render(&scene, &mut fb);
        assert_eq!(stats.pixels_written, 0);
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn test_nan_geometry_is_skipped() {
        let tri = Triangle::flat(
            [
                Vec3::new(f64::NAN, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(0.0, 10.0, 0.0),
            ],
            Vec3::new(0.0, 0.0, 1.0),
            Color::WHITE,
        );
        let scene = Scene::new(vec![tri]);
        let mut fb = Framebuffer::new(64, 48);
        let stats = render(&scene, &mut fb);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn test_vertex_behind_projection_center_rejects_triangle() {
        let mut tri = facing(0.0, 50.0, Color::WHITE);
        tri.p3 = Vec3::new(0.0, 50.0, -FOV);
        let scene = Scene::new(vec![tri, facing(10.0, 50.0, Color::RED)]);
        let mut fb = Framebuffer::new(WIDTH, HEIGHT);
        let stats = render(&scene, &mut fb);
        assert_eq!(stats.triangles_rejected, 1);
        assert_eq!(stats.triangles_drawn, 1);
        let px = fb.get_pixel(400, 300);
        assert!(px.r >= 254 && px.g == 0 && px.b == 0);
    }

    #[test]
    fn test_offscreen_triangle_is_clamped() {
        let tri = Triangle::flat(
            [
                Vec3::new(-5000.0, -5000.0, 0.0),
                Vec3::new(5000.0, -5000.0, 0.0),
                Vec3::new(0.0, 5000.0, 0.0),
            ],
            Vec3::new(0.0, 0.0, 1.0),
            Color::GREEN,
        );
        let scene = Scene::new(vec![tri]);
        let mut fb = Framebuffer::new(80, 60);
        let stats = render(&scene, &mut fb);
        assert_eq!(stats.pixels_written, 80 * 60);
    }

    #[test]
    fn test_zero_sized_framebuffer() {
        let scene = Scene::new(vec![facing(0.0, 100.0, Color::WHITE)]);
        let mut fb = Framebuffer::new(0, 0);
        let stats = render(&scene, &mut fb);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn test_renderer_contract() {
        let mut renderer = Renderer::new(200, 150);
        renderer.set_triangles(vec![facing(0.0, 40.0, Color::RED)]);
        let first = renderer.render();
        assert!(first.pixels_written > 0);

        renderer.zoom_camera(0.5);
        let smaller = renderer.render();
        assert!(smaller.pixels_written < first.pixels_written);

        renderer.zoom_camera(2.0);
        renderer.rotate_camera(0.0, 0.0, 0.0);
        assert_eq!(renderer.render(), first);
        assert_eq!(renderer.framebuffer().width, 200);
    }
}
