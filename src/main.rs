//! Z-Buffer Viewer: interactive window around the software rasterizer
//!
//! Controls:
//! - Left drag: rotate the camera
//! - Mouse wheel: zoom
//! - R: reset the camera to the scene's initial state
//! - P: save a snapshot
//! - Esc: quit

use std::path::PathBuf;

use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zbuffer_gouraud::export::save_image;
use zbuffer_gouraud::rasterizer::{Renderer, HEIGHT, WIDTH};
use zbuffer_gouraud::world::{load_scene, SceneDesc};
use zbuffer_gouraud::VERSION;

/// Radians of rotation per pixel of mouse drag
const DRAG_SENSITIVITY: f64 = 0.01;
/// Zoom change per wheel tick
const WHEEL_ZOOM_STEP: f64 = 0.1;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive z-buffer rasterizer viewer")]
struct Args {
    /// RON scene file (defaults to the built-in three tetrahedra)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Where `P` writes the snapshot
    #[arg(long, default_value = "snapshot.png")]
    snapshot: PathBuf,
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Z-Buffer Viewer v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn framebuffer_texture(renderer: &Renderer) -> Texture2D {
    let fb = renderer.framebuffer();
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);
    texture
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let desc = match &args.scene {
        Some(path) => match load_scene(path) {
            Ok(desc) => desc,
            Err(e) => {
                error!("failed to load {}: {}, using demo scene", path.display(), e);
                SceneDesc::demo()
            }
        },
        None => SceneDesc::demo(),
    };

    let mut renderer = Renderer::with_scene(desc.build(), desc.width, desc.height);
    renderer.render();
    let mut texture = framebuffer_texture(&renderer);

    info!(
        "=== Z-Buffer Viewer v{} === {} triangles, {}x{}",
        VERSION,
        renderer.scene().triangles.len(),
        desc.width,
        desc.height
    );

    let mut last_mouse: Option<(f32, f32)> = None;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let mut dirty = false;

        // Left drag: rotate (vertical motion turns about X, horizontal about Y)
        let mouse_pos = mouse_position();
        if is_mouse_button_down(MouseButton::Left) {
            if let Some((lx, ly)) = last_mouse {
                let dx = (mouse_pos.0 - lx) as f64;
                let dy = (mouse_pos.1 - ly) as f64;
                if dx != 0.0 || dy != 0.0 {
                    renderer.rotate_camera(dy * DRAG_SENSITIVITY, dx * DRAG_SENSITIVITY, 0.0);
                    dirty = true;
                }
            }
            last_mouse = Some(mouse_pos);
        } else {
            last_mouse = None;
        }

        // Wheel: scrolling towards the user zooms in
        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            let ticks = -(scroll.signum() as f64);
            renderer.zoom_camera(1.0 + ticks * WHEEL_ZOOM_STEP);
            dirty = true;
        }

        if is_key_pressed(KeyCode::R) {
            renderer.set_camera(desc.camera);
            dirty = true;
        }

        if is_key_pressed(KeyCode::P) {
            if let Err(e) = save_image(renderer.framebuffer(), &args.snapshot) {
                error!("snapshot failed: {}", e);
            }
        }

        if dirty {
            renderer.render();
            texture = framebuffer_texture(&renderer);
        }

        // Fit the framebuffer into the window, keeping its aspect ratio
        clear_background(Color::from_rgba(20, 20, 24, 255));
        let fb = renderer.framebuffer();
        let scale = (screen_width() / fb.width as f32).min(screen_height() / fb.height as f32);
        let draw_w = fb.width as f32 * scale;
        let draw_h = fb.height as f32 * scale;
        let draw_x = (screen_width() - draw_w) / 2.0;
        let draw_y = (screen_height() - draw_h) / 2.0;

        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(macroquad::math::Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let cam = renderer.camera();
        draw_text(
            &format!(
                "Angles: ({:.2}, {:.2}, {:.2})  Zoom: {:.2}  [drag] rotate  [wheel] zoom  [R] reset  [P] snapshot",
                cam.angle_x, cam.angle_y, cam.angle_z, cam.zoom
            ),
            8.0,
            18.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await
    }
}
