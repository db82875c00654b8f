//! Headless renderer: draw a scene once and write it to an image file
//!
//! Usage: zbuffer-snapshot --output out.png [--scene scene.ron] [--rotate DX DY DZ] [--zoom S]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zbuffer_gouraud::export::save_image;
use zbuffer_gouraud::rasterizer::Renderer;
use zbuffer_gouraud::world::{load_scene, save_scene, SceneDesc, SceneError};

#[derive(Parser, Debug)]
#[command(version, about = "Render a scene to an image without opening a window")]
struct Args {
    /// RON scene file (defaults to the built-in three tetrahedra)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output image; format follows the extension
    #[arg(long, short, default_value = "render.png")]
    output: PathBuf,

    /// Extra camera rotation in radians about X, Y and Z
    #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], allow_negative_numbers = true)]
    rotate: Option<Vec<f64>>,

    /// Extra zoom factor applied after the scene's own
    #[arg(long)]
    zoom: Option<f64>,

    /// Write the built-in demo scene to this file and exit
    #[arg(long)]
    write_default_scene: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), SceneError> {
    if let Some(path) = &args.write_default_scene {
        return save_scene(&SceneDesc::demo(), path);
    }

    let desc = match &args.scene {
        Some(path) => load_scene(path)?,
        None => SceneDesc::demo(),
    };

    let mut renderer = Renderer::with_scene(desc.build(), desc.width, desc.height);
    if let Some(r) = &args.rotate {
        renderer.rotate_camera(r[0], r[1], r[2]);
    }
    if let Some(zoom) = args.zoom {
        renderer.zoom_camera(zoom);
    }

    let stats = renderer.render();
    info!(
        drawn = stats.triangles_drawn,
        rejected = stats.triangles_rejected,
        pixels = renderer.framebuffer().covered_pixels(),
        "rendered"
    );

    save_image(renderer.framebuffer(), &args.output)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
