//! Headless demo: spins a cube next to a sphere and writes every frame as a
//! PNG.
//!
//! ```text
//! softpipe [config.ron] [texture.png] [out_dir]
//! ```
//!
//! Set `RUST_LOG=debug` to see per-frame pipeline statistics.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use softpipe::prelude::*;

const FRAMES: u32 = 36;
const SPHERE_SEGMENTS: u32 = 25;

fn build_scene(texture: Option<Texture>) -> Scene {
    let cube_material = match texture {
        Some(texture) => Material::textured(Arc::new(texture)),
        None => Material::flat(Rgba::rgb(230, 120, 40)).with_wireframe(Rgba::WHITE, 1),
    };
    let mut cube = Model::new("cube", mesh::cube()).with_material(cube_material);
    cube.transform_mut().set_position_xyz(-1.5, -0.5, 0.0);

    let mut sphere = Model::new("sphere", mesh::sphere(SPHERE_SEGMENTS))
        .with_material(Material::flat(Rgba::rgb(90, 160, 220)));
    sphere.transform_mut().set_position_xyz(1.2, 0.0, 0.5);

    Scene::new(Light::new(Vec3::new(0.5, -0.5, 1.0)))
        .with_model(cube)
        .with_model(sphere)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => RenderConfig::from_ron_file(&path)?,
        None => RenderConfig::default(),
    };
    let texture = args.next().map(Texture::from_file).transpose()?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_string()));
    fs::create_dir_all(&out_dir)?;

    let mut scene = build_scene(texture);
    let mut renderer = Renderer::new(config)?;
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0));
    info!(
        "Rendering {} frames at {}x{} into {}",
        FRAMES,
        renderer.width(),
        renderer.height(),
        out_dir.display()
    );

    for frame in 0..FRAMES {
        let stats = renderer.render(&scene, &camera)?;
        if stats.aborted_models > 0 {
            log::warn!("Frame {}: {} models aborted", frame, stats.aborted_models);
        }

        let path = out_dir.join(format!("frame_{:03}.png", frame));
        image::save_buffer(
            &path,
            renderer.pixels(),
            renderer.width(),
            renderer.height(),
            image::ColorType::Rgba8,
        )?;

        // Animate between frames, never mid-render.
        for model in scene.models_mut() {
            model.transform_mut().rotate_y(0.1).rotate_x(0.05);
        }
        camera.yaw(0.005);
    }

    info!("Done");
    Ok(())
}
