//! The per-frame pipeline.
//!
//! [`Renderer`] owns the RGBA color buffer and the depth buffer and turns a
//! [`Scene`] seen through a [`Camera`] into pixels:
//!
//! ```text
//! model space --rotate--> world --translate--> world --camera--> view
//!     --backface test--> --near clip--> --light--> --project--> clip
//!     --divide by w--> NDC --viewport--> screen --screen clip-->
//!     --sort back to front--> --rasterize--> pixels
//! ```
//!
//! Derived triangles live for one model of one frame. Source triangles are
//! never modified.

use log::{debug, error, trace, warn};

use super::framebuffer::FrameBuffer;
use super::rasterizer::{draw_wireframe, FlatRasterizer, Rasterizer, TexturedRasterizer};
use crate::camera::Camera;
use crate::clipper::{clip_against_plane, clip_to_screen, near_plane};
use crate::color::Rgba;
use crate::config::{RenderConfig, RenderMode};
use crate::error::RenderError;
use crate::light::Light;
use crate::math::Mat4;
use crate::model::Model;
use crate::projection::Projection;
use crate::scene::Scene;
use crate::triangle::Triangle;

/// Pipeline counters for one call to [`Renderer::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Source triangles across all models.
    pub triangles_submitted: usize,
    /// Triangles rejected by the backface test.
    pub culled: usize,
    /// Camera-facing triangles removed entirely by the near plane.
    pub near_clipped: usize,
    /// Screen-space triangles handed to a rasterizer.
    pub rasterized: usize,
    /// Models whose draw was abandoned after a pipeline error.
    pub aborted_models: usize,
}

/// Per-frame state shared by every model.
struct FrameSetup<'a> {
    camera: &'a Camera,
    light: &'a Light,
    view: Mat4,
    projection: Mat4,
    width: f32,
    height: f32,
    backface_culling: bool,
}

/// Software renderer owning its output surface.
pub struct Renderer {
    config: RenderConfig,
    projection: Projection,
    color_buffer: Vec<u8>,
    depth_buffer: Vec<f32>,
    flat: FlatRasterizer,
    textured: TexturedRasterizer,
}

impl Renderer {
    /// Creates a renderer with a `config.width x config.height` surface.
    ///
    /// Fails with [`RenderError::MissingRenderContext`] for a zero-sized
    /// surface.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        let len = surface_len(config.width, config.height)?;
        Self::with_color_buffer(config, vec![0; len * 4])
    }

    /// Creates a renderer drawing into an existing RGBA buffer.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes.
    pub fn with_color_buffer(config: RenderConfig, color_buffer: Vec<u8>) -> Result<Self, RenderError> {
        let len = surface_len(config.width, config.height)?;
        if color_buffer.len() != len * 4 {
            return Err(RenderError::MissingRenderContext);
        }

        let projection = Projection::for_surface(
            config.fov_degrees,
            config.width,
            config.height,
            config.z_near,
            config.z_far,
        );
        debug!(
            "Renderer {}x{} ({} mode, fov {})",
            config.width, config.height, config.mode, config.fov_degrees
        );

        Ok(Self {
            config,
            projection,
            color_buffer,
            depth_buffer: vec![0.0; len],
            flat: FlatRasterizer::new(),
            textured: TexturedRasterizer::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// The RGBA output of the last frame, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.color_buffer
    }

    /// Gives the color buffer back, consuming the renderer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.config.background = color;
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.config.backface_culling = enabled;
    }

    /// Reallocates both buffers and updates the projection's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let len = surface_len(width, height)?;
        self.color_buffer = vec![0; len * 4];
        self.depth_buffer = vec![0.0; len];
        self.config.width = width;
        self.config.height = height;
        self.projection.set_aspect_ratio(height as f32 / width as f32);
        debug!("Resized to {}x{}", width, height);
        Ok(())
    }

    /// Draws one frame, fully overwriting the color buffer.
    ///
    /// A model whose pipeline fails is skipped and counted in
    /// [`FrameStats::aborted_models`]; the rest of the frame is still drawn.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        let setup = FrameSetup {
            camera,
            light: &scene.light,
            view: camera.camera_matrix(),
            projection: self.projection.matrix(),
            width: self.config.width as f32,
            height: self.config.height as f32,
            backface_culling: self.config.backface_culling,
        };
        let mode = self.config.mode;

        if scene.light.enabled && scene.light.direction.length() == 0.0 {
            warn!("Light has a zero direction; lit triangles will be black");
        }

        let mut buffer = FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.config.width,
            self.config.height,
        )?;
        buffer.clear(self.config.background);
        buffer.clear_depth();

        for model in scene.models() {
            stats.triangles_submitted += model.triangle_count();
            if model.triangles().is_empty() {
                warn!("Model '{}' has no triangles", model.name());
                continue;
            }

            let textured = mode == RenderMode::Textured && model.material().texture().is_some();
            let triangles = match Self::process_model(model, &setup, textured, &mut stats) {
                Ok(triangles) => triangles,
                Err(e) => {
                    error!("Skipping model '{}': {}", model.name(), e);
                    stats.aborted_models += 1;
                    continue;
                }
            };
            trace!(
                "Model '{}': {} of {} triangles reach the rasterizer",
                model.name(),
                triangles.len(),
                model.triangle_count()
            );
            stats.rasterized += triangles.len();

            let material = model.material();
            for triangle in &triangles {
                match mode {
                    RenderMode::Wireframe => draw_wireframe(
                        triangle,
                        material.wireframe_color,
                        material.wireframe_width,
                        &mut buffer,
                    ),
                    _ if textured => self.textured.fill_triangle(triangle, material, &mut buffer),
                    _ => {
                        self.flat.fill_triangle(triangle, material, &mut buffer);
                        if material.wireframe {
                            draw_wireframe(
                                triangle,
                                material.wireframe_color,
                                material.wireframe_width,
                                &mut buffer,
                            );
                        }
                    }
                }
            }
        }

        debug!(
            "Frame: {} submitted, {} culled, {} near clipped, {} rasterized, {} aborted",
            stats.triangles_submitted,
            stats.culled,
            stats.near_clipped,
            stats.rasterized,
            stats.aborted_models
        );
        Ok(stats)
    }

    /// Runs one model's triangles from model space to sorted, screen-clipped
    /// screen space.
    fn process_model(
        model: &Model,
        setup: &FrameSetup,
        textured: bool,
        stats: &mut FrameStats,
    ) -> Result<Vec<Triangle>, RenderError> {
        let rotation = model.transform().rotation_matrix();
        let translation = model.transform().translation_matrix();
        let near = near_plane();

        let mut screen = Vec::with_capacity(model.triangle_count());
        for source in model.triangles() {
            let rotated = source.transform(&rotation);
            let view = rotated.transform(&translation).transform(&setup.view);

            if setup.backface_culling && !setup.camera.is_visible_tri(&view) {
                stats.culled += 1;
                continue;
            }

            let clipped = clip_against_plane(&near, &view);
            if clipped.is_empty() {
                stats.near_clipped += 1;
                continue;
            }

            // Lighting uses the rotated, unclipped normal.
            let intensity = setup.light.intensity(&rotated);

            for tri in clipped {
                let mut projected = tri.with_light_intensity(intensity).transform(&setup.projection);
                if textured {
                    projected = projected.with_texels_over_w();
                }
                screen.push(
                    projected
                        .perspective_divide()
                        .to_screen(setup.width, setup.height),
                );
            }
        }

        let mut triangles = clip_to_screen(screen, setup.width, setup.height)?;
        triangles.sort_by(|a, b| b.mean_z().total_cmp(&a.mean_z()));
        Ok(triangles)
    }
}

/// Pixel count of a `width x height` surface, rejecting empty surfaces.
fn surface_len(width: u32, height: u32) -> Result<usize, RenderError> {
    let len = width as usize * height as usize;
    if len == 0 {
        return Err(RenderError::MissingRenderContext);
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::math::{Vec3, Vec4};
    use crate::mesh;
    use crate::texture::Texture;
    use crate::transform::Transform;
    use crate::triangle::Texel;
    use std::f32::consts::FRAC_PI_4;
    use std::sync::Arc;

    const FACE_COLORS: [Rgba; 6] = [
        Rgba::rgb(255, 0, 0),   // south
        Rgba::rgb(0, 255, 0),   // east
        Rgba::rgb(0, 0, 255),   // north
        Rgba::rgb(255, 255, 0), // west
        Rgba::rgb(0, 255, 255), // top
        Rgba::rgb(255, 0, 255), // bottom
    ];

    fn count(pixels: &[u8], color: Rgba) -> usize {
        pixels
            .chunks_exact(4)
            .filter(|p| *p == color.to_array())
            .count()
    }

    /// Unit cube split into one flat-colored model per face, turned so the
    /// south, east and bottom faces point at a camera on the -Z axis.
    fn cube_scene() -> Scene {
        let mut transform = Transform::new();
        transform.set_rotation_xyz((1.0 / 2f32.sqrt()).atan(), FRAC_PI_4, 0.0);

        let mut scene = Scene::new(Light::disabled());
        for (face, tris) in mesh::cube().chunks(2).enumerate() {
            scene.add_model(
                Model::new(format!("face{}", face), tris.to_vec())
                    .with_material(Material::flat(FACE_COLORS[face]))
                    .with_transform(transform),
            );
        }
        scene
    }

    fn flat_config(width: u32, height: u32) -> RenderConfig {
        RenderConfig {
            mode: RenderMode::Flat,
            ..RenderConfig::with_size(width, height)
        }
    }

    #[test]
    fn cube_shows_exactly_three_faces() {
        let mut renderer = Renderer::new(flat_config(256, 256)).unwrap();
        let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0));
        let stats = renderer.render(&cube_scene(), &camera).unwrap();

        assert_eq!(stats.triangles_submitted, 12);
        assert_eq!(stats.culled, 6);
        assert_eq!(stats.aborted_models, 0);

        let pixels = renderer.pixels();
        let visible = [0, 1, 5];
        for (face, color) in FACE_COLORS.iter().enumerate() {
            let n = count(pixels, *color);
            if visible.contains(&face) {
                assert!(n > 20, "face {} drew {} pixels", face, n);
            } else {
                assert_eq!(n, 0, "face {} should be hidden", face);
            }
        }
    }

    #[test]
    fn disabling_culling_draws_back_faces() {
        let mut renderer = Renderer::new(flat_config(256, 256)).unwrap();
        renderer.set_backface_culling(false);
        let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0));
        let stats = renderer.render(&cube_scene(), &camera).unwrap();
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.rasterized, 12);
    }

    #[test]
    fn triangle_behind_near_plane_draws_nothing() {
        let tri = Triangle::from_points(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        );
        let scene = Scene::default()
            .with_model(Model::new("behind", vec![tri]).with_material(Material::flat(Rgba::WHITE)));

        let mut renderer = Renderer::new(flat_config(64, 64)).unwrap();
        renderer.set_backface_culling(false);
        let stats = renderer.render(&scene, &Camera::default()).unwrap();

        assert_eq!(stats.near_clipped, 1);
        assert_eq!(stats.rasterized, 0);
        assert_eq!(count(renderer.pixels(), Rgba::BLACK), 64 * 64);
    }

    #[test]
    fn output_covers_surface_with_background() {
        let mut renderer = Renderer::new(RenderConfig::with_size(40, 30)).unwrap();
        renderer.set_background(Rgba::from_hex("#336699").unwrap());
        renderer.render(&Scene::default(), &Camera::default()).unwrap();
        assert_eq!(renderer.pixels().len(), 40 * 30 * 4);
        assert_eq!(count(renderer.pixels(), Rgba::rgb(0x33, 0x66, 0x99)), 40 * 30);
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert_eq!(
            Renderer::new(RenderConfig::with_size(0, 10)).err(),
            Some(RenderError::MissingRenderContext)
        );
        assert_eq!(
            Renderer::with_color_buffer(RenderConfig::with_size(4, 4), vec![0; 10]).err(),
            Some(RenderError::MissingRenderContext)
        );

        let mut renderer = Renderer::new(RenderConfig::with_size(4, 4)).unwrap();
        assert!(renderer.resize(0, 4).is_err());
        renderer.resize(8, 2).unwrap();
        assert_eq!(renderer.pixels().len(), 8 * 2 * 4);
        assert_eq!(renderer.projection().aspect_ratio(), 0.25);
    }

    #[test]
    fn textured_cube_writes_depth() {
        let texture = Arc::new(Texture::solid(4, 4, Rgba::rgb(200, 10, 10)).unwrap());
        let mut cube = Model::new("cube", mesh::cube()).with_material(Material::textured(texture));
        cube.transform_mut().set_position_xyz(-0.5, -0.5, 0.0);
        let scene = Scene::new(Light::disabled()).with_model(cube);

        let mut renderer = Renderer::new(RenderConfig::with_size(64, 64)).unwrap();
        let camera = Camera::new(Vec3::new(0.0, 0.0, -3.0));
        let stats = renderer.render(&scene, &camera).unwrap();

        assert!(stats.rasterized > 0);
        assert!(count(renderer.pixels(), Rgba::rgb(200, 10, 10)) > 0);
        // The visible south face sits 3 units away.
        let center = renderer.depth_buffer()[32 * 64 + 32];
        assert!((center - 1.0 / 3.0).abs() < 1e-3, "depth = {}", center);
    }

    #[test]
    fn depth_is_cleared_between_frames() {
        let texture = Arc::new(Texture::solid(1, 1, Rgba::WHITE).unwrap());
        let tri = Triangle::new(
            [
                Vec4::point(-1.0, -1.0, 2.0),
                Vec4::point(0.0, 1.0, 2.0),
                Vec4::point(1.0, -1.0, 2.0),
            ],
            [Texel::new(0.0, 0.0), Texel::new(0.5, 1.0), Texel::new(1.0, 0.0)],
        );
        let mut scene = Scene::new(Light::disabled())
            .with_model(Model::new("tri", vec![tri]).with_material(Material::textured(texture)));

        let mut renderer = Renderer::new(RenderConfig::with_size(32, 32)).unwrap();
        renderer.set_backface_culling(false);
        renderer.render(&scene, &Camera::default()).unwrap();
        let first = count(renderer.pixels(), Rgba::WHITE);
        assert!(first > 0);

        // Moving the triangle further away must still draw it.
        scene.models_mut()[0].transform_mut().translate_z(2.0);
        renderer.render(&scene, &Camera::default()).unwrap();
        let second = count(renderer.pixels(), Rgba::WHITE);
        assert!(second > 0 && second < first);
    }

    #[test]
    fn wireframe_mode_draws_edges_only() {
        let material = Material::flat(Rgba::WHITE).with_wireframe(Rgba::rgb(0, 255, 0), 1);
        let mut cube = Model::new("cube", mesh::cube()).with_material(material);
        cube.transform_mut().set_position_xyz(-0.5, -0.5, 0.0);
        let scene = Scene::new(Light::disabled()).with_model(cube);

        let mut renderer = Renderer::new(RenderConfig {
            mode: RenderMode::Wireframe,
            ..RenderConfig::with_size(64, 64)
        })
        .unwrap();
        renderer.render(&scene, &Camera::new(Vec3::new(0.0, 0.0, -3.0))).unwrap();

        assert!(count(renderer.pixels(), Rgba::rgb(0, 255, 0)) > 0);
        assert_eq!(count(renderer.pixels(), Rgba::WHITE), 0);
    }

    #[test]
    fn facing_light_gives_full_intensity() {
        let tri = Triangle::from_points(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
        );
        // Normal points at the camera, light shines straight along +Z.
        let scene = Scene::new(Light::new(Vec3::FORWARD))
            .with_model(Model::new("tri", vec![tri]).with_material(Material::flat(Rgba::rgb(200, 100, 0))));

        let mut renderer = Renderer::new(flat_config(32, 32)).unwrap();
        let stats = renderer.render(&scene, &Camera::default()).unwrap();
        assert_eq!(stats.rasterized, 1);
        assert!(count(renderer.pixels(), Rgba::rgb(200, 100, 0)) > 0);
    }
}
