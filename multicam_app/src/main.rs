//! Multi-camera demo application
//!
//! Builds a small scene viewed by three cameras (a main view, a minimap into
//! an offscreen texture and a HUD overlay), renders one frame through the
//! recording device and round-trips the scene through its text format.
//!
//! Usage: `multicam_demo [config.toml|config.ron]`

use std::sync::Arc;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use scene_engine::render::{DeviceCommand, TextureDataType, VertexBufferHandle};

pub struct MultiCamApp {
    config: EngineConfig,
    world: World,
    scene: Scene,
    device: RecordingDevice,
}

impl MultiCamApp {
    pub fn new(config: EngineConfig) -> Self {
        log::info!(
            "Creating multi-camera demo ({}x{} back buffer)",
            config.back_buffer_width,
            config.back_buffer_height
        );
        let world = World::with_config(&config);
        Self {
            config,
            world,
            scene: Scene::new(),
            device: RecordingDevice::new(),
        }
    }

    pub fn initialize(&mut self) {
        log::info!("Initializing demo scene...");
        let crate_mesh = Arc::new(Mesh::new(vec![
            SubMesh::new(
                Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)),
                VertexBufferHandle(1),
                36,
            ),
            SubMesh::new(
                Aabb::from_center_extents(Vec3::new(0.0, 1.25, 0.0), Vec3::new(0.5, 0.25, 0.5)),
                VertexBufferHandle(2),
                24,
            ),
        ]));
        let wood = Arc::new(Material::new("wood").with_shader(ShaderProgram::linked(1)));
        let metal = Arc::new(Material::new("metal").with_shader(ShaderProgram::linked(2)));

        // A row of crates; the last one is far off to the side and gets culled
        for (i, x) in [-4.0, 0.0, 4.0, 60.0].into_iter().enumerate() {
            let id = self.world.create_game_object(format!("crate {i}"));
            self.world.add_component(id, TransformComponent::from_position(Vec3::new(x, 0.0, 0.0)));
            let mut renderer = MeshRenderer::with_mesh(Arc::clone(&crate_mesh));
            renderer.set_material(Some(Arc::clone(&wood)), 0);
            renderer.set_material(Some(Arc::clone(&metal)), 1);
            self.world.add_component(id, renderer);
            self.scene.add(id);
        }

        let marker = self.world.create_game_object("hud marker");
        self.world.set_layer(marker, LayerMask::OVERLAY);
        self.world.add_component(marker, TransformComponent::from_position(Vec3::new(50.0, 50.0, -0.5)).with_uniform_scale(10.0));
        let mut marker_renderer = MeshRenderer::with_mesh(Arc::clone(&crate_mesh));
        let hud = Material::new("hud")
            .with_shader(ShaderProgram::linked(3))
            .with_blend_mode(BlendMode::AlphaBlend);
        marker_renderer.set_material(Some(Arc::new(hud)), 0);
        self.world.add_component(marker, marker_renderer);
        self.scene.add(marker);

        // Added out of order on purpose: render order decides, not insertion
        self.spawn_hud_camera(2);
        self.spawn_main_camera(0);
        self.spawn_minimap_camera(1);
    }

    fn spawn_main_camera(&mut self, order: u32) {
        let id = self.world.create_game_object("main camera");
        let mut transform = TransformComponent::identity();
        transform.look_at(Vec3::new(0.0, 6.0, 18.0), Vec3::zeros(), Vec3::y());
        self.world.add_component(id, transform);

        if self.world.add_camera(id).is_some() {
            let aspect = self.config.back_buffer_width as f32 / self.config.back_buffer_height.max(1) as f32;
            if let Some(camera) = self.world.component_mut::<Camera>(id) {
                camera.set_perspective(45.0, aspect, 0.1, 200.0);
                camera.set_clear_color(Vec3::new(0.1, 0.1, 0.15));
                camera.set_render_order(order);
                camera.set_depth_normals_texture(RenderTexture::new_2d(
                    self.config.back_buffer_width,
                    self.config.back_buffer_height,
                    TextureDataType::Float,
                    "depthnormals",
                ));
            }
        }
        self.scene.add(id);
    }

    fn spawn_minimap_camera(&mut self, order: u32) {
        let id = self.world.create_game_object("minimap camera");
        let mut transform = TransformComponent::identity();
        transform.look_at(Vec3::new(0.0, 40.0, 0.0), Vec3::zeros(), -Vec3::z());
        self.world.add_component(id, transform);

        if self.world.add_camera(id).is_some() {
            if let Some(camera) = self.world.component_mut::<Camera>(id) {
                camera.set_orthographic(-20.0, 20.0, -20.0, 20.0, 0.1, 100.0);
                camera.set_target_texture(Some(RenderTexture::new_2d(256, 256, TextureDataType::UByte, "minimap")));
                camera.set_viewport(0, 0, 256, 256);
                camera.set_render_order(order);
            }
        }
        self.scene.add(id);
    }

    fn spawn_hud_camera(&mut self, order: u32) {
        let id = self.world.create_game_object("hud camera");
        self.world.add_component(id, TransformComponent::identity());

        let (width, height) = (self.config.back_buffer_width as f32, self.config.back_buffer_height as f32);
        if self.world.add_camera(id).is_some() {
            if let Some(camera) = self.world.component_mut::<Camera>(id) {
                camera.set_orthographic(0.0, width, height, 0.0, 0.0, 1.0);
                camera.set_clear_flag(ClearFlag::Depth);
                camera.set_layer_mask(LayerMask::OVERLAY);
                camera.set_render_order(order);
            }
        }
        self.world.set_layer(id, LayerMask::OVERLAY);
        self.scene.add(id);
    }

    pub fn run(&mut self) -> Result<(), SceneParseError> {
        log::info!("Rendering one frame...");
        let stats = self.scene.render(&mut self.world, &mut self.device);
        log::info!(
            "Frame: {} cameras, {} renderers submitted, {} culled, {} sub-meshes culled, {} skipped, {} draw calls",
            stats.cameras_rendered,
            stats.renderers_submitted,
            stats.renderers_culled,
            stats.sub_meshes_culled,
            stats.sub_meshes_skipped,
            stats.draw_calls
        );
        for command in self.device.commands() {
            if let DeviceCommand::SetRenderTarget { target, viewport } = command {
                log::info!("Camera pass into {:?} at {:?}", target, viewport);
            }
        }

        let text = serialize_scene(&self.scene, &self.world);
        log::debug!("Serialized scene:\n{}", text);

        let mut reloaded_world = World::with_config(&self.config);
        let ids = deserialize_scene(&text, &mut reloaded_world)?;
        let mut reloaded = Scene::new();
        for id in ids {
            reloaded.add(id);
        }
        let cameras = reloaded
            .objects()
            .iter()
            .filter(|&&id| reloaded_world.component::<Camera>(id).is_some())
            .count();
        log::info!("Reloaded {} game objects, {} with cameras", reloaded.len(), cameras);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default(),
    };
    logging::init_with_filter(&config.log_filter);

    log::info!("Starting multi-camera demo");
    let mut app = MultiCamApp::new(config);
    app.initialize();
    app.run()?;
    log::info!("Demo finished");
    Ok(())
}
