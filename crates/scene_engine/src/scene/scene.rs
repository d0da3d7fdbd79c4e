//! Scene: the set of game objects a frame renders
//!
//! The scene does not own game objects; it lists ids of objects owned by a
//! [`World`]. Ids whose objects have been destroyed are skipped.

use crate::ecs::components::TransformComponent;
use crate::ecs::{GameObjectId, World};
use crate::render::{Camera, ClearFlag, FrameStats, GraphicsDevice, MeshRenderer};
use crate::scene::Frustum;

/// Ordered collection of game objects
///
/// Insertion order is the draw order among the renderers a camera accepts.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<GameObjectId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game object unless it is already in the scene
    pub fn add(&mut self, id: GameObjectId) {
        if !self.objects.contains(&id) {
            self.objects.push(id);
        }
    }

    /// Remove a game object, returning whether it was in the scene
    pub fn remove(&mut self, id: GameObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|&object| object != id);
        self.objects.len() != before
    }

    /// Whether the game object is in the scene
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains(&id)
    }

    /// Number of game objects in the scene
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Game objects in insertion order
    pub fn objects(&self) -> &[GameObjectId] {
        &self.objects
    }

    /// Render the scene once with every enabled camera
    ///
    /// Cameras render in ascending render order; equal orders keep insertion
    /// order. A camera is used only if it and its game object are enabled and
    /// the object has a transform.
    pub fn render<D: GraphicsDevice + ?Sized>(&self, world: &mut World, device: &mut D) -> FrameStats {
        let mut frame = FrameStats::new();

        let mut cameras: Vec<(u32, GameObjectId)> = self
            .objects
            .iter()
            .filter_map(|&id| {
                let object = world.game_object(id)?;
                let camera = world.component::<Camera>(id)?;
                if !object.is_enabled() || !camera.is_enabled() {
                    return None;
                }
                if !object.has::<TransformComponent>() {
                    log::debug!("Camera on '{}' has no transform, skipping", object.name());
                    return None;
                }
                Some((camera.render_order(), id))
            })
            .collect();
        cameras.sort_by_key(|&(order, _)| order);

        for (_, id) in cameras {
            self.render_with_camera(world, id, device, &mut frame);
        }
        frame
    }

    /// Render the scene's mesh renderers with the camera on `camera_object`
    ///
    /// Refreshes the camera view from its transform, binds and clears its
    /// target, then culls and draws every eligible renderer. Returns false
    /// without touching the device if the object has no camera, no transform,
    /// or a transform that cannot be inverted.
    pub fn render_with_camera<D: GraphicsDevice + ?Sized>(
        &self,
        world: &mut World,
        camera_object: GameObjectId,
        device: &mut D,
        frame: &mut FrameStats,
    ) -> bool {
        let Some(camera_to_world) = world.object_local_to_world(camera_object) else {
            return false;
        };
        let Some(view) = camera_to_world.try_inverse() else {
            log::debug!("Camera transform is not invertible, skipping");
            return false;
        };
        match world.component_mut::<Camera>(camera_object) {
            Some(camera) => {
                camera.update_view(view);
            }
            None => return false,
        }

        let world: &World = world;
        let Some(camera) = world.component::<Camera>(camera_object) else {
            return false;
        };
        log::debug!(
            "Camera pass: order {}, viewport {:?}, mask {:#x}",
            camera.render_order(),
            camera.viewport(),
            camera.layer_mask().bits()
        );

        device.set_render_target(camera.target(), camera.viewport());
        frame.invalidate_device_state();
        if camera.clear_flag() != ClearFlag::DontClear {
            device.clear(camera.clear_flag(), camera.clear_color());
        }

        let frustum = if world.frustum_culling() {
            *camera.frustum()
        } else {
            Frustum::unbounded()
        };

        for &id in &self.objects {
            let Some(object) = world.game_object(id) else {
                continue;
            };
            if !object.is_enabled() || !camera.layer_mask().renders(object.layer()) {
                continue;
            }
            let Some(renderer) = world.component::<MeshRenderer>(id) else {
                continue;
            };
            let Some(local_to_world) = world.object_local_to_world(id) else {
                continue;
            };

            let model_view_projection = camera.view_projection() * local_to_world;
            renderer.render(&model_view_projection, &frustum, &local_to_world, device, frame);
        }

        frame.cameras_rendered += 1;
        true
    }
}
