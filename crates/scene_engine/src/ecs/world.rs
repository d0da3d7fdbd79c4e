//! ECS World implementation
//!
//! The world owns every game object and every component table. Game objects
//! refer to their components through typed handles; the world is the only
//! place those handles are resolved.

use crate::config::EngineConfig;
use crate::ecs::component::{Component, ComponentTables};
use crate::ecs::components::TransformComponent;
use crate::ecs::game_object::{GameObject, GameObjectId};
use crate::ecs::storage::{ComponentHandle, ComponentStorage};
use crate::foundation::collections::SlotMap;
use crate::foundation::math::Mat4;
use crate::render::{Camera, MeshRenderer};
use crate::scene::LayerMask;

/// Parent links followed before a hierarchy is assumed to be cyclic
const MAX_HIERARCHY_DEPTH: usize = 64;

/// ECS World containing all game objects and components
#[derive(Debug)]
pub struct World {
    objects: SlotMap<GameObjectId, GameObject>,
    tables: ComponentTables,
    back_buffer_size: (u32, u32),
    frustum_culling: bool,
}

impl World {
    /// Create a world with the default engine settings
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create a world sized and configured from `config`
    pub fn with_config(config: &EngineConfig) -> Self {
        let capacity = config.initial_component_capacity;
        Self {
            objects: SlotMap::with_capacity_and_key(capacity),
            tables: ComponentTables::with_capacity(capacity),
            back_buffer_size: (config.back_buffer_width, config.back_buffer_height),
            frustum_culling: config.frustum_culling,
        }
    }

    /// Size of the default framebuffer new cameras take as their viewport
    pub fn back_buffer_size(&self) -> (u32, u32) {
        self.back_buffer_size
    }

    /// Update the default framebuffer size, e.g. after a window resize
    ///
    /// Existing cameras keep their viewport.
    pub fn set_back_buffer_size(&mut self, width: u32, height: u32) {
        self.back_buffer_size = (width, height);
    }

    /// Whether render passes cull against camera frustums
    pub fn frustum_culling(&self) -> bool {
        self.frustum_culling
    }

    /// Switch frustum culling on or off
    pub fn set_frustum_culling(&mut self, enabled: bool) {
        self.frustum_culling = enabled;
    }

    /// Create an empty, enabled game object on the default layer
    pub fn create_game_object(&mut self, name: impl Into<String>) -> GameObjectId {
        let name = name.into();
        log::info!("Creating game object '{}'", name);
        self.objects.insert(GameObject::new(name))
    }

    /// Destroy a game object and free all of its component slots
    ///
    /// Returns false if the id was already dead. Transforms parented to the
    /// destroyed object's transform become roots.
    pub fn destroy_game_object(&mut self, id: GameObjectId) -> bool {
        let Some(object) = self.objects.remove(id) else {
            return false;
        };
        log::info!("Destroying game object '{}'", object.name());

        let slots = object.components;
        if let Some(handle) = slots.transform {
            self.tables.transforms.remove(handle);
        }
        if let Some(handle) = slots.camera {
            self.tables.cameras.remove(handle);
        }
        if let Some(handle) = slots.mesh_renderer {
            self.tables.mesh_renderers.remove(handle);
        }
        true
    }

    /// Whether the id refers to a live game object
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Look up a game object
    pub fn game_object(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Look up a game object mutably
    pub fn game_object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Number of live game objects
    pub fn game_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over every live game object
    pub fn game_objects(&self) -> impl Iterator<Item = (GameObjectId, &GameObject)> {
        self.objects.iter()
    }

    /// Enable or disable a game object, false if the id is dead
    pub fn set_enabled(&mut self, id: GameObjectId, enabled: bool) -> bool {
        let Some(object) = self.objects.get_mut(id) else {
            return false;
        };
        object.set_enabled(enabled);
        true
    }

    /// Move a game object to `layer`, false if the id is dead
    pub fn set_layer(&mut self, id: GameObjectId, layer: LayerMask) -> bool {
        let Some(object) = self.objects.get_mut(id) else {
            return false;
        };
        object.set_layer(layer);
        true
    }

    /// Attach a component, replacing any existing component of the same kind
    ///
    /// The replaced component's slot is freed, so handles to it stop resolving.
    /// Returns `None` if the game object does not exist.
    pub fn add_component<T: Component>(
        &mut self,
        id: GameObjectId,
        component: T,
    ) -> Option<ComponentHandle<T>> {
        let object = self.objects.get_mut(id)?;
        let table = T::table_mut(&mut self.tables);

        let previous = T::slot_mut(&mut object.components).take();
        if let Some(previous) = previous {
            log::debug!("Replacing {:?} component on '{}'", T::KIND, object.name());
            table.remove(previous);
        }
        let handle = table.create(component);
        *T::slot_mut(&mut object.components) = Some(handle);
        Some(handle)
    }

    /// Attach a camera with default settings and a viewport covering the back buffer
    pub fn add_camera(&mut self, id: GameObjectId) -> Option<ComponentHandle<Camera>> {
        let (width, height) = self.back_buffer_size;
        self.add_component(id, Camera::new(width, height))
    }

    /// Component of kind `T` attached to a game object
    pub fn component<T: Component>(&self, id: GameObjectId) -> Option<&T> {
        let handle = self.objects.get(id)?.handle::<T>()?;
        T::table(&self.tables).get(handle)
    }

    /// Mutable component of kind `T` attached to a game object
    pub fn component_mut<T: Component>(&mut self, id: GameObjectId) -> Option<&mut T> {
        let handle = self.objects.get(id)?.handle::<T>()?;
        T::table_mut(&mut self.tables).get_mut(handle)
    }

    /// Resolve a component handle directly
    pub fn component_by_handle<T: Component>(&self, handle: ComponentHandle<T>) -> Option<&T> {
        T::table(&self.tables).get(handle)
    }

    /// Resolve a component handle mutably
    pub fn component_by_handle_mut<T: Component>(
        &mut self,
        handle: ComponentHandle<T>,
    ) -> Option<&mut T> {
        T::table_mut(&mut self.tables).get_mut(handle)
    }

    /// Detach and return the component of kind `T`
    pub fn remove_component<T: Component>(&mut self, id: GameObjectId) -> Option<T> {
        let object = self.objects.get_mut(id)?;
        let handle = T::slot_mut(&mut object.components).take()?;
        T::table_mut(&mut self.tables).remove(handle)
    }

    /// The table holding every component of kind `T`
    pub fn storage<T: Component>(&self) -> &ComponentStorage<T> {
        T::table(&self.tables)
    }

    /// Deep-copy a game object
    ///
    /// Every component is cloned into a freshly allocated slot, so the copy
    /// shares no component state with the source. A copied transform keeps
    /// the source's parent. Returns `None` if the source does not exist.
    pub fn clone_game_object(&mut self, id: GameObjectId) -> Option<GameObjectId> {
        let source = self.objects.get(id)?;
        let name = source.name().to_string();
        let layer = source.layer();
        let enabled = source.is_enabled();

        let transform = self.component::<TransformComponent>(id).cloned();
        let camera = self.component::<Camera>(id).cloned();
        let mesh_renderer = self.component::<MeshRenderer>(id).cloned();

        let copy = self.create_game_object(name);
        if let Some(object) = self.objects.get_mut(copy) {
            object.set_layer(layer);
            object.set_enabled(enabled);
        }
        if let Some(component) = transform {
            self.add_component(copy, component);
        }
        if let Some(component) = camera {
            self.add_component(copy, component);
        }
        if let Some(component) = mesh_renderer {
            self.add_component(copy, component);
        }
        Some(copy)
    }

    /// World matrix of a transform, composed with its ancestors
    ///
    /// A parent handle that no longer resolves ends the chain there. Chains
    /// longer than the hierarchy depth limit are treated as cycles and cut.
    pub fn local_to_world(&self, transform: ComponentHandle<TransformComponent>) -> Mat4 {
        let mut matrix = Mat4::identity();
        let mut current = Some(transform);
        let mut depth = 0;

        while let Some(handle) = current {
            let Some(node) = self.tables.transforms.get(handle) else {
                break;
            };
            if depth == MAX_HIERARCHY_DEPTH {
                log::warn!(
                    "Transform hierarchy deeper than {} links, assuming a parent cycle",
                    MAX_HIERARCHY_DEPTH
                );
                break;
            }
            matrix = node.local_matrix() * matrix;
            current = node.parent();
            depth += 1;
        }
        matrix
    }

    /// World matrix of a game object's transform, `None` without a transform
    pub fn object_local_to_world(&self, id: GameObjectId) -> Option<Mat4> {
        let handle = self.objects.get(id)?.handle::<TransformComponent>()?;
        Some(self.local_to_world(handle))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
