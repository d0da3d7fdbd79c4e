//! Game object identity and capability set

use crate::ecs::component::{Component, ComponentSlots};
use crate::ecs::storage::ComponentHandle;
use crate::scene::LayerMask;

slotmap::new_key_type! {
    /// Generational identifier of a game object owned by a [`World`](crate::ecs::World)
    pub struct GameObjectId;
}

/// A named object carrying at most one component of each kind
///
/// Game objects are owned by the [`World`](crate::ecs::World) and only ever hold
/// handles into the component tables. There is deliberately no `Clone` impl:
/// a copy must get its own component slots, see
/// [`World::clone_game_object`](crate::ecs::World::clone_game_object).
#[derive(Debug)]
pub struct GameObject {
    name: String,
    layer: LayerMask,
    enabled: bool,
    pub(crate) components: ComponentSlots,
}

impl GameObject {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            layer: LayerMask::DEFAULT,
            enabled: true,
            components: ComponentSlots::default(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Layers this object is drawn on
    pub fn layer(&self) -> LayerMask {
        self.layer
    }

    /// Move the object to a different set of layers
    pub fn set_layer(&mut self, layer: LayerMask) {
        self.layer = layer;
    }

    /// Disabled objects are skipped by the render pass, cameras included
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the object
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Handle of the attached component of kind `T`
    pub fn handle<T: Component>(&self) -> Option<ComponentHandle<T>> {
        T::slot(&self.components)
    }

    /// Whether a component of kind `T` is attached
    pub fn has<T: Component>(&self) -> bool {
        self.handle::<T>().is_some()
    }
}
