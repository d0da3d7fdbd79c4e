//! Component trait and the fixed capability set
//!
//! The set of component kinds is closed: every kind has its own table in
//! [`ComponentTables`] and its own optional handle in [`ComponentSlots`].
//! The [`Component`] impls map a type to both at compile time, so looking up
//! a game object's camera is a field access rather than a runtime type query.

use crate::ecs::components::TransformComponent;
use crate::ecs::storage::{ComponentHandle, ComponentStorage};
use crate::render::{Camera, MeshRenderer};

/// Kinds of component a game object can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Hierarchical position / rotation / scale
    Transform,
    /// View into the scene with its own target surface
    Camera,
    /// Mesh plus per-submesh materials
    MeshRenderer,
}

/// A type that can be attached to a game object
pub trait Component: Clone + 'static {
    /// Which slot of the capability set this type occupies
    const KIND: ComponentKind;

    /// The table holding every component of this kind
    fn table(tables: &ComponentTables) -> &ComponentStorage<Self>;

    /// Mutable access to the table holding every component of this kind
    fn table_mut(tables: &mut ComponentTables) -> &mut ComponentStorage<Self>;

    /// The handle a game object holds for this kind, if any
    fn slot(slots: &ComponentSlots) -> Option<ComponentHandle<Self>>;

    /// Mutable access to the handle slot for this kind
    fn slot_mut(slots: &mut ComponentSlots) -> &mut Option<ComponentHandle<Self>>;
}

/// One table per component kind
#[derive(Debug, Default)]
pub struct ComponentTables {
    pub(crate) transforms: ComponentStorage<TransformComponent>,
    pub(crate) cameras: ComponentStorage<Camera>,
    pub(crate) mesh_renderers: ComponentStorage<MeshRenderer>,
}

impl ComponentTables {
    /// Tables with `capacity` slots reserved in each
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transforms: ComponentStorage::with_capacity(capacity),
            cameras: ComponentStorage::with_capacity(capacity),
            mesh_renderers: ComponentStorage::with_capacity(capacity),
        }
    }
}

/// The optional handle per kind stored on a game object
#[derive(Debug, Default)]
pub struct ComponentSlots {
    pub(crate) transform: Option<ComponentHandle<TransformComponent>>,
    pub(crate) camera: Option<ComponentHandle<Camera>>,
    pub(crate) mesh_renderer: Option<ComponentHandle<MeshRenderer>>,
}

impl Component for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn table(tables: &ComponentTables) -> &ComponentStorage<Self> {
        &tables.transforms
    }

    fn table_mut(tables: &mut ComponentTables) -> &mut ComponentStorage<Self> {
        &mut tables.transforms
    }

    fn slot(slots: &ComponentSlots) -> Option<ComponentHandle<Self>> {
        slots.transform
    }

    fn slot_mut(slots: &mut ComponentSlots) -> &mut Option<ComponentHandle<Self>> {
        &mut slots.transform
    }
}

impl Component for Camera {
    const KIND: ComponentKind = ComponentKind::Camera;

    fn table(tables: &ComponentTables) -> &ComponentStorage<Self> {
        &tables.cameras
    }

    fn table_mut(tables: &mut ComponentTables) -> &mut ComponentStorage<Self> {
        &mut tables.cameras
    }

    fn slot(slots: &ComponentSlots) -> Option<ComponentHandle<Self>> {
        slots.camera
    }

    fn slot_mut(slots: &mut ComponentSlots) -> &mut Option<ComponentHandle<Self>> {
        &mut slots.camera
    }
}

impl Component for MeshRenderer {
    const KIND: ComponentKind = ComponentKind::MeshRenderer;

    fn table(tables: &ComponentTables) -> &ComponentStorage<Self> {
        &tables.mesh_renderers
    }

    fn table_mut(tables: &mut ComponentTables) -> &mut ComponentStorage<Self> {
        &mut tables.mesh_renderers
    }

    fn slot(slots: &ComponentSlots) -> Option<ComponentHandle<Self>> {
        slots.mesh_renderer
    }

    fn slot_mut(slots: &mut ComponentSlots) -> &mut Option<ComponentHandle<Self>> {
        &mut slots.mesh_renderer
    }
}
