//! Mesh renderer component
//!
//! Binds a shared [`Mesh`] to one material slot per sub-mesh and turns the
//! visible parts of it into draw calls.

use std::sync::Arc;

use crate::foundation::math::Mat4;
use crate::render::device::{DrawUniforms, GraphicsDevice};
use crate::render::frame::FrameStats;
use crate::render::material::Material;
use crate::render::mesh::Mesh;
use crate::scene::Frustum;

/// Mesh plus per-submesh materials
#[derive(Debug, Clone, Default)]
pub struct MeshRenderer {
    mesh: Option<Arc<Mesh>>,
    materials: Vec<Option<Arc<Material>>>,
}

impl MeshRenderer {
    /// Renderer without a mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer for `mesh` with every material slot empty
    pub fn with_mesh(mesh: Arc<Mesh>) -> Self {
        let mut renderer = Self::new();
        renderer.set_mesh(mesh);
        renderer
    }

    /// Cull and draw the mesh
    ///
    /// The whole-mesh bounds are tested first and reject the renderer outright.
    /// Each sub-mesh then needs a material with a valid shader and its own
    /// bounds inside the frustum. Survivors are drawn with their material's
    /// blend mode, which is off unless the material sets one.
    pub fn render<D: GraphicsDevice + ?Sized>(
        &self,
        model_view_projection: &Mat4,
        frustum: &Frustum,
        local_to_world: &Mat4,
        device: &mut D,
        frame: &mut FrameStats,
    ) {
        let Some(mesh) = &self.mesh else {
            return;
        };

        if !frustum.intersects_aabb(&mesh.aabb().transformed(local_to_world)) {
            frame.renderers_culled += 1;
            return;
        }
        frame.renderers_submitted += 1;

        let uniforms = DrawUniforms {
            model_view_projection: *model_view_projection,
            local_to_world: *local_to_world,
        };

        for (sub_mesh, slot) in mesh.sub_meshes().iter().zip(&self.materials) {
            let Some(material) = slot.as_deref().filter(|material| material.is_valid_shader()) else {
                frame.sub_meshes_skipped += 1;
                continue;
            };

            if !frustum.intersects_aabb(&sub_mesh.aabb.transformed(local_to_world)) {
                frame.sub_meshes_culled += 1;
                continue;
            }

            log::trace!(
                "Drawing {} indices from {:?} with material '{}'",
                sub_mesh.index_count,
                sub_mesh.buffer,
                material.name()
            );
            frame.set_blend_mode(device, material.blend_mode());
            device.apply_material(material, &uniforms);
            device.bind_vertex_buffer(sub_mesh.buffer);
            device.draw(sub_mesh.buffer, sub_mesh.index_count);
            frame.draw_calls += 1;
        }
    }

    /// Replace the mesh and resize the material slots to its sub-mesh count
    ///
    /// Slots that already exist keep their material; new slots start empty and
    /// extra slots are dropped.
    pub fn set_mesh(&mut self, mesh: Arc<Mesh>) {
        self.materials.resize(mesh.sub_mesh_count(), None);
        self.mesh = Some(mesh);
    }

    /// Remove the mesh and every material slot
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
        self.materials.clear();
    }

    /// Current mesh
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// Put `material` in slot `index`; out-of-range indices are ignored
    pub fn set_material(&mut self, material: Option<Arc<Material>>, index: usize) {
        if let Some(slot) = self.materials.get_mut(index) {
            *slot = material;
        }
    }

    /// Material in slot `index`
    pub fn material(&self, index: usize) -> Option<&Arc<Material>> {
        self.materials.get(index).and_then(Option::as_ref)
    }

    /// Number of material slots
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
