//! Mesh geometry as seen by the scene core
//!
//! Vertex and index data live on the device; a mesh only carries the buffer
//! handles and the local-space bounds needed for culling. Meshes are immutable
//! once built and shared between renderers through `Arc`.

use crate::render::device::VertexBufferHandle;
use crate::scene::Aabb;

/// Independently drawable part of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh {
    /// Local-space bounds of this part
    pub aabb: Aabb,
    /// Device buffer holding this part's vertices and indices
    pub buffer: VertexBufferHandle,
    /// Number of indices to draw
    pub index_count: u32,
}

impl SubMesh {
    /// Create a sub-mesh
    pub fn new(aabb: Aabb, buffer: VertexBufferHandle, index_count: u32) -> Self {
        Self { aabb, buffer, index_count }
    }
}

/// Mesh made of one or more sub-meshes
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    aabb: Aabb,
    sub_meshes: Vec<SubMesh>,
}

impl Mesh {
    /// Create a mesh whose bounds enclose every sub-mesh
    ///
    /// A mesh without sub-meshes gets an empty box at the origin.
    pub fn new(sub_meshes: Vec<SubMesh>) -> Self {
        let aabb = sub_meshes
            .iter()
            .map(|sub_mesh| sub_mesh.aabb)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { aabb, sub_meshes }
    }

    /// Create a mesh with explicit bounds
    pub fn with_bounds(aabb: Aabb, sub_meshes: Vec<SubMesh>) -> Self {
        Self { aabb, sub_meshes }
    }

    /// Local-space bounds of the whole mesh
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// All sub-meshes, in draw order
    pub fn sub_meshes(&self) -> &[SubMesh] {
        &self.sub_meshes
    }

    /// Number of sub-meshes
    pub fn sub_mesh_count(&self) -> usize {
        self.sub_meshes.len()
    }
}
