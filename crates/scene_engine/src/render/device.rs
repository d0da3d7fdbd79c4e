//! Graphics device capability
//!
//! The scene core never creates GPU resources itself. Everything it needs from
//! the low-level device goes through [`GraphicsDevice`], which a back end
//! implements on top of its own buffers, textures and pipelines.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::camera::{ClearFlag, Viewport};
use crate::render::material::Material;
use crate::render::target::RenderTarget;

/// Device handle of a vertex/index buffer pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferHandle(pub u32);

/// Device handle of a sampled texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Blend state for subsequent draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending (fully opaque)
    #[default]
    Off,
    /// Standard alpha blending
    AlphaBlend,
    /// Additive blending
    Additive,
}

/// Per-draw values bound alongside a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUniforms {
    /// Model-view-projection matrix
    pub model_view_projection: Mat4,
    /// Model (local-to-world) matrix
    pub local_to_world: Mat4,
}

/// Low-level graphics device the scene core submits work to
pub trait GraphicsDevice {
    /// Direct subsequent draws into `target`, restricted to `viewport`
    fn set_render_target(&mut self, target: &RenderTarget, viewport: Viewport);

    /// Clear the current target; never called with [`ClearFlag::DontClear`]
    fn clear(&mut self, flag: ClearFlag, color: Vec3);

    /// Set the blend state
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Bind a material's shader, textures and state with the given uniforms
    fn apply_material(&mut self, material: &Material, uniforms: &DrawUniforms);

    /// Bind a vertex/index buffer pair
    fn bind_vertex_buffer(&mut self, buffer: VertexBufferHandle);

    /// Draw `index_count` indices from the bound buffer
    fn draw(&mut self, buffer: VertexBufferHandle, index_count: u32);
}
