//! Rendering side of the scene core
//!
//! Cameras, meshes, materials and the mesh renderer that culls and submits
//! them, plus the [`GraphicsDevice`] capability they submit to.

pub mod camera;
pub mod device;
pub mod frame;
pub mod material;
pub mod mesh;
pub mod mesh_renderer;
pub mod recording;
pub mod target;

pub use camera::{Camera, ClearFlag, OrthoParams, ProjectionType, Viewport};
pub use device::{BlendMode, DrawUniforms, GraphicsDevice, TextureHandle, VertexBufferHandle};
pub use frame::FrameStats;
pub use material::{CullMode, Material, ShaderProgram};
pub use mesh::{Mesh, SubMesh};
pub use mesh_renderer::MeshRenderer;
pub use recording::{DeviceCommand, RecordingDevice};
pub use target::{RenderTarget, RenderTexture, TextureDataType};
