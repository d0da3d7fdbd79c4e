//! Materials as seen by the scene core
//!
//! Shader compilation and material graphs belong to the device layer. The core
//! only needs to know whether a material has a usable shader and what to hand
//! the device when drawing with it.

use crate::render::device::{BlendMode, TextureHandle};

/// Linked shader program owned by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderProgram {
    handle: u32,
    linked: bool,
}

impl ShaderProgram {
    /// Program that compiled and linked
    pub const fn linked(handle: u32) -> Self {
        Self { handle, linked: true }
    }

    /// Program whose compile or link step failed
    pub const fn failed(handle: u32) -> Self {
        Self { handle, linked: false }
    }

    /// Device handle
    pub const fn handle(self) -> u32 {
        self.handle
    }

    /// Whether the program can be used for drawing
    pub const fn is_valid(self) -> bool {
        self.linked
    }
}

/// Face culling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    #[default]
    Back,
}

/// Shader plus the fixed-function state and textures it draws with
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    shader: Option<ShaderProgram>,
    textures: Vec<(String, TextureHandle)>,
    cull_mode: CullMode,
    blend_mode: BlendMode,
    depth_test: bool,
    depth_write: bool,
}

impl Material {
    /// Material without a shader; never drawn until one is set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: None,
            textures: Vec::new(),
            cull_mode: CullMode::Back,
            blend_mode: BlendMode::Off,
            depth_test: true,
            depth_write: true,
        }
    }

    /// Builder pattern: Set shader
    pub fn with_shader(mut self, shader: ShaderProgram) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Builder pattern: Bind a texture to a sampler name
    pub fn with_texture(mut self, sampler: impl Into<String>, texture: TextureHandle) -> Self {
        self.set_texture(sampler, texture);
        self
    }

    /// Builder pattern: Set face culling
    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    /// Builder pattern: Set blending
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Builder pattern: Set depth test and depth write
    pub fn with_depth(mut self, test: bool, write: bool) -> Self {
        self.depth_test = test;
        self.depth_write = write;
        self
    }

    /// Bind a texture to a sampler name, replacing an earlier binding
    pub fn set_texture(&mut self, sampler: impl Into<String>, texture: TextureHandle) {
        let sampler = sampler.into();
        match self.textures.iter_mut().find(|(name, _)| *name == sampler) {
            Some(binding) => binding.1 = texture,
            None => self.textures.push((sampler, texture)),
        }
    }

    /// Debug name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shader program, if one is set
    pub fn shader(&self) -> Option<ShaderProgram> {
        self.shader
    }

    /// Whether the material has a shader that can be drawn with
    pub fn is_valid_shader(&self) -> bool {
        self.shader.is_some_and(ShaderProgram::is_valid)
    }

    /// Sampler bindings in insertion order
    pub fn textures(&self) -> &[(String, TextureHandle)] {
        &self.textures
    }

    /// Face culling
    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// Blending used when drawing with this material
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Whether fragments are depth tested
    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    /// Whether fragments write depth
    pub fn depth_write(&self) -> bool {
        self.depth_write
    }
}
