//! Render target surfaces

/// Texel storage of a render texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureDataType {
    /// 8-bit unsigned normalized per channel
    #[default]
    UByte,
    /// 32-bit float per channel
    Float,
}

/// Description of an offscreen 2D render texture
///
/// The device owns the GPU storage; this is what the core needs to bind it.
/// A zero-sized texture has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RenderTexture {
    name: String,
    width: u32,
    height: u32,
    data_type: TextureDataType,
}

impl RenderTexture {
    /// Describe a 2D render texture
    pub fn new_2d(width: u32, height: u32, data_type: TextureDataType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data_type,
        }
    }

    /// Debug name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel storage
    pub fn data_type(&self) -> TextureDataType {
        self.data_type
    }

    /// Whether the texture has a non-empty size
    pub fn is_created(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Surface a camera renders into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RenderTarget {
    /// The default framebuffer
    #[default]
    BackBuffer,
    /// An offscreen texture
    Texture(RenderTexture),
}
