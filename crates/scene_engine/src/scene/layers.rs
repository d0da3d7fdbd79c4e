//! Render layer bits used to filter which objects a camera draws
//!
//! A game object sits on one or more layers; a camera renders the objects
//! whose layers share at least one bit with its mask.

use bitflags::bitflags;

bitflags! {
    /// Set of render layers
    ///
    /// Any of the 32 bits may be used; the named constants are conventions only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Layer every object and camera starts on
        const DEFAULT = 1 << 0;
        /// Conventional layer for screen-space overlays and 2D cameras
        const OVERLAY = 1 << 1;
        /// Every layer
        const ALL = !0;
    }
}

impl LayerMask {
    /// Mask from raw bits, keeping bits without a named constant
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Whether an object on `layer` is drawn by a camera with this mask
    pub const fn renders(self, layer: Self) -> bool {
        self.intersects(layer)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}
