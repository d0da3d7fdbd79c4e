//! Per-frame submission state

use crate::render::device::{BlendMode, GraphicsDevice};

/// Counters and device state for one call to [`Scene::render`](crate::scene::Scene::render)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Cameras that rendered a pass
    pub cameras_rendered: u32,
    /// Renderers whose whole-mesh bounds passed the frustum test
    pub renderers_submitted: u32,
    /// Renderers rejected by the whole-mesh frustum test
    pub renderers_culled: u32,
    /// Sub-meshes rejected by their own frustum test
    pub sub_meshes_culled: u32,
    /// Sub-meshes skipped for an empty material slot or an invalid shader
    pub sub_meshes_skipped: u32,
    /// Draw calls issued
    pub draw_calls: u32,
    blend_mode: Option<BlendMode>,
}

impl FrameStats {
    /// Fresh state for a new frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend state last sent to the device this frame
    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.blend_mode
    }

    /// Send a blend state to the device unless it is already current
    pub fn set_blend_mode<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D, mode: BlendMode) {
        if self.blend_mode != Some(mode) {
            device.set_blend_mode(mode);
            self.blend_mode = Some(mode);
        }
    }

    /// Forget the cached device state, e.g. after switching render targets
    pub fn invalidate_device_state(&mut self) {
        self.blend_mode = None;
    }
}
