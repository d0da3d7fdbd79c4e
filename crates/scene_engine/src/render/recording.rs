//! In-memory graphics device
//!
//! Records every call instead of talking to a GPU. Used for headless runs
//! and for checking what a render pass submitted.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::camera::{ClearFlag, Viewport};
use crate::render::device::{BlendMode, DrawUniforms, GraphicsDevice, VertexBufferHandle};
use crate::render::material::Material;
use crate::render::target::RenderTarget;

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Target and viewport switch
    SetRenderTarget {
        /// Surface drawn into
        target: RenderTarget,
        /// Viewport on that surface
        viewport: Viewport,
    },
    /// Clear of the current target
    Clear {
        /// What was cleared
        flag: ClearFlag,
        /// Fill colour
        color: Vec3,
    },
    /// Blend state change
    SetBlendMode(BlendMode),
    /// Material bind
    ApplyMaterial {
        /// Material name
        material: String,
        /// Model-view-projection matrix bound with it
        model_view_projection: Mat4,
    },
    /// Buffer bind
    BindVertexBuffer(VertexBufferHandle),
    /// Indexed draw
    Draw {
        /// Buffer drawn from
        buffer: VertexBufferHandle,
        /// Indices drawn
        index_count: u32,
    },
}

/// Graphics device that records the calls it receives
#[derive(Debug, Default)]
pub struct RecordingDevice {
    commands: Vec<DeviceCommand>,
}

impl RecordingDevice {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in call order
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn take_commands(&mut self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of draw calls recorded
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DeviceCommand::Draw { .. }))
            .count()
    }

    /// Viewports of every target switch, in call order
    pub fn render_passes(&self) -> Vec<Viewport> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DeviceCommand::SetRenderTarget { viewport, .. } => Some(*viewport),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DeviceCommand) {
        log::trace!("Device command: {:?}", command);
        self.commands.push(command);
    }
}

impl GraphicsDevice for RecordingDevice {
    fn set_render_target(&mut self, target: &RenderTarget, viewport: Viewport) {
        self.record(DeviceCommand::SetRenderTarget {
            target: target.clone(),
            viewport,
        });
    }

    fn clear(&mut self, flag: ClearFlag, color: Vec3) {
        self.record(DeviceCommand::Clear { flag, color });
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.record(DeviceCommand::SetBlendMode(mode));
    }

    fn apply_material(&mut self, material: &Material, uniforms: &DrawUniforms) {
        self.record(DeviceCommand::ApplyMaterial {
            material: material.name().to_string(),
            model_view_projection: uniforms.model_view_projection,
        });
    }

    fn bind_vertex_buffer(&mut self, buffer: VertexBufferHandle) {
        self.record(DeviceCommand::BindVertexBuffer(buffer));
    }

    fn draw(&mut self, buffer: VertexBufferHandle, index_count: u32) {
        self.record(DeviceCommand::Draw { buffer, index_count });
    }
}
