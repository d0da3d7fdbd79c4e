//! Transform component for the ECS system
//!
//! Position, rotation and scale relative to an optional parent transform.
//! World matrices are composed by [`World::local_to_world`](crate::ecs::World::local_to_world),
//! which walks the parent handles.

use crate::ecs::storage::ComponentHandle;
use crate::foundation::math::{Mat4, Quat, Vec3};

/// ECS Transform component
///
/// Y-up right-handed; an unrotated object looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,

    /// Scale factors relative to the parent
    pub scale: Vec3,

    parent: Option<ComponentHandle<TransformComponent>>,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            parent: None,
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from full transform specification
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            parent: None,
        }
    }

    /// Local matrix in TRS order (scale first, then rotate, then translate)
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Parent transform, if any
    pub fn parent(&self) -> Option<ComponentHandle<Self>> {
        self.parent
    }

    /// Attach to (or with `None` detach from) a parent transform
    pub fn set_parent(&mut self, parent: Option<ComponentHandle<Self>>) {
        self.parent = parent;
    }

    /// Place the transform at `eye` and turn it so -Z points at `target`
    ///
    /// Leaves the rotation untouched when `eye` and `target` coincide.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.position = eye;
        let back = eye - target;
        if back.norm_squared() > f32::EPSILON {
            self.rotation = Quat::face_towards(&back, &up);
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from axis-angle
    pub fn with_rotation_axis_angle(mut self, axis: Vec3, angle: f32) -> Self {
        self.rotation = Quat::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set parent
    pub fn with_parent(mut self, parent: ComponentHandle<Self>) -> Self {
        self.parent = Some(parent);
        self
    }
}
