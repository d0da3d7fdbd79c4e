//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene core. All matrices are
//! column-vector convention (`clip = projection * view * model * point`) and the
//! projection helpers target an OpenGL-style clip volume with depth in `[-1, 1]`.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Transform a point by an affine or projective matrix, including the w divide
    pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
        let h = matrix * point.push(1.0);
        h.xyz() / h.w
    }
}

/// Extension trait for Mat4 with projection construction helpers
///
/// The matrices are built by hand rather than through `nalgebra::Orthographic3` /
/// `Perspective3`, whose constructors assert on degenerate parameters. Degenerate
/// input here produces non-finite entries instead of a panic.
pub trait Mat4Ext {
    /// Create an orthographic projection matrix
    ///
    /// `bottom` may be greater than `top` to produce a y-down screen mapping.
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Create a perspective projection matrix from a vertical field of view in radians
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Mat4::new(
            2.0 / width, 0.0, 0.0, -(right + left) / width,
            0.0, 2.0 / height, 0.0, -(top + bottom) / height,
            0.0, 0.0, -2.0 / depth, -(far + near) / depth,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let focal = 1.0 / (fov_y * 0.5).tan();
        let depth = near - far;

        Mat4::new(
            focal / aspect, 0.0, 0.0, 0.0,
            0.0, focal, 0.0, 0.0,
            0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }
}
