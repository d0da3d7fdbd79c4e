//! Built-in component types that live in the ECS module
//!
//! Camera and mesh renderer components live with the render code they drive.

pub mod transform;

pub use transform::TransformComponent;
