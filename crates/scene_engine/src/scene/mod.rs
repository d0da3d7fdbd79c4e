//! Scene management: visibility, layers and the per-camera render pass

pub mod bounds;
pub mod frustum;
pub mod layers;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod serialization;

#[cfg(test)]
mod tests;

pub use bounds::{Aabb, Ray};
pub use frustum::{Containment, Frustum, Plane};
pub use layers::LayerMask;
pub use scene::Scene;
pub use serialization::{deserialize_scene, parse_camera, serialize_camera, serialize_scene, SceneParseError};
