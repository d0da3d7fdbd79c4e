//! # Scene Engine
//!
//! Runtime core of a multi-camera 3D renderer: component storage, frustum
//! culling and per-camera draw submission.
//!
//! ## Features
//!
//! - **Component Storage**: Generational arenas with typed handles per component kind
//! - **Multi-Camera Rendering**: Cameras visited in render order, each with its own
//!   projection, viewport, clear behaviour, layer mask and target surface
//! - **Frustum Culling**: Whole-mesh and per-submesh AABB tests against the camera frustum
//! - **Scene Files**: Locale-independent text serialization of cameras and game objects
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! let mut world = World::new();
//! let mut scene = Scene::new();
//!
//! let camera = world.create_game_object("camera");
//! world.add_component(camera, TransformComponent::from_position(Vec3::new(0.0, 0.0, 5.0)));
//! world.add_camera(camera);
//! scene.add(camera);
//!
//! let mut device = RecordingDevice::new();
//! let stats = scene.render(&mut world, &mut device);
//! assert_eq!(stats.cameras_rendered, 1);
//! ```
//!
//! The graphics device, asset loading and windowing are external collaborators;
//! the core talks to the device through [`render::GraphicsDevice`].

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod ecs;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig},
        ecs::{
            components::TransformComponent, Component, ComponentHandle, GameObject,
            GameObjectId, World,
        },
        foundation::math::{Mat4, Mat4Ext, Quat, Vec3, Vec4},
        render::{
            BlendMode, Camera, ClearFlag, CullMode, FrameStats, GraphicsDevice, Material,
            Mesh, MeshRenderer, ProjectionType, RecordingDevice, RenderTarget, RenderTexture,
            ShaderProgram, SubMesh, Viewport,
        },
        scene::{
            deserialize_scene, parse_camera, serialize_camera, serialize_scene, Aabb,
            Containment, Frustum, LayerMask, Plane, Ray, Scene, SceneParseError,
        },
    };
}
