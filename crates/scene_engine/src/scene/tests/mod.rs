//! Scene-level tests driving the full render pass through a recording device

mod render_pipeline;

use std::sync::Arc;

use crate::ecs::components::TransformComponent;
use crate::ecs::{GameObjectId, World};
use crate::foundation::math::Vec3;
use crate::render::{Camera, Material, Mesh, MeshRenderer, ShaderProgram, SubMesh, VertexBufferHandle};
use crate::scene::{Aabb, Scene};

/// Unit cube centred on the origin, one sub-mesh
fn cube_mesh(buffer: u32) -> Arc<Mesh> {
    Arc::new(Mesh::new(vec![SubMesh::new(
        Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5)),
        VertexBufferHandle(buffer),
        36,
    )]))
}

fn lit_material() -> Arc<Material> {
    Arc::new(Material::new("lit").with_shader(ShaderProgram::linked(1)))
}

/// Perspective camera at `position` looking down -Z: 60 degree fov, square, depth 0.1..100
fn spawn_camera(world: &mut World, scene: &mut Scene, position: Vec3, order: u32) -> GameObjectId {
    let id = world.create_game_object(format!("camera {order}"));
    world.add_component(id, TransformComponent::from_position(position));
    let mut camera = Camera::new(800, 600);
    camera.set_perspective(60.0, 1.0, 0.1, 100.0);
    camera.set_render_order(order);
    world.add_component(id, camera);
    scene.add(id);
    id
}

/// Unit cube at `position` with a drawable material
fn spawn_cube(world: &mut World, scene: &mut Scene, position: Vec3, buffer: u32) -> GameObjectId {
    let id = world.create_game_object(format!("cube {buffer}"));
    world.add_component(id, TransformComponent::from_position(position));
    let mut renderer = MeshRenderer::with_mesh(cube_mesh(buffer));
    renderer.set_material(Some(lit_material()), 0);
    world.add_component(id, renderer);
    scene.add(id);
    id
}
