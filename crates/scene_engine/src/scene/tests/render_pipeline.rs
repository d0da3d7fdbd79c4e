//! Multi-camera render pass: ordering, culling, layer filtering and clearing

use super::{cube_mesh, lit_material, spawn_camera, spawn_cube};
use crate::ecs::components::TransformComponent;
use crate::ecs::{GameObjectId, World};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{
    Camera, ClearFlag, DeviceCommand, FrameStats, Material, MeshRenderer, RecordingDevice, RenderTarget,
    RenderTexture, ShaderProgram, TextureDataType, VertexBufferHandle, Viewport,
};
use crate::scene::{LayerMask, Scene};
use approx::assert_relative_eq;
use std::sync::Arc;

fn set_viewport(world: &mut World, id: GameObjectId, viewport: Viewport) {
    if let Some(camera) = world.component_mut::<Camera>(id) {
        camera.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height);
    }
}

#[test]
fn test_cameras_render_in_ascending_order() {
    let mut world = World::new();
    let mut scene = Scene::new();

    for (order, width) in [(2, 102), (0, 100), (1, 101)] {
        let id = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), order);
        set_viewport(&mut world, id, Viewport::new(0, 0, width, 100));
    }

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert_eq!(stats.cameras_rendered, 3);
    let widths: Vec<i32> = device.render_passes().iter().map(|v| v.width).collect();
    assert_eq!(widths, vec![100, 101, 102]);
}

#[test]
fn test_equal_orders_keep_insertion_order() {
    let mut world = World::new();
    let mut scene = Scene::new();

    for width in [300, 100, 200] {
        let id = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 5);
        set_viewport(&mut world, id, Viewport::new(0, 0, width, 100));
    }

    let mut device = RecordingDevice::new();
    scene.render(&mut world, &mut device);

    let widths: Vec<i32> = device.render_passes().iter().map(|v| v.width).collect();
    assert_eq!(widths, vec![300, 100, 200]);
}

#[test]
fn test_mesh_out_of_view_is_culled() {
    let mut world = World::new();
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    spawn_cube(&mut world, &mut scene, Vec3::new(500.0, 0.0, 0.0), 1);
    spawn_cube(&mut world, &mut scene, Vec3::new(0.0, 0.0, 50.0), 2);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert_eq!(device.draw_count(), 0);
    assert_eq!(stats.renderers_culled, 2);
    assert_eq!(stats.draw_calls, 0);
}

#[test]
fn test_mesh_beyond_far_plane_is_culled() {
    let mut world = World::new();
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    // Straight ahead; far plane sits at z = -90
    spawn_cube(&mut world, &mut scene, Vec3::new(0.0, 0.0, -80.0), 1);
    spawn_cube(&mut world, &mut scene, Vec3::new(0.0, 0.0, -200.0), 2);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert_eq!(stats.renderers_culled, 1);
    assert_eq!(device.draw_count(), 1);
    assert!(device.commands().contains(&DeviceCommand::BindVertexBuffer(VertexBufferHandle(1))));
    assert!(!device.commands().contains(&DeviceCommand::BindVertexBuffer(VertexBufferHandle(2))));
}

#[test]
fn test_partially_visible_mesh_is_drawn() {
    let mut world = World::new();
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    // Half-width of the view at distance 10 is about 5.77; this cube spans 5.5..6.5
    spawn_cube(&mut world, &mut scene, Vec3::new(6.0, 0.0, 0.0), 1);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert!(device.draw_count() >= 1);
    assert_eq!(stats.renderers_culled, 0);
}

#[test]
fn test_draws_follow_scene_order_with_model_view_projection() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    spawn_cube(&mut world, &mut scene, Vec3::new(1.0, 0.0, 0.0), 7);
    spawn_cube(&mut world, &mut scene, Vec3::new(-1.0, 0.0, 0.0), 3);

    let mut device = RecordingDevice::new();
    scene.render(&mut world, &mut device);

    let draws: Vec<u32> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::Draw { buffer, .. } => Some(buffer.0),
            _ => None,
        })
        .collect();
    assert_eq!(draws, vec![7, 3]);

    let view_projection = *world.component::<Camera>(camera).expect("camera").view_projection();
    let expected = view_projection * Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0));
    let first_mvp = device.commands().iter().find_map(|c| match c {
        DeviceCommand::ApplyMaterial { model_view_projection, .. } => Some(*model_view_projection),
        _ => None,
    });
    assert_relative_eq!(first_mvp.expect("material applied"), expected, epsilon = 1e-5);
}

#[test]
fn test_layer_mask_filters_renderers() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    if let Some(camera) = world.component_mut::<Camera>(camera) {
        camera.set_layer_mask(LayerMask::OVERLAY);
    }
    spawn_cube(&mut world, &mut scene, Vec3::zeros(), 1);
    let overlay = spawn_cube(&mut world, &mut scene, Vec3::zeros(), 2);
    world.set_layer(overlay, LayerMask::OVERLAY | LayerMask::DEFAULT);

    let mut device = RecordingDevice::new();
    scene.render(&mut world, &mut device);

    assert_eq!(device.draw_count(), 1);
    assert!(device.commands().contains(&DeviceCommand::Draw {
        buffer: VertexBufferHandle(2),
        index_count: 36
    }));
}

#[test]
fn test_invalid_slot_skips_only_that_sub_mesh() {
    let mut world = World::new();
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    let broken = spawn_cube(&mut world, &mut scene, Vec3::zeros(), 1);
    spawn_cube(&mut world, &mut scene, Vec3::new(1.0, 0.0, 0.0), 2);
    if let Some(renderer) = world.component_mut::<MeshRenderer>(broken) {
        renderer.set_material(Some(Arc::new(Material::new("broken").with_shader(ShaderProgram::failed(4)))), 0);
    }

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert_eq!(stats.sub_meshes_skipped, 1);
    assert_eq!(device.draw_count(), 1);
}

#[test]
fn test_disabled_and_incomplete_cameras_are_skipped() {
    let mut world = World::new();
    let mut scene = Scene::new();

    let disabled_camera = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 0);
    if let Some(camera) = world.component_mut::<Camera>(disabled_camera) {
        camera.set_enabled(false);
    }
    let disabled_object = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 1);
    world.set_enabled(disabled_object, false);
    let no_transform = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 2);
    world.remove_component::<TransformComponent>(no_transform);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);

    assert_eq!(stats.cameras_rendered, 0);
    assert!(device.commands().is_empty());
}

#[test]
fn test_clear_flags() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let depth_only = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 0);
    let no_clear = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 1);
    let full = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 2);
    if let Some(camera) = world.component_mut::<Camera>(depth_only) {
        camera.set_clear_flag(ClearFlag::Depth);
    }
    if let Some(camera) = world.component_mut::<Camera>(no_clear) {
        camera.set_clear_flag(ClearFlag::DontClear);
    }
    if let Some(camera) = world.component_mut::<Camera>(full) {
        camera.set_clear_color(Vec3::new(0.2, 0.4, 0.6));
    }

    let mut device = RecordingDevice::new();
    scene.render(&mut world, &mut device);

    let clears: Vec<(ClearFlag, Vec3)> = device
        .commands()
        .iter()
        .filter_map(|c| match c {
            DeviceCommand::Clear { flag, color } => Some((*flag, *color)),
            _ => None,
        })
        .collect();
    assert_eq!(
        clears,
        vec![(ClearFlag::Depth, Vec3::zeros()), (ClearFlag::DepthAndColor, Vec3::new(0.2, 0.4, 0.6))]
    );
}

#[test]
fn test_offscreen_target_is_bound() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let id = spawn_camera(&mut world, &mut scene, Vec3::zeros(), 0);
    let texture = RenderTexture::new_2d(512, 512, TextureDataType::Float, "reflection");
    if let Some(camera) = world.component_mut::<Camera>(id) {
        camera.set_target_texture(Some(texture.clone()));
    }

    let mut device = RecordingDevice::new();
    scene.render(&mut world, &mut device);

    assert!(matches!(
        device.commands().first(),
        Some(DeviceCommand::SetRenderTarget { target: RenderTarget::Texture(t), .. }) if *t == texture
    ));
}

#[test]
fn test_camera_follows_its_transform() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    spawn_cube(&mut world, &mut scene, Vec3::zeros(), 1);

    let mut device = RecordingDevice::new();
    assert_eq!(scene.render(&mut world, &mut device).draw_calls, 1);

    // Turn the camera around; the cube is now behind it
    if let Some(transform) = world.component_mut::<TransformComponent>(camera) {
        transform.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 20.0), Vec3::y());
    }
    assert_eq!(scene.render(&mut world, &mut device).draw_calls, 0);
}

#[test]
fn test_child_renderer_moves_with_parent() {
    let mut world = World::new();
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);

    let parent = world.create_game_object("parent");
    let parent_transform = world
        .add_component(parent, TransformComponent::from_position(Vec3::new(500.0, 0.0, 0.0)))
        .expect("live object");
    let child = world.create_game_object("child");
    world.add_component(child, TransformComponent::identity().with_parent(parent_transform));
    let mut renderer = MeshRenderer::with_mesh(cube_mesh(9));
    renderer.set_material(Some(lit_material()), 0);
    world.add_component(child, renderer);
    scene.add(child);

    let mut device = RecordingDevice::new();
    assert_eq!(scene.render(&mut world, &mut device).renderers_culled, 1);

    if let Some(transform) = world.component_by_handle_mut(parent_transform) {
        transform.position = Vec3::zeros();
    }
    assert_eq!(scene.render(&mut world, &mut device).draw_calls, 1);
}

#[test]
fn test_singular_camera_transform_renders_nothing() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    spawn_cube(&mut world, &mut scene, Vec3::zeros(), 1);
    if let Some(transform) = world.component_mut::<TransformComponent>(camera) {
        transform.scale = Vec3::zeros();
    }

    let mut device = RecordingDevice::new();
    let mut frame = FrameStats::new();
    assert!(!scene.render_with_camera(&mut world, camera, &mut device, &mut frame));
    assert_eq!(frame, FrameStats::default());
    assert!(device.commands().is_empty());

    let stats = scene.render(&mut world, &mut device);
    assert_eq!(stats.cameras_rendered, 0);
    assert!(device.commands().is_empty());
}

#[test]
fn test_frustum_culling_switch() {
    let mut world = World::new();
    world.set_frustum_culling(false);
    let mut scene = Scene::new();
    spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    spawn_cube(&mut world, &mut scene, Vec3::new(500.0, 0.0, 0.0), 1);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.renderers_culled, 0);
}

#[test]
fn test_destroyed_objects_are_skipped() {
    let mut world = World::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut world, &mut scene, Vec3::new(0.0, 0.0, 10.0), 0);
    let cube = spawn_cube(&mut world, &mut scene, Vec3::zeros(), 1);
    world.destroy_game_object(cube);

    let mut device = RecordingDevice::new();
    let stats = scene.render(&mut world, &mut device);
    assert_eq!(stats.cameras_rendered, 1);
    assert_eq!(stats.draw_calls, 0);

    world.destroy_game_object(camera);
    assert_eq!(scene.render(&mut world, &mut device).cameras_rendered, 0);
}
