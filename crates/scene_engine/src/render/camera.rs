//! # Camera Component
//!
//! A camera owns its projection, the view matrix fed to it by the scene, a
//! viewport into its target surface and the clear behaviour for that surface.
//!
//! ## Matrix Caching
//! The view-projection matrix and the culling frustum derived from it are
//! cached. Changing the projection rebuilds them immediately; a new view
//! rebuilds them only when it differs from the stored one, so a static camera
//! costs nothing per frame.
//!
//! ## Coordinate System
//! Right-handed, Y-up, looking down -Z in view space. Projections target an
//! OpenGL-style clip volume with depth in `[-1, 1]`.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3, Vec4};
use crate::render::target::{RenderTarget, RenderTexture};
use crate::scene::{Frustum, LayerMask, Ray};

/// Projection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionType {
    /// Parallel projection described by a left/right/bottom/top box
    #[default]
    Orthographic,
    /// Perspective projection described by a vertical field of view
    Perspective,
}

/// What to clear on the target surface before a camera draws into it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearFlag {
    /// Clear depth and fill with the clear colour
    #[default]
    DepthAndColor,
    /// Clear depth only
    Depth,
    /// Leave the surface untouched
    DontClear,
}

/// Rectangle of the target surface a camera draws into, in pixels
///
/// Values are stored as given; nothing checks them against the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Orthographic projection box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoParams {
    /// Left clipping plane
    pub left: f32,
    /// Right clipping plane
    pub right: f32,
    /// Bottom clipping plane
    pub bottom: f32,
    /// Top clipping plane
    pub top: f32,
}

impl Default for OrthoParams {
    fn default() -> Self {
        // y-down screen space, 100 units each way
        Self {
            left: 0.0,
            right: 100.0,
            bottom: 100.0,
            top: 0.0,
        }
    }
}

/// Camera component
///
/// A game object needs a [`TransformComponent`](crate::ecs::components::TransformComponent)
/// next to its camera for the camera to render anything.
#[derive(Debug, Clone)]
pub struct Camera {
    projection_type: ProjectionType,
    ortho: OrthoParams,
    near: f32,
    far: f32,
    fov_degrees: f32,
    aspect: f32,

    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    frustum: Frustum,

    viewport: Viewport,
    clear_flag: ClearFlag,
    clear_color: Vec3,
    layer_mask: LayerMask,
    render_order: u32,
    target: RenderTarget,
    depth_normals: RenderTexture,
    enabled: bool,
    render_particles: bool,
}

impl Camera {
    /// Create a camera whose viewport covers a back buffer of the given size
    ///
    /// Starts orthographic over the default [`OrthoParams`] with depth `0..1`.
    pub fn new(back_buffer_width: u32, back_buffer_height: u32) -> Self {
        let ortho = OrthoParams::default();
        let (near, far) = (0.0, 1.0);
        let projection = Mat4::orthographic(ortho.left, ortho.right, ortho.bottom, ortho.top, near, far);
        let view = Mat4::identity();

        Self {
            projection_type: ProjectionType::Orthographic,
            ortho,
            near,
            far,
            fov_degrees: 45.0,
            aspect: 1.0,
            view,
            projection,
            view_projection: projection * view,
            frustum: Frustum::from_matrix(&(projection * view)),
            viewport: Viewport::new(
                0,
                0,
                i32::try_from(back_buffer_width).unwrap_or(i32::MAX),
                i32::try_from(back_buffer_height).unwrap_or(i32::MAX),
            ),
            clear_flag: ClearFlag::DepthAndColor,
            clear_color: Vec3::zeros(),
            layer_mask: LayerMask::DEFAULT,
            render_order: 0,
            target: RenderTarget::BackBuffer,
            depth_normals: RenderTexture::default(),
            enabled: true,
            render_particles: true,
        }
    }

    /// Set an orthographic projection and switch to [`ProjectionType::Orthographic`]
    pub fn set_orthographic(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.ortho = OrthoParams { left, right, bottom, top };
        self.near = near;
        self.far = far;
        self.projection_type = ProjectionType::Orthographic;
        self.set_projection_internal(Mat4::orthographic(left, right, bottom, top, near, far));
    }

    /// Set a perspective projection and switch to [`ProjectionType::Perspective`]
    pub fn set_perspective(&mut self, fov_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.fov_degrees = fov_degrees;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.projection_type = ProjectionType::Perspective;
        self.set_projection_internal(Mat4::perspective(utils::deg_to_rad(fov_degrees), aspect, near, far));
    }

    /// Use a caller-built projection matrix
    ///
    /// The stored projection type and parameters are not touched, so
    /// [`projection_type`](Self::projection_type) may no longer describe the matrix.
    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.set_projection_internal(projection);
    }

    /// Switch projection type, rebuilding the matrix from that type's stored parameters
    ///
    /// A matrix installed with [`set_projection_matrix`](Self::set_projection_matrix)
    /// is discarded, even when `projection_type` equals the current type.
    pub fn set_projection_type(&mut self, projection_type: ProjectionType) {
        match projection_type {
            ProjectionType::Orthographic => {
                let OrthoParams { left, right, bottom, top } = self.ortho;
                self.set_orthographic(left, right, bottom, top, self.near, self.far);
            }
            ProjectionType::Perspective => {
                self.set_perspective(self.fov_degrees, self.aspect, self.near, self.far);
            }
        }
    }

    fn set_projection_internal(&mut self, projection: Mat4) {
        self.projection = projection;
        self.rebuild_view_projection();
    }

    /// Store the world-to-view matrix
    ///
    /// The view-projection matrix and frustum are rebuilt only if the view
    /// changed. Returns whether it did.
    pub fn update_view(&mut self, view: Mat4) -> bool {
        if view == self.view {
            return false;
        }
        self.view = view;
        self.rebuild_view_projection();
        true
    }

    fn rebuild_view_projection(&mut self) {
        self.view_projection = self.projection * self.view;
        self.frustum = Frustum::from_matrix(&self.view_projection);
    }

    /// Project a world point to pixel coordinates of a `view_width` x `view_height` view
    ///
    /// x and y go through the perspective divide and are mapped with y pointing
    /// down; z is the clip-space z before the divide. A point on the eye plane
    /// of a perspective camera (w = 0) yields non-finite coordinates.
    pub fn screen_point(&self, world_point: &Vec3, view_width: f32, view_height: f32) -> Vec3 {
        let clip = self.view_projection * world_point.push(1.0);
        let x = clip.x / clip.w;
        let y = clip.y / clip.w;

        let half_width = view_width * 0.5;
        let half_height = view_height * 0.5;
        Vec3::new(x * half_width + half_width, -y * half_height + half_height, clip.z)
    }

    /// World-space ray through pixel `(x, y)` of a `view_width` x `view_height` view
    ///
    /// The ray starts on the near plane. `None` when the view-projection matrix
    /// cannot be inverted.
    pub fn screen_point_to_ray(&self, x: f32, y: f32, view_width: f32, view_height: f32) -> Option<Ray> {
        let inverse = self.view_projection.try_inverse()?;
        let ndc_x = 2.0 * x / view_width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / view_height;

        let unproject = |ndc_z: f32| {
            let world = inverse * Vec4::new(ndc_x, ndc_y, ndc_z, 1.0);
            world.xyz() / world.w
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        let direction = far - near;
        if !direction.iter().all(|v| v.is_finite()) || direction.norm_squared() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(near, direction))
    }

    /// Set the viewport, in pixels of the target surface
    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.viewport = Viewport::new(x, y, width, height);
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Projection type
    pub fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }

    /// Orthographic box
    pub fn ortho_params(&self) -> OrthoParams {
        self.ortho
    }

    /// Near plane distance
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far plane distance
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Aspect ratio
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// World-to-view matrix
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// View-to-clip matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// World-to-clip matrix
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Culling frustum for the current view-projection
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Clear flag
    pub fn clear_flag(&self) -> ClearFlag {
        self.clear_flag
    }

    /// Set the clear flag
    pub fn set_clear_flag(&mut self, clear_flag: ClearFlag) {
        self.clear_flag = clear_flag;
    }

    /// Clear colour, RGB in `0..1`
    pub fn clear_color(&self) -> Vec3 {
        self.clear_color
    }

    /// Set the clear colour
    pub fn set_clear_color(&mut self, color: Vec3) {
        self.clear_color = color;
    }

    /// Layers this camera renders
    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    /// Set the layers this camera renders
    pub fn set_layer_mask(&mut self, layer_mask: LayerMask) {
        self.layer_mask = layer_mask;
    }

    /// Render order; higher values render after lower ones
    pub fn render_order(&self) -> u32 {
        self.render_order
    }

    /// Set the render order
    pub fn set_render_order(&mut self, order: u32) {
        self.render_order = order;
    }

    /// Surface the camera draws into
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Draw into `target` instead of the back buffer, or back into it with `None`
    pub fn set_target_texture(&mut self, target: Option<RenderTexture>) {
        self.target = target.map_or(RenderTarget::BackBuffer, RenderTarget::Texture);
    }

    /// Depth and normals texture description
    pub fn depth_normals_texture(&self) -> &RenderTexture {
        &self.depth_normals
    }

    /// Replace the depth and normals texture description
    pub fn set_depth_normals_texture(&mut self, texture: RenderTexture) {
        self.depth_normals = texture;
    }

    /// Disabled cameras are skipped by [`Scene::render`](crate::scene::Scene::render)
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the camera
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether this camera renders particles
    pub fn renders_particles(&self) -> bool {
        self.render_particles
    }

    /// Set whether this camera renders particles
    pub fn set_render_particles(&mut self, enabled: bool) {
        self.render_particles = enabled;
    }
}
