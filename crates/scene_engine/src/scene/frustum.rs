//! View frustum extraction and bounding-box visibility tests

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::Aabb;

/// Result of classifying a box against a frustum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Entirely on the negative side of at least one plane
    Outside,
    /// Straddles one or more planes (or is a corner case the test cannot reject)
    Intersecting,
    /// On the positive side of every plane
    Inside,
}

/// Frustum for visibility culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Six planes defining the frustum (left, right, bottom, top, near, far)
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self::from_matrix(&Mat4::identity())
    }
}

impl Frustum {
    /// Create a frustum from six planes
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Frustum that accepts every box and point, used when culling is switched off
    pub fn unbounded() -> Self {
        Self {
            planes: [Plane { normal: Vec3::zeros(), distance: 0.0 }; 6],
        }
    }

    /// Extract frustum planes from a view-projection matrix
    ///
    /// Gribb-Hartmann extraction for a clip volume of `-w <= x, y, z <= w`.
    /// Plane normals point into the frustum.
    pub fn from_matrix(view_projection: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { view_projection.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0), // left
                Plane::from_coefficients(r3 - r0), // right
                Plane::from_coefficients(r3 + r1), // bottom
                Plane::from_coefficients(r3 - r1), // top
                Plane::from_coefficients(r3 + r2), // near
                Plane::from_coefficients(r3 - r2), // far
            ],
        }
    }

    /// Check if the box `[min, max]` is inside or intersects the frustum
    ///
    /// Returns false only when the box lies entirely behind one plane. Boxes
    /// near a frustum corner can be accepted while actually outside; boxes that
    /// are inside are never rejected.
    pub fn box_in_frustum(&self, min: &Vec3, max: &Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(plane.positive_vertex(min, max)) >= 0.0)
    }

    /// Check if an AABB is inside or intersects the frustum
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.box_in_frustum(&aabb.min, &aabb.max)
    }

    /// Check if the box `[min, max]` lies entirely inside the frustum
    pub fn contains_box(&self, min: &Vec3, max: &Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(plane.negative_vertex(min, max)) >= 0.0)
    }

    /// Classify a box as outside, intersecting or fully inside
    pub fn classify_box(&self, min: &Vec3, max: &Vec3) -> Containment {
        let mut containment = Containment::Inside;
        for plane in &self.planes {
            if plane.distance_to_point(plane.positive_vertex(min, max)) < 0.0 {
                return Containment::Outside;
            }
            if plane.distance_to_point(plane.negative_vertex(min, max)) < 0.0 {
                containment = Containment::Intersecting;
            }
        }
        containment
    }

    /// Check if a point is inside the frustum
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(*point) >= 0.0)
    }
}

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized unless the plane is degenerate)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal: normal.normalize(), distance }
    }

    /// Plane from `(a, b, c, d)` with `a*x + b*y + c*z + d = 0`
    ///
    /// Degenerate coefficients (zero-length normal) are kept unnormalized.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length = normal.norm();
        if length > f32::EPSILON {
            Self { normal: normal / length, distance: coefficients.w / length }
        } else {
            Self { normal, distance: coefficients.w }
        }
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    /// Corner of `[min, max]` furthest along the normal
    fn positive_vertex(&self, min: &Vec3, max: &Vec3) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { max.x } else { min.x },
            if self.normal.y >= 0.0 { max.y } else { min.y },
            if self.normal.z >= 0.0 { max.z } else { min.z },
        )
    }

    /// Corner of `[min, max]` furthest against the normal
    fn negative_vertex(&self, min: &Vec3, max: &Vec3) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { min.x } else { max.x },
            if self.normal.y >= 0.0 { min.y } else { max.y },
            if self.normal.z >= 0.0 { min.z } else { max.z },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{utils, Mat4Ext};
    use approx::assert_relative_eq;

    /// Camera at the origin looking down -Z, 20x20 ortho window, depth 0.1..100
    fn ortho_frustum() -> Frustum {
        Frustum::from_matrix(&Mat4::orthographic(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0))
    }

    fn perspective_frustum() -> Frustum {
        Frustum::from_matrix(&Mat4::perspective(utils::deg_to_rad(90.0), 1.0, 1.0, 50.0))
    }

    #[test]
    fn test_planes_are_normalized() {
        for plane in perspective_frustum().planes {
            assert_relative_eq!(plane.normal.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_box_inside() {
        let frustum = ortho_frustum();
        let min = Vec3::new(-1.0, -1.0, -6.0);
        let max = Vec3::new(1.0, 1.0, -4.0);

        assert!(frustum.box_in_frustum(&min, &max));
        assert!(frustum.contains_box(&min, &max));
        assert_eq!(frustum.classify_box(&min, &max), Containment::Inside);
    }

    #[test]
    fn test_boxes_outside_each_plane() {
        let frustum = ortho_frustum();
        let outside = [
            (Vec3::new(-22.0, -1.0, -6.0), Vec3::new(-20.0, 1.0, -4.0)), // left
            (Vec3::new(20.0, -1.0, -6.0), Vec3::new(22.0, 1.0, -4.0)),   // right
            (Vec3::new(-1.0, -22.0, -6.0), Vec3::new(1.0, -20.0, -4.0)), // bottom
            (Vec3::new(-1.0, 20.0, -6.0), Vec3::new(1.0, 22.0, -4.0)),   // top
            (Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0)),      // behind the camera
            (Vec3::new(-1.0, -1.0, -150.0), Vec3::new(1.0, 1.0, -120.0)), // beyond far
        ];

        for (min, max) in outside {
            assert!(!frustum.box_in_frustum(&min, &max), "box {min:?}..{max:?} should be culled");
            assert_eq!(frustum.classify_box(&min, &max), Containment::Outside);
        }
    }

    #[test]
    fn test_box_straddling_one_plane_is_accepted() {
        let frustum = ortho_frustum();
        let min = Vec3::new(9.0, -1.0, -6.0);
        let max = Vec3::new(11.0, 1.0, -4.0);

        assert!(frustum.box_in_frustum(&min, &max));
        assert!(!frustum.contains_box(&min, &max));
        assert_eq!(frustum.classify_box(&min, &max), Containment::Intersecting);
    }

    #[test]
    fn test_box_enclosing_frustum_is_accepted() {
        let frustum = perspective_frustum();
        let min = Vec3::new(-1000.0, -1000.0, -1000.0);
        let max = Vec3::new(1000.0, 1000.0, 1000.0);
        assert!(frustum.box_in_frustum(&min, &max));
        assert_eq!(frustum.classify_box(&min, &max), Containment::Intersecting);
    }

    #[test]
    fn test_perspective_culls_outside_cone() {
        let frustum = perspective_frustum();

        // On the axis, inside
        assert!(frustum.box_in_frustum(&Vec3::new(-1.0, -1.0, -11.0), &Vec3::new(1.0, 1.0, -9.0)));
        // Well off to the side at a depth where the half-width is 10
        assert!(!frustum.box_in_frustum(&Vec3::new(14.0, -1.0, -11.0), &Vec3::new(16.0, 1.0, -9.0)));
        // Between the eye and the near plane
        assert!(!frustum.box_in_frustum(&Vec3::new(-0.1, -0.1, -0.5), &Vec3::new(0.1, 0.1, -0.2)));
    }

    #[test]
    fn test_unbounded_accepts_everything() {
        let frustum = Frustum::unbounded();
        let min = Vec3::new(1.0e6, 1.0e6, 1.0e6);
        let max = min + Vec3::new(1.0, 1.0, 1.0);
        assert!(frustum.box_in_frustum(&min, &max));
        assert!(frustum.contains_point(&Vec3::new(-1.0e6, 0.0, 0.0)));
    }

    #[test]
    fn test_view_translation_moves_frustum() {
        let view = Mat4::new_translation(&Vec3::new(0.0, 0.0, -100.0));
        let frustum = Frustum::from_matrix(&(Mat4::orthographic(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0) * view));

        // World z is pushed 100 units away from the eye
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, -10.0)));
        assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 50.0)));
    }
}
