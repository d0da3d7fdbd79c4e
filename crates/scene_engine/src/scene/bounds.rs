//! Axis-aligned bounding boxes and rays for spatial queries

use crate::foundation::math::{utils, Mat4, Vec3};

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box enclosing every point, `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.min = bounds.min.inf(point);
            bounds.max = bounds.max.sup(point);
        }
        Some(bounds)
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(max.x, min.y, max.z),
        ]
    }

    /// Axis-aligned box enclosing this box after transformation
    ///
    /// All eight corners are transformed before min/max are re-derived; under
    /// rotation any corner can end up extremal.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let corners = self.corners().map(|corner| utils::transform_point(matrix, &corner));
        let mut bounds = Self::new(corners[0], corners[0]);
        for corner in &corners[1..] {
            bounds.min = bounds.min.inf(corner);
            bounds.max = bounds.max.sup(corner);
        }
        bounds
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv = |d: f32| if d == 0.0 { f32::INFINITY } else { 1.0 / d };
        let inv_dir = Vec3::new(inv(ray.direction.x), inv(ray.direction.y), inv(ray.direction.z));

        let t1 = (self.min - ray.origin).component_mul(&inv_dir);
        let t2 = (self.max - ray.origin).component_mul(&inv_dir);

        let t_near = t1.inf(&t2).max();
        let t_far = t1.sup(&t2).min();

        if t_far >= t_near && t_far >= 0.0 {
            // 0 when the origin is inside the box
            Some(t_near.max(0.0))
        } else {
            None
        }
    }
}

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let c = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(7.0, 7.0, 7.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_corners_are_distinct() {
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Aabb::from_points(&corners), Some(aabb));
    }

    #[test]
    fn test_transformed_under_rotation_uses_all_corners() {
        // A long thin box along X rotated 90 degrees about Z becomes long along Y.
        // Transforming only min/max would give a degenerate x-extent.
        let aabb = Aabb::new(Vec3::new(-2.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5));
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2);
        let world = aabb.transformed(&rotation.to_homogeneous());

        assert_relative_eq!(world.min, Vec3::new(-0.5, -2.0, -0.5), epsilon = 1e-5);
        assert_relative_eq!(world.max, Vec3::new(0.5, 2.0, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_transformed_with_translation_and_scale() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let matrix = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
        let world = aabb.transformed(&matrix);

        assert_relative_eq!(world.min, Vec3::new(8.0, -1.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(world.max, Vec3::new(12.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_union() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(-1.0, 0.5, 0.0), Vec3::new(0.5, 3.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.max, Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_ray_intersection() {
        let aabb = Aabb::from_center_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::new(1.0, 1.0, 1.0));

        let hit = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(aabb.intersect_ray(&hit).unwrap_or(-1.0), 9.0, epsilon = 1e-5);

        let miss = Ray::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        assert!(aabb.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&behind).is_none());
    }
}
