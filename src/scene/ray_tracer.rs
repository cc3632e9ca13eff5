//! Ray casting interface used by path tracers.

use crate::math::{Ray, Vec3};

/// Closest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray, in units of the ray direction's length
    pub distance: f32,

    /// Index of the resolved triangle that was hit
    pub triangle_index: u32,

    /// Index into the `MaterialTable` of the hit surface
    pub material_index: u32,

    /// Normal of the hit triangle's plane (normalized)
    ///
    /// Follows the triangle winding, so it may face away from the ray origin
    pub normal: Vec3,
}

impl RayHit {
    pub fn new(distance: f32, triangle_index: u32, material_index: u32, normal: Vec3) -> Self {
        Self {
            distance,
            triangle_index,
            material_index,
            normal,
        }
    }

    /// World-space position of the hit on `ray`.
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.distance)
    }
}

/// Trait for answering closest-hit ray queries against scene geometry.
///
/// Implement this to plug an acceleration structure (BVH, Embree, a game
/// engine's physics scene) into the propagation code. [`SceneGeometry`](super::SceneGeometry)
/// provides a brute-force implementation for small scenes and tests.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: every tracing thread casts rays
/// through a shared reference.
///
/// # Example
///
/// ```
/// use petalsonic_propagation::math::{Ray, Vec3};
/// use petalsonic_propagation::scene::{RayHit, RayTracer};
///
/// /// An infinite floor at y = 0.
/// struct FloorTracer {
///     material_index: u32,
/// }
///
/// impl RayTracer for FloorTracer {
///     fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
///         if ray.direction.y >= 0.0 {
///             return None;
///         }
///         let distance = -ray.origin.y / ray.direction.y;
///         (distance > 0.0 && distance <= max_distance)
///             .then(|| RayHit::new(distance, 0, self.material_index, Vec3::Y))
///     }
/// }
///
/// let tracer = FloorTracer { material_index: 3 };
/// let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
/// assert_eq!(tracer.cast_ray(&ray, 10.0).map(|hit| hit.distance), Some(2.0));
/// ```
pub trait RayTracer: Send + Sync {
    /// Returns the closest hit within `max_distance`, or `None` for a miss.
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;

    /// Whether anything lies between the ray origin and `max_distance`.
    fn is_occluded(&self, ray: &Ray, max_distance: f32) -> bool {
        self.cast_ray(ray, max_distance).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hit_point() {
        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, -0.5, 0.0));
        let hit = RayHit::new(2.0, 7, 2, Vec3::Y);
        assert_eq!(hit.point(&ray), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(hit.triangle_index, 7);
        assert_eq!(hit.material_index, 2);
    }

    // Simple test ray tracer that never hits anything
    struct NoopTracer;

    impl RayTracer for NoopTracer {
        fn cast_ray(&self, _ray: &Ray, _max_distance: f32) -> Option<RayHit> {
            None
        }
    }

    #[test]
    fn test_noop_tracer() {
        let tracer = NoopTracer;
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(tracer.cast_ray(&ray, 100.0).is_none());
        assert!(!tracer.is_occluded(&ray, 100.0));
    }
}
