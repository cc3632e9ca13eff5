//! Math types for PetalSonic propagation

pub use glam::{Quat, Vec3, Vec4};
use std::ops::Neg;

/// Tolerance used for near-parallel and near-degenerate geometric tests.
pub const EPSILON: f32 = f32::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * (-Vec3::Z)
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// A plane in normal/offset form: points `p` on the plane satisfy `normal·p + offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane3 {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    pub fn from_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            offset: -point.dot(normal),
        }
    }

    /// Plane through three points, with the normal following the winding `p1 -> p2 -> p3`.
    ///
    /// A degenerate triangle yields a zero normal.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize_or_zero();
        Self::from_point(normal, p1)
    }

    /// Signed perpendicular distance, positive on the side the normal points to.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    pub fn distance(&self, point: Vec3) -> f32 {
        self.signed_distance(point).abs()
    }
}

impl Neg for Plane3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Direction of travel (not required to be normalized; distances are in units of its length)
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane3::from_points(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(plane.normal, Vec3::Z);
        assert_eq!(plane.offset, 0.0);
        assert_eq!(plane.signed_distance(Vec3::new(3.0, -2.0, 2.5)), 2.5);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, -1.0)), -1.0);
    }

    #[test]
    fn test_plane_negation() {
        let plane = Plane3::from_point(Vec3::Y, Vec3::new(0.0, 2.0, 0.0));
        let point = Vec3::new(1.0, 5.0, 1.0);
        assert_eq!(plane.signed_distance(point), 3.0);
        assert_eq!((-plane).signed_distance(point), -3.0);
        assert_eq!((-plane).distance(point), 3.0);
    }

    #[test]
    fn test_degenerate_plane_has_zero_normal() {
        let plane = Plane3::from_points(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert_eq!(plane.normal, Vec3::ZERO);
    }

    #[test]
    fn test_pose_directions() {
        let pose = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.forward(), -Vec3::Z);
        assert_eq!(pose.up(), Vec3::Y);
        assert_eq!(pose.distance(&Pose::identity()), Vec3::new(1.0, 2.0, 3.0).length());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ONE, Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(3.0, 1.0, 1.0));
    }
}
