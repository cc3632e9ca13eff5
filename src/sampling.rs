//! Random direction sampling for Monte-Carlo path generation.
//!
//! Every tracing thread owns its own sampler and passes it by `&mut` into the
//! sampling routines, so there is no shared RNG state between workers.

use crate::math::Vec3;
use std::f32::consts::PI;

/// A source of uniformly distributed values in `[0, 1)`.
///
/// Implemented for every [`rand::Rng`], so seeded generators such as
/// `rand::rngs::StdRng` can be handed to the samplers directly.
pub trait UniformSampler {
    fn sample_unit(&mut self) -> f32;
}

impl<R: rand::Rng> UniformSampler for R {
    fn sample_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Uniformly distributed unit vector on the sphere.
pub fn uniform_sphere_direction<S: UniformSampler + ?Sized>(sampler: &mut S) -> Vec3 {
    let z = 2.0 * sampler.sample_unit() - 1.0;
    let theta = 2.0 * PI * sampler.sample_unit();
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Uniformly distributed unit vector in the hemisphere around `normal`.
pub fn uniform_hemisphere_direction<S: UniformSampler + ?Sized>(
    sampler: &mut S,
    normal: Vec3,
) -> Vec3 {
    let direction = uniform_sphere_direction(sampler);
    if direction.dot(normal) < 0.0 {
        -direction
    } else {
        direction
    }
}

/// Cosine-weighted (Lambertian) unit vector in the hemisphere around `normal`.
///
/// `normal` must be normalized. The sample is drawn in tangent space as
/// `(sqrt(u1)·cosθ, sqrt(u1)·sinθ, sqrt(1 - u1))` and rotated onto the normal.
pub fn lambertian_hemisphere_direction<S: UniformSampler + ?Sized>(
    sampler: &mut S,
    normal: Vec3,
) -> Vec3 {
    let u1 = sampler.sample_unit();
    let u2 = sampler.sample_unit();
    let r = u1.sqrt();
    let theta = 2.0 * PI * u2;
    let local = Vec3::new(r * theta.cos(), r * theta.sin(), (1.0 - u1).max(0.0).sqrt());

    let (tangent, bitangent) = normal.any_orthonormal_pair();
    tangent * local.x + bitangent * local.y + normal * local.z
}
