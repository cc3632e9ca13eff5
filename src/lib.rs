//! # PetalSonic Propagation
//!
//! The geometric substrate of an acoustic path tracer: the scene triangles and
//! materials rays are traced against, the diffraction-edge graph used to find
//! paths bending around corners, reflection sampling, and a thread-safe cache
//! collecting debug paths for visualization.
//!
//! Scene data is built once on one thread, validated into a
//! [`SceneGeometry`], and then shared read-only by any number of tracing
//! threads. The only shared mutable structure is the [`DebugCache`].
//!
//! ## Quick Start
//!
//! ```
//! use petalsonic_propagation::{
//!     MaterialPreset, PropagationDesc, PropagationError, RayTracer, SceneGeometry, SoundTriangle,
//! };
//! use petalsonic_propagation::math::{Ray, Vec3};
//! use rand::SeedableRng;
//!
//! let desc = PropagationDesc::default();
//! let mut materials = desc.material_table();
//! let concrete = materials.add(MaterialPreset::Concrete.build());
//!
//! let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, -1.0)];
//! let scene = SceneGeometry::new(vertices, vec![SoundTriangle::new(0, 1, 2, concrete)], materials)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let ray = Ray::new(Vec3::new(0.2, 1.0, -0.2), Vec3::new(0.0, -1.0, 0.0));
//! if let Some(hit) = scene.cast_ray(&ray, 100.0) {
//!     let material = scene.material_of(hit.triangle_index).expect("validated scene");
//!     let reflected = material.sample_reflection(ray.direction, hit.normal, &mut rng);
//!     assert!(reflected.is_finite());
//! }
//! # Ok::<(), PropagationError>(())
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod frequency;
pub mod math;
pub mod sampling;
pub mod scene;

pub use config::PropagationDesc;
pub use debug::{DebugCache, DebugFlags};
pub use error::{PropagationError, Result};
pub use frequency::{FREQUENCY_COUNT, FrequencyBandResponse, FrequencyBands, FrequencyResponse};
pub use scene::{
    DiffractionEdge, DiffractionGraph, DiffractionGraphBuilder, EdgeSide, MaterialPreset,
    MaterialTable, RayHit, RayTracer, ResolvedTriangle, SceneGeometry, SoundMaterial,
    SoundTriangle,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Ray, Vec3};
    use crate::sampling::uniform_hemisphere_direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    /// A floor and a wall meeting along the z axis.
    fn corner_scene() -> anyhow::Result<SceneGeometry> {
        let desc = PropagationDesc::default();
        let mut materials = desc.material_table();
        let floor = materials.add(MaterialPreset::WoodFloor.build());
        let wall = materials.add(MaterialPreset::PaintedBrick.build());

        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ];
        let triangles = vec![
            SoundTriangle::new(0, 1, 2, floor),
            SoundTriangle::new(0, 1, 3, wall),
        ];
        let mut scene = SceneGeometry::new(vertices, triangles, materials)?;

        let mut builder = DiffractionGraphBuilder::new();
        builder.add_edge(
            scene.resolved_triangles(),
            scene.vertices(),
            EdgeSide::new(0, 0),
            EdgeSide::new(1, 0),
        )?;
        scene.attach_diffraction_graph(builder)?;
        Ok(scene)
    }

    #[test]
    fn test_concurrent_tracing_into_debug_cache() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        const THREADS: u64 = 4;
        const RAYS_PER_THREAD: usize = 500;

        let scene = Arc::new(corner_scene()?);
        let cache = DebugCache::new();
        let flags = DebugFlags::OBJECT_MESHES | DebugFlags::DIFFRACTION_EDGES;
        scene.record_debug_geometry(&cache, flags);

        let listener = Vec3::new(1.0, 1.0, -1.0);
        std::thread::scope(|scope| {
            for seed in 0..THREADS {
                let scene = Arc::clone(&scene);
                let cache = &cache;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    for _ in 0..RAYS_PER_THREAD {
                        let direction = uniform_hemisphere_direction(&mut rng, -Vec3::Y);
                        let ray = Ray::new(listener, direction);
                        let Some(hit) = scene.cast_ray(&ray, 100.0) else {
                            continue;
                        };
                        let Some(material) = scene.material_of(hit.triangle_index) else {
                            continue;
                        };

                        let point = hit.point(&ray);
                        let specular = SoundMaterial::specular_reflection(direction, hit.normal);
                        let reflected = material.sample_reflection(direction, hit.normal, &mut rng);
                        let path = vec![listener, point, point + reflected];
                        if reflected == specular {
                            cache.add_specular_path(path);
                        } else {
                            cache.add_diffuse_path(path);
                        }
                    }
                });
            }
        });

        let lists = cache.lock();
        assert_eq!(lists.object_mesh_count(), 1);
        assert_eq!(lists.diffraction_edge_count(), 1);
        assert_eq!(lists.diffraction_edges()[0].v1, Vec3::ZERO);

        let traced = lists.specular_path_count() + lists.diffuse_path_count();
        assert!(traced > 0);
        assert!(traced <= THREADS as usize * RAYS_PER_THREAD);
        assert!(lists.specular_path_count() > lists.diffuse_path_count());
        Ok(())
    }

    #[test]
    fn test_corner_edge_links_both_triangles() -> anyhow::Result<()> {
        let scene = corner_scene()?;
        let graph = scene.diffraction_graph();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(scene.resolved_triangle(0).diffraction_edge(0), Some(0));
        assert_eq!(scene.resolved_triangle(1).diffraction_edge(0), Some(0));
        assert_eq!(graph.edge(0).length(), 4.0);
        Ok(())
    }
}
