//! Scene representation for geometric sound propagation.
//!
//! # Overview
//!
//! The scene is built once, single-threaded, then shared read-only with
//! every tracing thread:
//!
//! 1. **SoundTriangle** - Triangles as supplied by the mesh loader (vertex and material indices)
//! 2. **ResolvedTriangle** - Triangles with their plane, area and diffraction edge links
//! 3. **DiffractionGraph** - Diffracting edges and which edges each one can reach
//! 4. **SoundMaterial** / **MaterialTable** - Frequency-dependent reflectivity, scattering and transmission
//! 5. **SceneGeometry** - Owns all of the above, indexed by `u32`
//!
//! # Workflow
//!
//! 1. Fill a `MaterialTable` with presets or custom materials
//! 2. Create a `SceneGeometry` from vertices, triangles and the table
//! 3. Describe the diffracting edges with a `DiffractionGraphBuilder` and attach it
//! 4. Share the scene (`&` or `Arc`) with the tracers, which cast rays through
//!    the `RayTracer` trait and sample reflections from the hit material
//!
//! # Example
//!
//! ```
//! use petalsonic_propagation::math::{Ray, Vec3};
//! use petalsonic_propagation::scene::{
//!     MaterialPreset, MaterialTable, RayTracer, SceneGeometry, SoundTriangle,
//! };
//!
//! let mut materials = MaterialTable::default();
//! let floor = materials.add(MaterialPreset::WoodFloor.build());
//!
//! let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, -1.0)];
//! let triangles = vec![SoundTriangle::new(0, 1, 2, floor)];
//! let scene = SceneGeometry::new(vertices, triangles, materials)?;
//!
//! let ray = Ray::new(Vec3::new(0.2, 1.0, -0.2), -Vec3::Y);
//! let hit = scene.cast_ray(&ray, 10.0).expect("ray hits the floor");
//! assert_eq!(hit.material_index, floor);
//! # Ok::<(), petalsonic_propagation::PropagationError>(())
//! ```

pub(crate) mod diffraction_edge;
mod diffraction_graph;
mod geometry;
mod material;
mod presets;
mod ray_tracer;
mod resolved_triangle;
mod triangle;

pub use diffraction_edge::{DiffractionEdge, EdgeSide};
pub use diffraction_graph::{DiffractionGraph, DiffractionGraphBuilder};
pub use geometry::SceneGeometry;
pub use material::{MaterialBands, MaterialTable, SoundMaterial};
pub use presets::MaterialPreset;
pub use ray_tracer::{RayHit, RayTracer};
pub use resolved_triangle::ResolvedTriangle;
pub use triangle::SoundTriangle;
