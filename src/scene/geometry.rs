use crate::config::PropagationDesc;
use crate::debug::{DebugCache, DebugFlags};
use crate::error::{PropagationError, Result};
use crate::math::{Ray, Vec3};
use crate::scene::{
    DiffractionEdge, DiffractionGraph, DiffractionGraphBuilder, MaterialTable, RayHit, RayTracer,
    ResolvedTriangle, SoundMaterial, SoundTriangle,
};

/// Validated, immutable scene data shared by all tracing threads.
///
/// Owns the vertex array, the triangles in both their public and resolved
/// forms, the material table and the diffraction graph. Everything refers to
/// everything else by index into these arrays.
#[derive(Debug, Clone)]
pub struct SceneGeometry {
    vertices: Vec<Vec3>,
    triangles: Vec<SoundTriangle>,
    resolved: Vec<ResolvedTriangle>,
    materials: MaterialTable,
    graph: DiffractionGraph,
}

impl SceneGeometry {
    /// Validates the triangle indices and resolves every triangle.
    pub fn new(
        vertices: Vec<Vec3>,
        triangles: Vec<SoundTriangle>,
        materials: MaterialTable,
    ) -> Result<Self> {
        for (index, triangle) in triangles.iter().enumerate() {
            if let Some(&vertex) = triangle
                .vertices
                .iter()
                .find(|&&v| v as usize >= vertices.len())
            {
                return Err(PropagationError::VertexOutOfRange {
                    triangle: index,
                    vertex,
                    vertex_count: vertices.len(),
                });
            }
            if triangle.material as usize >= materials.len() {
                return Err(PropagationError::MaterialOutOfRange {
                    triangle: index,
                    material: triangle.material,
                    material_count: materials.len(),
                });
            }
        }

        let resolved: Vec<ResolvedTriangle> = triangles
            .iter()
            .map(|triangle| ResolvedTriangle::from_triangle(triangle, &vertices))
            .collect();

        let degenerate = resolved.iter().filter(|t| t.area() <= 0.0).count();
        if degenerate > 0 {
            log::warn!(
                "Scene contains {} degenerate triangles with zero area",
                degenerate
            );
        }

        log::debug!(
            "Scene geometry: {} vertices, {} triangles, {} materials",
            vertices.len(),
            resolved.len(),
            materials.len()
        );

        Ok(Self {
            vertices,
            triangles,
            resolved,
            materials,
            graph: DiffractionGraph::default(),
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex(&self, index: u32) -> Vec3 {
        self.vertices[index as usize]
    }

    pub fn triangles(&self) -> &[SoundTriangle] {
        &self.triangles
    }

    pub fn resolved_triangles(&self) -> &[ResolvedTriangle] {
        &self.resolved
    }

    pub fn resolved_triangle(&self, index: u32) -> &ResolvedTriangle {
        &self.resolved[index as usize]
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Material of triangle `triangle`, or `None` if there is no such triangle.
    pub fn material_of(&self, triangle: u32) -> Option<&SoundMaterial> {
        let triangle = self.resolved.get(triangle as usize)?;
        self.materials.get(triangle.material())
    }

    pub fn diffraction_graph(&self) -> &DiffractionGraph {
        &self.graph
    }

    /// Packs `builder` into this scene's diffraction graph, replacing any
    /// previous one, and links the edges into the resolved triangles.
    ///
    /// If the builder is rejected, the previous graph and links stay in place.
    pub fn attach_diffraction_graph(&mut self, builder: DiffractionGraphBuilder) -> Result<()> {
        let mut resolved = self.resolved.clone();
        for triangle in &mut resolved {
            for slot in 0..3 {
                triangle.set_diffraction_edge(slot, None);
            }
        }
        self.graph = builder.build(&mut resolved)?;
        self.resolved = resolved;
        Ok(())
    }

    /// Neighbors of `edge` that a path arriving from `point` can diffract around.
    pub fn diffraction_candidates(
        &self,
        edge: u32,
        point: Vec3,
        offset: f32,
    ) -> impl Iterator<Item = (u32, &DiffractionEdge)> + '_ {
        self.graph
            .neighbors(edge)
            .filter(move |(_, neighbor)| neighbor.test_orientation(point, offset))
    }

    /// [`diffraction_candidates`](Self::diffraction_candidates) with the configured offset.
    pub fn diffraction_candidates_for<'a>(
        &'a self,
        edge: u32,
        point: Vec3,
        desc: &PropagationDesc,
    ) -> impl Iterator<Item = (u32, &'a DiffractionEdge)> + 'a {
        self.diffraction_candidates(edge, point, desc.diffraction_offset)
    }

    /// Adds the scene mesh and diffraction edges to `cache`, as selected by `flags`.
    pub fn record_debug_geometry(&self, cache: &DebugCache, flags: DebugFlags) {
        if flags.contains(DebugFlags::OBJECT_MESHES) {
            cache.add_object_mesh(&self.vertices, &self.triangles, self.materials.as_slice());
        }
        if flags.contains(DebugFlags::DIFFRACTION_EDGES) {
            for edge in self.graph.edges() {
                cache.add_diffraction_edge(edge.start(), edge.end());
            }
        }
    }
}

impl RayTracer for SceneGeometry {
    /// Tests every triangle; intended for small scenes and tests.
    fn cast_ray(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.resolved
            .iter()
            .enumerate()
            .filter_map(|(index, triangle)| {
                triangle
                    .intersect_ray(ray, &self.vertices)
                    .filter(|&distance| distance <= max_distance)
                    .map(|distance| (index, triangle, distance))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(index, triangle, distance)| {
                RayHit::new(distance, index as u32, triangle.material(), triangle.normal())
            })
    }
}
