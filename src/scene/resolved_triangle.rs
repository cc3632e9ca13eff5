//! Triangles prepared for tracing.

use crate::math::{EPSILON, Plane3, Ray, Vec3};
use crate::scene::SoundTriangle;

/// Local vertex indices of the three edge slots.
const EDGE_VERTICES: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Local index of the vertex opposite each edge slot.
const EDGE_FREE_VERTEX: [usize; 3] = [2, 1, 0];

/// A triangle with everything the tracer needs precomputed: its plane, its
/// area, back-references to the diffraction edges lying on its sides, and the
/// subdivision metadata used when the surface is split into patches.
///
/// Edge slots are fixed by local vertex pair: slot 0 is `(0, 1)`, slot 1 is
/// `(0, 2)` and slot 2 is `(1, 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTriangle {
    vertices: [u32; 3],
    material: u32,
    plane: Plane3,
    area: f32,
    edges: [Option<u32>; 3],
    key_vertex: u8,
    row_count: u8,
    column_count: u8,
}

impl ResolvedTriangle {
    /// Resolves a triangle against the scene vertex array.
    ///
    /// The caller guarantees that the indices are in range.
    pub fn new(vertices: [u32; 3], positions: &[Vec3], material: u32) -> Self {
        let p0 = positions[vertices[0] as usize];
        let p1 = positions[vertices[1] as usize];
        let p2 = positions[vertices[2] as usize];

        Self {
            vertices,
            material,
            plane: Plane3::from_points(p0, p1, p2),
            area: 0.5 * (p2 - p0).cross(p2 - p1).length(),
            edges: [None; 3],
            key_vertex: 0,
            row_count: 1,
            column_count: 1,
        }
    }

    /// Resolves a scene triangle against the vertex positions.
    pub fn from_triangle(triangle: &SoundTriangle, positions: &[Vec3]) -> Self {
        Self::new(triangle.vertices, positions, triangle.material)
    }

    /// Scene vertex index of local vertex `index`.
    pub fn vertex(&self, index: usize) -> u32 {
        debug_assert!(index < 3, "triangle vertex index {index} out of range");
        self.vertices[index]
    }

    /// Replaces local vertex `index` without recomputing the plane.
    pub fn set_vertex(&mut self, index: usize, vertex: u32) {
        debug_assert!(index < 3, "triangle vertex index {index} out of range");
        self.vertices[index] = vertex;
    }

    /// All three scene vertex indices.
    pub fn vertices(&self) -> [u32; 3] {
        self.vertices
    }

    /// Positions of the three vertices.
    pub fn positions(&self, positions: &[Vec3]) -> [Vec3; 3] {
        self.vertices.map(|v| positions[v as usize])
    }

    /// Index into the material table.
    pub fn material(&self) -> u32 {
        self.material
    }

    /// Sets the material table index.
    pub fn set_material(&mut self, material: u32) {
        self.material = material;
    }

    /// Supporting plane, oriented by the winding order.
    pub fn plane(&self) -> &Plane3 {
        &self.plane
    }

    /// Unit normal of [`plane`](Self::plane).
    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Diffraction edge lying on edge slot `slot`, if any.
    pub fn diffraction_edge(&self, slot: usize) -> Option<u32> {
        debug_assert!(slot < 3, "edge slot {slot} out of range");
        self.edges[slot]
    }

    /// Links edge slot `slot` to a diffraction edge, or clears it.
    pub fn set_diffraction_edge(&mut self, slot: usize, edge: Option<u32>) {
        debug_assert!(slot < 3, "edge slot {slot} out of range");
        self.edges[slot] = edge;
    }

    /// Vertex the subdivision grid starts from.
    pub fn key_vertex(&self) -> u8 {
        self.key_vertex
    }

    /// Sets the vertex the subdivision grid starts from, clamped to `0..=2`.
    pub fn set_key_vertex(&mut self, key_vertex: u8) {
        self.key_vertex = key_vertex.min(2);
    }

    /// Subdivision rows.
    pub fn row_count(&self) -> u8 {
        self.row_count
    }

    /// Sets the number of subdivision rows, saturating at `u8::MAX`.
    pub fn set_row_count(&mut self, rows: usize) {
        self.row_count = u8::try_from(rows).unwrap_or(u8::MAX);
    }

    /// Subdivision columns.
    pub fn column_count(&self) -> u8 {
        self.column_count
    }

    /// Sets the number of subdivision columns, saturating at `u8::MAX`.
    pub fn set_column_count(&mut self, columns: usize) {
        self.column_count = u8::try_from(columns).unwrap_or(u8::MAX);
    }

    /// Scene vertex indices of the endpoints of edge slot `slot`.
    pub fn edge_vertices(&self, slot: usize) -> (u32, u32) {
        let (a, b) = Self::edge_vertex_indices(slot);
        (self.vertices[a], self.vertices[b])
    }

    /// Scene vertex index of the vertex not on edge slot `slot`.
    pub fn edge_free_vertex(&self, slot: usize) -> u32 {
        self.vertices[Self::edge_free_vertex_index(slot)]
    }

    /// Edge slot joining local vertices `v1 < v2`.
    pub fn edge_index(v1: usize, v2: usize) -> usize {
        debug_assert!(v1 < v2 && v2 < 3, "invalid local edge ({v1}, {v2})");
        v1 + v2 - 1
    }

    /// Local vertex indices of edge slot `slot`.
    pub fn edge_vertex_indices(slot: usize) -> (usize, usize) {
        debug_assert!(slot < 3, "edge slot {slot} out of range");
        EDGE_VERTICES[slot]
    }

    /// Local index of the vertex opposite edge slot `slot`.
    pub fn edge_free_vertex_index(slot: usize) -> usize {
        debug_assert!(slot < 3, "edge slot {slot} out of range");
        EDGE_FREE_VERTEX[slot]
    }

    /// Möller–Trumbore ray test. Returns the distance along the ray, in units
    /// of the direction's length, when the hit lies strictly in front of the origin.
    pub fn intersect_ray(&self, ray: &Ray, positions: &[Vec3]) -> Option<f32> {
        let [v0, v1, v2] = self.positions(positions);
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let pvec = ray.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < EPSILON {
            return None;
        }
        let inverse_det = 1.0 / det;

        let tvec = ray.origin - v0;
        let u = tvec.dot(pvec) * inverse_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction.dot(qvec) * inverse_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let distance = edge2.dot(qvec) * inverse_det;
        (distance > 0.0).then_some(distance)
    }
}
