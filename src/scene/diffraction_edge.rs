use crate::math::{EPSILON, Plane3, Vec3};
use crate::scene::ResolvedTriangle;
use std::ops::Range;

/// One side of a diffraction edge: a triangle and the edge slot on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSide {
    pub triangle: u32,
    pub edge_index: usize,
}

impl EdgeSide {
    /// Side of an edge on slot `edge_index` of `triangle`.
    pub fn new(triangle: u32, edge_index: usize) -> Self {
        Self {
            triangle,
            edge_index,
        }
    }
}

/// A mesh edge where two triangles meet at an angle sharp enough to diffract sound.
///
/// `plane1` and `plane2` are the planes of the two triangles, oriented so that
/// their normals face away from the solid wedge between them. The edge's
/// neighbor list lives in the owning [`DiffractionGraph`](super::DiffractionGraph).
#[derive(Debug, Clone, PartialEq)]
pub struct DiffractionEdge {
    triangle1: u32,
    triangle2: u32,
    edge_index1: u16,
    edge_index2: u16,
    v1: u32,
    v2: u32,
    start: Vec3,
    end: Vec3,
    plane1: Plane3,
    plane2: Plane3,
    neighbor_offset: u32,
    neighbor_count: u32,
}

impl DiffractionEdge {
    /// Builds the edge shared by `first` and `second`.
    ///
    /// The endpoints come from `first`'s edge slot. Triangle indices and slots
    /// must be valid; [`DiffractionGraphBuilder::add_edge`](super::DiffractionGraphBuilder::add_edge)
    /// checks them before calling this.
    pub fn new(
        triangles: &[ResolvedTriangle],
        vertices: &[Vec3],
        first: EdgeSide,
        second: EdgeSide,
    ) -> Self {
        let triangle1 = &triangles[first.triangle as usize];
        let triangle2 = &triangles[second.triangle as usize];

        let (v1, v2) = triangle1.edge_vertices(first.edge_index);
        let free1 = vertices[triangle1.edge_free_vertex(first.edge_index) as usize];
        let free2 = vertices[triangle2.edge_free_vertex(second.edge_index) as usize];

        let mut plane1 = *triangle1.plane();
        let mut plane2 = *triangle2.plane();
        if plane1.signed_distance(free2) > 0.0 {
            plane1 = -plane1;
        }
        if plane2.signed_distance(free1) > 0.0 {
            plane2 = -plane2;
        }

        Self {
            triangle1: first.triangle,
            triangle2: second.triangle,
            edge_index1: first.edge_index as u16,
            edge_index2: second.edge_index as u16,
            v1,
            v2,
            start: vertices[v1 as usize],
            end: vertices[v2 as usize],
            plane1,
            plane2,
            neighbor_offset: 0,
            neighbor_count: 0,
        }
    }

    /// First adjacent triangle.
    pub fn triangle1(&self) -> u32 {
        self.triangle1
    }

    /// Second adjacent triangle.
    pub fn triangle2(&self) -> u32 {
        self.triangle2
    }

    /// Edge slot of this edge on `triangle1`.
    pub fn edge_index1(&self) -> usize {
        self.edge_index1 as usize
    }

    /// Edge slot on `triangle2`.
    pub fn edge_index2(&self) -> usize {
        self.edge_index2 as usize
    }

    /// Scene vertex indices of the two endpoints.
    pub fn vertex_indices(&self) -> (u32, u32) {
        (self.v1, self.v2)
    }

    /// Outward plane of `triangle1`.
    pub fn plane1(&self) -> &Plane3 {
        &self.plane1
    }

    /// Outward plane of `triangle2`.
    pub fn plane2(&self) -> &Plane3 {
        &self.plane2
    }

    /// Start position.
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// End position.
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Unnormalized vector from the start to the end.
    pub fn extent(&self) -> Vec3 {
        self.end - self.start
    }

    /// Unit direction from the start to the end.
    pub fn direction(&self) -> Vec3 {
        self.extent().normalize_or_zero()
    }

    /// Edge length.
    pub fn length(&self) -> f32 {
        self.extent().length()
    }

    /// Unit vector pushing points on the edge out of the wedge, used to bias
    /// ray origins away from the geometry.
    pub fn normal(&self) -> Vec3 {
        if self.triangle1 != self.triangle2 {
            let sum = self.plane1.normal + self.plane2.normal;
            let magnitude = sum.length();
            if magnitude > EPSILON {
                return sum / magnitude;
            }
        }

        // Single-triangle edge, or the planes face opposite ways.
        self.plane1.normal.cross(self.extent()).normalize_or_zero()
    }

    /// Whether `point` can see around the edge, that is, it is not in front
    /// of both planes nor behind both planes by more than `offset`.
    pub fn test_orientation(&self, point: Vec3, offset: f32) -> bool {
        let d1 = self.plane1.signed_distance(point);
        let d2 = self.plane2.signed_distance(point);

        let in_front = d1 > offset && d2 > offset;
        let behind = d1 < -offset && d2 < -offset;
        !(in_front || behind)
    }

    /// Scene vertex index of `triangle1`'s vertex not on this edge.
    pub fn free_vertex1(&self, triangles: &[ResolvedTriangle]) -> u32 {
        triangles[self.triangle1 as usize].edge_free_vertex(self.edge_index1())
    }

    /// Scene vertex index of `triangle2`'s vertex not on this edge.
    pub fn free_vertex2(&self, triangles: &[ResolvedTriangle]) -> u32 {
        triangles[self.triangle2 as usize].edge_free_vertex(self.edge_index2())
    }

    /// First index of the neighbors in the packed array.
    pub fn neighbor_offset(&self) -> u32 {
        self.neighbor_offset
    }

    /// Number of neighboring edges.
    pub fn neighbor_count(&self) -> u32 {
        self.neighbor_count
    }

    /// Range of this edge's neighbors in the graph's packed neighbor array.
    pub fn neighbor_range(&self) -> Range<usize> {
        let start = self.neighbor_offset as usize;
        start..start + self.neighbor_count as usize
    }

    pub(crate) fn set_neighbor_range(&mut self, offset: u32, count: u32) {
        self.neighbor_offset = offset;
        self.neighbor_count = count;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two triangles folded along the y axis into a convex wedge: one lies on
    /// the `z = 0` plane over `x >= 0`, the other on the `x = 0` plane over `z <= 0`.
    pub(crate) fn wedge() -> (Vec<Vec3>, Vec<ResolvedTriangle>) {
        let vertices = vec![
            Vec3::ZERO,
            Vec3::Y,
            Vec3::X,
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let triangles = vec![
            ResolvedTriangle::new([0, 1, 2], &vertices, 0),
            ResolvedTriangle::new([0, 1, 3], &vertices, 0),
        ];
        (vertices, triangles)
    }

    fn wedge_edge() -> DiffractionEdge {
        let (vertices, triangles) = wedge();
        DiffractionEdge::new(
            &triangles,
            &vertices,
            EdgeSide::new(0, 0),
            EdgeSide::new(1, 0),
        )
    }

    #[test]
    fn test_planes_face_out_of_the_wedge() {
        let (vertices, triangles) = wedge();
        let edge = wedge_edge();

        assert_eq!(edge.vertex_indices(), (0, 1));
        assert_eq!(edge.plane1().normal, Vec3::Z);
        assert_eq!(edge.plane2().normal, -Vec3::X);
        assert!(edge.plane1().signed_distance(vertices[edge.free_vertex2(&triangles) as usize]) <= 0.0);
        assert!(edge.plane2().signed_distance(vertices[edge.free_vertex1(&triangles) as usize]) <= 0.0);
    }

    #[test]
    fn test_edge_geometry() {
        let edge = wedge_edge();
        assert_eq!(edge.start(), Vec3::ZERO);
        assert_eq!(edge.end(), Vec3::Y);
        assert_eq!(edge.extent(), Vec3::Y);
        assert_eq!(edge.direction(), Vec3::Y);
        assert_eq!(edge.length(), 1.0);

        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert!((edge.normal() - expected).length() < 1e-6);
    }

    #[test]
    fn test_orientation() {
        let edge = wedge_edge();

        // Inside the solid, behind both planes.
        assert!(!edge.test_orientation(Vec3::new(0.5, 0.5, -0.5), 0.0));
        // In front of both planes.
        assert!(!edge.test_orientation(Vec3::new(-0.5, 0.5, 0.5), 0.0));
        // Above the first triangle: sees the edge.
        assert!(edge.test_orientation(Vec3::new(0.5, 0.5, 0.5), 0.0));
        // On a plane counts as visible.
        assert!(edge.test_orientation(Vec3::new(-0.5, 0.5, 0.0), 0.0));
        // Within the offset of both planes.
        assert!(edge.test_orientation(Vec3::new(-0.01, 0.5, 0.01), 0.05));
    }

    #[test]
    fn test_orientation_with_offset() {
        let edge = wedge_edge();

        // On the first plane, well in front of the second.
        assert!(edge.test_orientation(Vec3::new(-0.5, 0.5, 0.0), 0.05));
        // Just behind the first plane, still within the offset.
        assert!(edge.test_orientation(Vec3::new(0.5, 0.5, -0.03), 0.05));
        // Past the offset on both planes.
        assert!(!edge.test_orientation(Vec3::new(0.1, 0.5, -0.1), 0.05));
        assert!(!edge.test_orientation(Vec3::new(-0.1, 0.5, 0.1), 0.05));
    }

    #[test]
    fn test_single_triangle_normal_falls_back_to_cross_product() {
        let (vertices, triangles) = wedge();
        let edge = DiffractionEdge::new(
            &triangles,
            &vertices,
            EdgeSide::new(0, 0),
            EdgeSide::new(0, 0),
        );
        let normal = edge.normal();
        assert!((normal.length() - 1.0).abs() < 1e-6);
        assert!(normal.dot(edge.direction()).abs() < 1e-6);
    }

    #[test]
    fn test_new_edge_has_empty_neighbor_range() {
        let edge = wedge_edge();
        assert_eq!(edge.neighbor_count(), 0);
        assert!(edge.neighbor_range().is_empty());
    }
}
