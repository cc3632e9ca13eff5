//! Packed edge-to-edge adjacency for diffraction path search.

use crate::error::{PropagationError, Result};
use crate::math::Vec3;
use crate::scene::{DiffractionEdge, EdgeSide, ResolvedTriangle};
use std::sync::Arc;

/// The diffraction edges of a mesh and, for every edge, the other edges a
/// diffracted path can continue to.
///
/// Neighbor lists are stored back to back in one flat array. Edge `e`'s
/// neighbors occupy `e.neighbor_range()` of it. The graph has no mutation API:
/// once built it is shared read-only between tracing threads.
#[derive(Debug, Clone, Default)]
pub struct DiffractionGraph {
    edges: Arc<Vec<DiffractionEdge>>,
    edge_neighbors: Vec<u32>,
}

impl DiffractionGraph {
    /// A graph over `edges` with no neighbor connections. Any neighbor ranges
    /// already stored on the edges resolve to empty lists.
    pub fn new(edges: Arc<Vec<DiffractionEdge>>) -> Self {
        Self {
            edges,
            edge_neighbors: Vec::new(),
        }
    }

    /// Assembles a graph from edges whose neighbor ranges are already assigned.
    ///
    /// Every range and every packed index is bounds checked. Edges listing
    /// themselves as neighbors are accepted but logged.
    pub fn from_parts(edges: Arc<Vec<DiffractionEdge>>, edge_neighbors: Vec<u32>) -> Result<Self> {
        for (index, edge) in edges.iter().enumerate() {
            let range = edge.neighbor_range();
            if range.end > edge_neighbors.len() {
                return Err(PropagationError::NeighborRangeOutOfBounds {
                    edge: index as u32,
                    offset: edge.neighbor_offset(),
                    count: edge.neighbor_count(),
                    neighbor_count: edge_neighbors.len(),
                });
            }
        }

        if let Some(&edge) = edge_neighbors.iter().find(|&&n| n as usize >= edges.len()) {
            return Err(PropagationError::EdgeOutOfRange {
                edge,
                edge_count: edges.len(),
            });
        }

        let graph = Self {
            edges,
            edge_neighbors,
        };
        if let Some(edge) = graph.find_self_neighbor() {
            log::warn!("Diffraction edge {} lists itself as a neighbor", edge);
        }
        Ok(graph)
    }

    pub fn edge(&self, index: u32) -> &DiffractionEdge {
        debug_assert!((index as usize) < self.edges.len(), "edge {index} out of range");
        &self.edges[index as usize]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[DiffractionEdge] {
        &self.edges
    }

    /// Shared handle to the edge array.
    pub fn shared_edges(&self) -> Arc<Vec<DiffractionEdge>> {
        Arc::clone(&self.edges)
    }

    /// Edge at position `k` of the packed neighbor array.
    pub fn edge_neighbor(&self, k: usize) -> &DiffractionEdge {
        self.edge(self.edge_neighbor_index(k))
    }

    /// Edge index at position `k` of the packed neighbor array.
    pub fn edge_neighbor_index(&self, k: usize) -> u32 {
        debug_assert!(k < self.edge_neighbors.len(), "neighbor slot {k} out of range");
        self.edge_neighbors[k]
    }

    /// Total length of the packed neighbor array.
    pub fn edge_neighbor_count(&self) -> usize {
        self.edge_neighbors.len()
    }

    /// Neighbors of `edge`, with their indices.
    pub fn neighbors(&self, edge: u32) -> impl Iterator<Item = (u32, &DiffractionEdge)> + '_ {
        self.neighbor_slice(self.edge(edge))
            .iter()
            .map(move |&index| (index, &self.edges[index as usize]))
    }

    fn neighbor_slice(&self, edge: &DiffractionEdge) -> &[u32] {
        self.edge_neighbors
            .get(edge.neighbor_range())
            .unwrap_or(&[])
    }

    /// Approximate heap memory held by the graph.
    pub fn size_in_bytes(&self) -> usize {
        self.edges.capacity() * size_of::<DiffractionEdge>()
            + self.edge_neighbors.capacity() * size_of::<u32>()
    }

    /// First edge that appears in its own neighbor list, if any.
    pub fn find_self_neighbor(&self) -> Option<u32> {
        self.edges.iter().enumerate().find_map(|(index, edge)| {
            self.neighbor_slice(edge)
                .contains(&(index as u32))
                .then_some(index as u32)
        })
    }
}

/// Collects diffraction edges and their neighbor relations, then packs them
/// into a [`DiffractionGraph`].
///
/// Which edges exist and which pairs neighbor each other is decided by the
/// caller; the builder validates the indices and produces the packed layout.
#[derive(Debug, Default)]
pub struct DiffractionGraphBuilder {
    edges: Vec<DiffractionEdge>,
    neighbors: Vec<Vec<u32>>,
}

impl DiffractionGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds the edge shared by `first` and `second`, returning its index.
    pub fn add_edge(
        &mut self,
        triangles: &[ResolvedTriangle],
        vertices: &[Vec3],
        first: EdgeSide,
        second: EdgeSide,
    ) -> Result<u32> {
        for side in [first, second] {
            if side.triangle as usize >= triangles.len() {
                return Err(PropagationError::TriangleOutOfRange {
                    triangle: side.triangle,
                    triangle_count: triangles.len(),
                });
            }
            if side.edge_index >= 3 {
                return Err(PropagationError::EdgeSlotOutOfRange {
                    slot: side.edge_index,
                });
            }
        }

        let index = self.edges.len() as u32;
        self.edges
            .push(DiffractionEdge::new(triangles, vertices, first, second));
        self.neighbors.push(Vec::new());
        Ok(index)
    }

    /// Records that a path diffracted by `edge` can continue to `neighbor`.
    ///
    /// `neighbor` may refer to an edge added later; it is checked in [`build`](Self::build).
    pub fn add_neighbor(&mut self, edge: u32, neighbor: u32) -> Result<()> {
        if edge == neighbor {
            return Err(PropagationError::SelfNeighbor { edge });
        }
        let edge_count = self.edges.len();
        let list = self
            .neighbors
            .get_mut(edge as usize)
            .ok_or(PropagationError::EdgeOutOfRange { edge, edge_count })?;
        list.push(neighbor);
        Ok(())
    }

    /// Packs the neighbor lists and links every edge back into the two
    /// triangles it lies on.
    ///
    /// On error `triangles` is left unchanged.
    pub fn build(self, triangles: &mut [ResolvedTriangle]) -> Result<DiffractionGraph> {
        let Self {
            mut edges,
            neighbors,
        } = self;

        let edge_count = edges.len();
        let total: usize = neighbors.iter().map(Vec::len).sum();
        let mut edge_neighbors = Vec::with_capacity(total);

        for (edge, list) in edges.iter_mut().zip(&neighbors) {
            if let Some(&neighbor) = list.iter().find(|&&n| n as usize >= edge_count) {
                return Err(PropagationError::EdgeOutOfRange {
                    edge: neighbor,
                    edge_count,
                });
            }
            edge.set_neighbor_range(edge_neighbors.len() as u32, list.len() as u32);
            edge_neighbors.extend_from_slice(list);
        }

        // Links are checked on a scratch copy so a rejected graph leaves the
        // triangles untouched.
        let mut links: Vec<[Option<u32>; 3]> = triangles
            .iter()
            .map(|t| [0, 1, 2].map(|slot| t.diffraction_edge(slot)))
            .collect();

        for (index, edge) in edges.iter().enumerate() {
            let index = index as u32;
            let sides = [
                (edge.triangle1(), edge.edge_index1()),
                (edge.triangle2(), edge.edge_index2()),
            ];
            for (triangle_index, slot) in sides {
                let triangle_count = links.len();
                let slots = links.get_mut(triangle_index as usize).ok_or(
                    PropagationError::TriangleOutOfRange {
                        triangle: triangle_index,
                        triangle_count,
                    },
                )?;
                let current = slots[slot];
                match current {
                    Some(existing) if existing != index => {
                        return Err(PropagationError::EdgeSlotOccupied {
                            triangle: triangle_index,
                            slot,
                            existing,
                        });
                    }
                    _ => slots[slot] = Some(index),
                }
            }
        }

        for (triangle, slots) in triangles.iter_mut().zip(links) {
            for (slot, edge) in slots.into_iter().enumerate() {
                triangle.set_diffraction_edge(slot, edge);
            }
        }

        let graph = DiffractionGraph {
            edges: Arc::new(edges),
            edge_neighbors,
        };
        log::debug!(
            "Built diffraction graph: {} edges, {} neighbor links, {} bytes",
            graph.edge_count(),
            graph.edge_neighbor_count(),
            graph.size_in_bytes()
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::diffraction_edge::tests::wedge;

    /// A wedge plus a second fold sharing the `x = 0` triangle, giving three edges.
    fn builder_with_three_edges() -> (Vec<Vec3>, Vec<ResolvedTriangle>, DiffractionGraphBuilder) {
        let (mut vertices, mut triangles) = wedge();
        vertices.push(Vec3::new(-1.0, 0.0, -1.0));
        triangles.push(ResolvedTriangle::new([3, 1, 4], &vertices, 0));

        let mut builder = DiffractionGraphBuilder::new();
        builder
            .add_edge(&triangles, &vertices, EdgeSide::new(0, 0), EdgeSide::new(1, 0))
            .unwrap();
        builder
            .add_edge(&triangles, &vertices, EdgeSide::new(1, 2), EdgeSide::new(2, 0))
            .unwrap();
        builder
            .add_edge(&triangles, &vertices, EdgeSide::new(0, 2), EdgeSide::new(0, 2))
            .unwrap();
        (vertices, triangles, builder)
    }

    #[test]
    fn test_csr_packing() {
        let (_, mut triangles, mut builder) = builder_with_three_edges();
        builder.add_neighbor(0, 1).unwrap();
        builder.add_neighbor(0, 2).unwrap();
        builder.add_neighbor(2, 0).unwrap();

        let graph = builder.build(&mut triangles).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_neighbor_count(), 3);

        assert_eq!(graph.edge(0).neighbor_range(), 0..2);
        assert_eq!(graph.edge(1).neighbor_range(), 2..2);
        assert_eq!(graph.edge(2).neighbor_range(), 2..3);
        assert_eq!(graph.edge_neighbor_index(2), 0);
        assert_eq!(graph.edge_neighbor(0), graph.edge(1));

        let neighbors: Vec<u32> = graph.neighbors(0).map(|(index, _)| index).collect();
        assert_eq!(neighbors, vec![1, 2]);
        assert_eq!(graph.neighbors(1).count(), 0);
    }

    #[test]
    fn test_build_links_triangles() {
        let (_, mut triangles, builder) = builder_with_three_edges();
        builder.build(&mut triangles).unwrap();

        assert_eq!(triangles[0].diffraction_edge(0), Some(0));
        assert_eq!(triangles[1].diffraction_edge(0), Some(0));
        assert_eq!(triangles[1].diffraction_edge(2), Some(1));
        assert_eq!(triangles[2].diffraction_edge(0), Some(1));
        assert_eq!(triangles[0].diffraction_edge(2), Some(2));
        assert_eq!(triangles[0].diffraction_edge(1), None);
    }

    #[test]
    fn test_built_graph_has_no_self_neighbors() {
        let (_, mut triangles, mut builder) = builder_with_three_edges();
        for edge in 0..3 {
            for neighbor in 0..3 {
                let _ = builder.add_neighbor(edge, neighbor);
            }
        }
        let graph = builder.build(&mut triangles).unwrap();

        assert_eq!(graph.find_self_neighbor(), None);
        for edge in 0..graph.edge_count() as u32 {
            assert!(graph.neighbors(edge).all(|(index, _)| index != edge));
            assert_eq!(graph.neighbors(edge).count(), 2);
        }
    }

    #[test]
    fn test_builder_rejections() {
        let (vertices, mut triangles, mut builder) = builder_with_three_edges();

        assert_eq!(
            builder.add_neighbor(1, 1),
            Err(PropagationError::SelfNeighbor { edge: 1 })
        );
        assert_eq!(
            builder.add_neighbor(9, 0),
            Err(PropagationError::EdgeOutOfRange {
                edge: 9,
                edge_count: 3
            })
        );
        assert_eq!(
            builder.add_edge(&triangles, &vertices, EdgeSide::new(7, 0), EdgeSide::new(0, 0)),
            Err(PropagationError::TriangleOutOfRange {
                triangle: 7,
                triangle_count: 3
            })
        );
        assert_eq!(
            builder.add_edge(&triangles, &vertices, EdgeSide::new(0, 0), EdgeSide::new(1, 3)),
            Err(PropagationError::EdgeSlotOutOfRange { slot: 3 })
        );

        builder.add_neighbor(0, 5).unwrap();
        assert_eq!(
            builder.build(&mut triangles).unwrap_err(),
            PropagationError::EdgeOutOfRange {
                edge: 5,
                edge_count: 3
            }
        );
    }

    #[test]
    fn test_occupied_slot_is_rejected() {
        let (vertices, mut triangles, mut builder) = builder_with_three_edges();
        builder
            .add_edge(&triangles, &vertices, EdgeSide::new(1, 0), EdgeSide::new(2, 1))
            .unwrap();
        assert_eq!(
            builder.build(&mut triangles).unwrap_err(),
            PropagationError::EdgeSlotOccupied {
                triangle: 1,
                slot: 0,
                existing: 0
            }
        );
    }

    #[test]
    fn test_rejected_build_leaves_triangles_unchanged() {
        let (vertices, mut triangles, mut builder) = builder_with_three_edges();
        builder
            .add_edge(&triangles, &vertices, EdgeSide::new(1, 0), EdgeSide::new(2, 1))
            .unwrap();
        let before = triangles.clone();

        assert!(builder.build(&mut triangles).is_err());
        assert_eq!(triangles, before);
    }

    #[test]
    fn test_from_parts_checks_ranges() {
        let (vertices, triangles) = wedge();
        let mut edge = DiffractionEdge::new(
            &triangles,
            &vertices,
            EdgeSide::new(0, 0),
            EdgeSide::new(1, 0),
        );
        edge.set_neighbor_range(0, 2);
        let edges = Arc::new(vec![edge]);

        assert!(matches!(
            DiffractionGraph::from_parts(Arc::clone(&edges), vec![0]),
            Err(PropagationError::NeighborRangeOutOfBounds { edge: 0, .. })
        ));
        assert!(matches!(
            DiffractionGraph::from_parts(Arc::clone(&edges), vec![0, 4]),
            Err(PropagationError::EdgeOutOfRange { edge: 4, .. })
        ));

        let graph = DiffractionGraph::from_parts(edges, vec![0, 0]).unwrap();
        assert_eq!(graph.find_self_neighbor(), Some(0));
        assert!(graph.size_in_bytes() >= size_of::<DiffractionEdge>() + 8);
    }

    #[test]
    fn test_empty_graph() {
        let graph = DiffractionGraph::default();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edge_neighbor_count(), 0);
        assert_eq!(graph.find_self_neighbor(), None);
        assert_eq!(DiffractionGraph::new(graph.shared_edges()).edge_count(), 0);
    }
}
