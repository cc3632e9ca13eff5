//! Error types for PetalSonic propagation
//!
//! Errors only come out of the preprocessing boundary: validating a scene and
//! packing a diffraction graph. Lookups used while tracing never return errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropagationError {
    #[error("Triangle {triangle} references vertex {vertex}, but the scene has {vertex_count} vertices")]
    VertexOutOfRange {
        triangle: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error(
        "Triangle {triangle} references material {material}, but the table has {material_count} materials"
    )]
    MaterialOutOfRange {
        triangle: usize,
        material: u32,
        material_count: usize,
    },

    #[error("Triangle index {triangle} is out of range ({triangle_count} triangles)")]
    TriangleOutOfRange { triangle: u32, triangle_count: usize },

    #[error("Edge slot {slot} is invalid, a triangle only has slots 0, 1 and 2")]
    EdgeSlotOutOfRange { slot: usize },

    #[error("Diffraction edge index {edge} is out of range ({edge_count} edges)")]
    EdgeOutOfRange { edge: u32, edge_count: usize },

    #[error("Diffraction edge {edge} cannot be its own neighbor")]
    SelfNeighbor { edge: u32 },

    #[error("Slot {slot} of triangle {triangle} already belongs to diffraction edge {existing}")]
    EdgeSlotOccupied {
        triangle: u32,
        slot: usize,
        existing: u32,
    },

    #[error(
        "Neighbor range {offset}..{offset}+{count} of edge {edge} exceeds the {neighbor_count} packed neighbors"
    )]
    NeighborRangeOutOfBounds {
        edge: u32,
        offset: u32,
        count: u32,
        neighbor_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, PropagationError>;
