use std::hash::{Hash, Hasher};

/// A scene triangle as supplied by the mesh collaborator: three indices into
/// the scene vertex array plus an index into the material table.
///
/// Two triangles are equal when they use the same material and the same set
/// of vertex indices, regardless of order or winding.
#[derive(Debug, Clone, Copy)]
pub struct SoundTriangle {
    pub vertices: [u32; 3],
    pub material: u32,
}

impl SoundTriangle {
    pub fn new(v0: u32, v1: u32, v2: u32, material: u32) -> Self {
        Self {
            vertices: [v0, v1, v2],
            material,
        }
    }

    fn sorted_vertices(&self) -> [u32; 3] {
        let mut sorted = self.vertices;
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for SoundTriangle {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material && self.sorted_vertices() == other.sorted_vertices()
    }
}

impl Eq for SoundTriangle {}

impl Hash for SoundTriangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_vertices().hash(state);
        self.material.hash(state);
    }
}
