use crate::math::{Pose, Vec3};
use crate::scene::{SoundMaterial, SoundTriangle};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugListener {
    pub pose: Pose,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSource {
    pub position: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugDetector {
    pub position: Vec3,
    pub radius: f32,
}

/// World-space snapshot of one scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<SoundTriangle>,
    pub materials: Vec<SoundMaterial>,
}

/// Endpoints of a diffraction edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugEdge {
    pub v1: Vec3,
    pub v2: Vec3,
}

/// An unoccluded path from a source straight to a listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectPath {
    pub listener_position: Vec3,
    pub source_position: Vec3,
}

/// Interaction points of an indirect path, source and listener included.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectPath {
    pub points: Vec<Vec3>,
}

/// The lists held by a [`DebugCache`].
#[derive(Debug, Clone, Default)]
pub struct DebugLists {
    listeners: Vec<DebugListener>,
    sources: Vec<DebugSource>,
    detectors: Vec<DebugDetector>,
    object_meshes: Vec<ObjectMesh>,
    diffraction_edges: Vec<DebugEdge>,
    direct_paths: Vec<DirectPath>,
    transmission_paths: Vec<IndirectPath>,
    diffraction_paths: Vec<IndirectPath>,
    specular_paths: Vec<IndirectPath>,
    diffuse_paths: Vec<IndirectPath>,
}

macro_rules! list_accessors {
    ($($field:ident, $count:ident: $ty:ty;)*) => {
        impl DebugLists {
            $(
                pub fn $field(&self) -> &[$ty] {
                    &self.$field
                }

                pub fn $count(&self) -> usize {
                    self.$field.len()
                }
            )*

            fn clear(&mut self) {
                $(self.$field.clear();)*
            }
        }
    };
}

list_accessors! {
    listeners, listener_count: DebugListener;
    sources, source_count: DebugSource;
    detectors, detector_count: DebugDetector;
    object_meshes, object_mesh_count: ObjectMesh;
    diffraction_edges, diffraction_edge_count: DebugEdge;
    direct_paths, direct_path_count: DirectPath;
    transmission_paths, transmission_path_count: IndirectPath;
    diffraction_paths, diffraction_path_count: IndirectPath;
    specular_paths, specular_path_count: IndirectPath;
    diffuse_paths, diffuse_path_count: IndirectPath;
}

/// Thread-safe collector of debug geometry and discovered paths.
///
/// Writers take `&self` and may be called from any number of threads at once;
/// each call holds the lock for a single push. Readers call [`lock`](Self::lock)
/// and read through the returned guard, which keeps writers out until dropped.
///
/// ```
/// use petalsonic_propagation::debug::DebugCache;
/// use petalsonic_propagation::math::Vec3;
///
/// let cache = DebugCache::new();
/// cache.add_direct_path(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));
///
/// let lists = cache.lock();
/// assert_eq!(lists.direct_path_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DebugCache {
    lists: Mutex<DebugLists>,
}

impl DebugCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the cache for reading. Writers block until the guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, DebugLists> {
        // Every mutation is a single push or clear, so a panicking holder
        // cannot leave a list half written.
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Direct access when the cache is not shared.
    pub fn get_mut(&mut self) -> &mut DebugLists {
        self.lists.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_lists(self) -> DebugLists {
        self.lists
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Empties every list, keeping the allocated storage for reuse.
    pub fn clear(&self) {
        self.lock().clear();
        log::debug!("Debug cache cleared");
    }

    /// Empties every list and releases its storage.
    pub fn reset(&self) {
        *self.lock() = DebugLists::default();
        log::debug!("Debug cache reset");
    }

    pub fn add_listener(&self, pose: Pose, radius: f32) {
        let listener = DebugListener { pose, radius };
        self.lock().listeners.push(listener);
    }

    pub fn add_source(&self, position: Vec3, radius: f32) {
        let source = DebugSource { position, radius };
        self.lock().sources.push(source);
    }

    pub fn add_detector(&self, position: Vec3, radius: f32) {
        let detector = DebugDetector { position, radius };
        self.lock().detectors.push(detector);
    }

    pub fn add_object_mesh(
        &self,
        vertices: &[Vec3],
        triangles: &[SoundTriangle],
        materials: &[SoundMaterial],
    ) {
        let mesh = ObjectMesh {
            vertices: vertices.to_vec(),
            triangles: triangles.to_vec(),
            materials: materials.to_vec(),
        };
        self.lock().object_meshes.push(mesh);
    }

    pub fn add_diffraction_edge(&self, v1: Vec3, v2: Vec3) {
        self.lock().diffraction_edges.push(DebugEdge { v1, v2 });
    }

    pub fn add_direct_path(&self, listener_position: Vec3, source_position: Vec3) {
        let path = DirectPath {
            listener_position,
            source_position,
        };
        self.lock().direct_paths.push(path);
    }

    pub fn add_transmission_path(&self, points: impl Into<Vec<Vec3>>) {
        let path = IndirectPath {
            points: points.into(),
        };
        self.lock().transmission_paths.push(path);
    }

    pub fn add_diffraction_path(&self, points: impl Into<Vec<Vec3>>) {
        let path = IndirectPath {
            points: points.into(),
        };
        self.lock().diffraction_paths.push(path);
    }

    pub fn add_specular_path(&self, points: impl Into<Vec<Vec3>>) {
        let path = IndirectPath {
            points: points.into(),
        };
        self.lock().specular_paths.push(path);
    }

    pub fn add_diffuse_path(&self, points: impl Into<Vec<Vec3>>) {
        let path = IndirectPath {
            points: points.into(),
        };
        self.lock().diffuse_paths.push(path);
    }
}
