//! Debug information collected while tracing, for an external renderer.
//!
//! Many tracing threads append to one [`DebugCache`]; a renderer then locks it
//! and reads the accumulated [`DebugLists`].

mod cache;
mod flags;

pub use cache::{
    DebugCache, DebugDetector, DebugEdge, DebugListener, DebugLists, DebugSource, DirectPath,
    IndirectPath, ObjectMesh,
};
pub use flags::DebugFlags;
