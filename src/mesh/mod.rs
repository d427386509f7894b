//! Half-edge mesh data structures: the construction arena and the compacted
//! output mesh.

pub use self::half_edge_mesh::{Face, HalfEdge, HalfEdgeMesh};
pub(crate) use self::mesh_builder::{Facet, MeshBuilder};

mod half_edge_mesh;
mod mesh_builder;

/// Sentinel index stored in a record to mark its slot as disabled.
pub(crate) const DISABLED: usize = usize::MAX;
