use crate::math::{Point, Real};
use crate::mesh::{MeshBuilder, DISABLED};
use std::collections::HashMap;

/// A directed edge of a half-edge mesh.
///
/// Each undirected mesh edge is stored as two oppositely-oriented half-edges,
/// one per incident face, allowing O(1) traversal of a face boundary and of
/// the faces around a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HalfEdge {
    /// Index of the vertex this half-edge points to.
    pub end_vertex: usize,
    /// Index of the opposite half-edge.
    pub opp: usize,
    /// Index of the face this half-edge belongs to.
    pub face: usize,
    /// Index of the next half-edge around the same face.
    pub next: usize,
}

impl HalfEdge {
    pub(crate) fn disable(&mut self) {
        self.end_vertex = DISABLED;
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.end_vertex == DISABLED
    }
}

/// A face of a half-edge mesh.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Face {
    /// Index of one of the half-edges bounding this face.
    pub half_edge: usize,
}

/// A closed triangular mesh in half-edge representation.
///
/// Produced by compacting the construction arena: disabled slots are dropped
/// and every vertex, face and half-edge index is remapped densely.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HalfEdgeMesh {
    /// The mesh vertices.
    pub vertices: Vec<Point<Real>>,
    /// The mesh faces.
    pub faces: Vec<Face>,
    /// The mesh half-edges.
    pub half_edges: Vec<HalfEdge>,
}

impl HalfEdgeMesh {
    /// Compacts the builder mesh into a densely indexed half-edge mesh.
    pub(crate) fn from_builder(builder: &MeshBuilder, vertices: &[Point<Real>]) -> Self {
        let mut mesh = HalfEdgeMesh::default();

        let mut face_mapping = HashMap::new();
        let mut half_edge_mapping = HashMap::new();
        let mut vertex_mapping = HashMap::new();

        for (i, facet) in builder.facets.iter().enumerate() {
            if facet.is_disabled() {
                continue;
            }

            mesh.faces.push(Face {
                half_edge: facet.half_edge,
            });
            let _ = face_mapping.insert(i, mesh.faces.len() - 1);

            for half_edge_index in builder.half_edge_indices_of_facet(i) {
                let vertex_index = builder.half_edges[half_edge_index].end_vertex;
                if !vertex_mapping.contains_key(&vertex_index) {
                    mesh.vertices.push(vertices[vertex_index]);
                    let _ = vertex_mapping.insert(vertex_index, mesh.vertices.len() - 1);
                }
            }
        }

        for (i, half_edge) in builder.half_edges.iter().enumerate() {
            if half_edge.is_disabled() {
                continue;
            }

            mesh.half_edges.push(*half_edge);
            let _ = half_edge_mapping.insert(i, mesh.half_edges.len() - 1);
        }

        for face in &mut mesh.faces {
            face.half_edge = *half_edge_mapping
                .get(&face.half_edge)
                .expect("Internal error: a face references a disabled half-edge.");
        }

        for half_edge in &mut mesh.half_edges {
            half_edge.face = face_mapping[&half_edge.face];
            half_edge.opp = half_edge_mapping[&half_edge.opp];
            half_edge.next = half_edge_mapping[&half_edge.next];
            half_edge.end_vertex = vertex_mapping[&half_edge.end_vertex];
        }

        mesh
    }
}
