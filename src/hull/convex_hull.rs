use crate::math::{Point, Real};
use crate::mesh::MeshBuilder;
use std::collections::HashMap;

/// The convex hull of a point cloud, as an indexed triangle mesh.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConvexHull {
    /// The hull vertex buffer. Contains only the vertices referenced by
    /// `indices`, unless the hull was built with original indices, in which
    /// case it is a copy of the input cloud.
    pub vertices: Vec<Point<Real>>,
    /// The vertex indices of each hull triangle.
    pub indices: Vec<[u32; 3]>,
}

impl ConvexHull {
    /// Resolves the index buffer into vertex triples, one per triangle.
    pub fn triangles(&self) -> Vec<[Point<Real>; 3]> {
        self.indices
            .iter()
            .map(|triangle| triangle.map(|i| self.vertices[i as usize]))
            .collect()
    }

    /// Extracts the hull from the builder mesh by walking its live faces
    /// through twin adjacency.
    pub(crate) fn from_builder(
        mesh: &MeshBuilder,
        vertex_data: &[Point<Real>],
        ccw: bool,
        use_original_indices: bool,
    ) -> Self {
        let mut hull = ConvexHull::default();

        let mut face_stack = Vec::new();
        if let Some(first) = mesh.facets.iter().position(|facet| !facet.is_disabled()) {
            face_stack.push(first);
        }
        if face_stack.is_empty() {
            return hull;
        }

        hull.indices = Vec::with_capacity(mesh.enabled_facet_count());
        let mut face_processed = vec![false; mesh.facets.len()];
        let mut optimized_vertex_buffer = Vec::new();
        let mut vertex_index_mapping: HashMap<usize, u32> = HashMap::new();

        while let Some(top) = face_stack.pop() {
            debug_assert!(!mesh.facets[top].is_disabled());
            if face_processed[top] {
                continue;
            }
            face_processed[top] = true;

            for half_edge_index in mesh.half_edge_indices_of_facet(top) {
                let adjacent = mesh.half_edges[mesh.half_edges[half_edge_index].opp].face;
                if !face_processed[adjacent] && !mesh.facets[adjacent].is_disabled() {
                    face_stack.push(adjacent);
                }
            }

            let vertices = mesh.vertex_indices_of_facet(top);
            let mut triangle = [0u32; 3];
            if use_original_indices {
                for (i, &vertex) in vertices.iter().enumerate() {
                    triangle[i] = vertex as u32;
                }
            } else {
                for (i, &vertex) in vertices.iter().enumerate() {
                    triangle[i] = *vertex_index_mapping.entry(vertex).or_insert_with(|| {
                        optimized_vertex_buffer.push(vertex_data[vertex]);
                        (optimized_vertex_buffer.len() - 1) as u32
                    });
                }
            }

            if ccw {
                hull.indices.push([triangle[0], triangle[2], triangle[1]]);
            } else {
                hull.indices.push([triangle[0], triangle[1], triangle[2]]);
            }
        }

        hull.vertices = if use_original_indices {
            vertex_data.to_vec()
        } else {
            optimized_vertex_buffer
        };
        hull
    }
}
