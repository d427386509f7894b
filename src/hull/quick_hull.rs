use crate::geometry::{triangle_normal, Plane};
use crate::hull::{ConvexHull, Diagnostics};
use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::mesh::{Facet, HalfEdgeMesh, MeshBuilder};
use num::Bounded;
use std::collections::VecDeque;

/// The Quickhull engine.
///
/// A `QuickHull` value owns the working state of a hull computation (the
/// point cloud copy, the mesh arena and the diagnostics) and can be reused
/// for several computations to amortize allocations.
#[derive(Clone, Debug, Default)]
pub struct QuickHull {
    pub(super) epsilon: Real,
    pub(super) epsilon_squared: Real,

    /// Set when every input point lies on a single plane. In that case one
    /// synthetic point is appended to `vertex_data` so the hull has volume,
    /// and removed again once the mesh is built.
    pub(super) planar: bool,
    pub(super) vertex_data: Vec<Point<Real>>,
    pub(super) mesh: MeshBuilder,
    pub(super) extreme_value_indices: [usize; 6],
    pub(super) diagnostics: Diagnostics,
}

impl QuickHull {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics of the most recent hull computation.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Computes the convex hull of `points` as an indexed triangle mesh.
    ///
    /// - `ccw` selects the output winding of the emitted triangles; flipping
    ///   it reverses every triangle and changes nothing else.
    /// - `original_indices` makes the output index directly into `points`
    ///   instead of a compacted vertex buffer.
    /// - `epsilon` is the relative tolerance of the distance predicates; a
    ///   non-positive value selects [`DEFAULT_EPSILON`]. The working
    ///   tolerance is `epsilon` scaled by the largest absolute coordinate of
    ///   the cloud.
    ///
    /// An empty input produces an empty hull. Degenerate inputs (coincident,
    /// collinear or coplanar clouds) produce a degenerate but topologically
    /// closed hull. For a fixed input and parameters the output is
    /// reproducible bit-for-bit.
    pub fn convex_hull(
        &mut self,
        points: &[Point<Real>],
        ccw: bool,
        original_indices: bool,
        epsilon: Real,
    ) -> ConvexHull {
        if points.is_empty() {
            return ConvexHull::default();
        }

        self.build_mesh(points, epsilon);
        ConvexHull::from_builder(&self.mesh, &self.vertex_data, ccw, original_indices)
    }

    /// Computes the convex hull of `points` and returns it as a compacted
    /// half-edge mesh. See [`QuickHull::convex_hull`] for the parameter
    /// semantics.
    pub fn convex_hull_as_mesh(&mut self, points: &[Point<Real>], epsilon: Real) -> HalfEdgeMesh {
        if points.is_empty() {
            return HalfEdgeMesh::default();
        }

        self.build_mesh(points, epsilon);
        HalfEdgeMesh::from_builder(&self.mesh, &self.vertex_data)
    }

    fn build_mesh(&mut self, points: &[Point<Real>], epsilon: Real) {
        self.vertex_data = points.to_vec();

        // The tolerance scales with the cloud so that it is meaningful for
        // clouds of any magnitude.
        self.extreme_value_indices = super::initial_simplex::extreme_values(&self.vertex_data);
        let scale = super::initial_simplex::compute_scale(
            &self.vertex_data,
            self.extreme_value_indices,
        );
        let epsilon = if epsilon <= 0.0 { DEFAULT_EPSILON } else { epsilon };
        self.epsilon = epsilon * scale;
        self.epsilon_squared = self.epsilon * self.epsilon;

        self.diagnostics = Diagnostics::default();
        self.planar = false;
        self.create_convex_half_edge_mesh();

        if self.planar {
            // The synthetic point is not part of the input: every half-edge
            // ending there is rewritten to vertex 0, whose offset defined it.
            let extra_point_index = self.vertex_data.len() - 1;
            for half_edge in &mut self.mesh.half_edges {
                if half_edge.end_vertex == extra_point_index {
                    half_edge.end_vertex = 0;
                }
            }
            let _ = self.vertex_data.pop();
        }
    }

    fn create_convex_half_edge_mesh(&mut self) {
        struct FaceData {
            face_index: usize,
            /// If the face turns out not to be visible, this half-edge is a
            /// horizon edge.
            entered_from_half_edge: usize,
        }

        let mut visible_faces: Vec<usize> = Vec::new();
        let mut horizon_edges: Vec<usize> = Vec::new();
        let mut possibly_visible_faces: Vec<FaceData> = Vec::new();
        let mut new_face_indices: Vec<usize> = Vec::new();
        let mut new_half_edge_indices: Vec<usize> = Vec::new();
        let mut disabled_face_points: Vec<Vec<usize>> = Vec::new();

        self.mesh = self.initial_tetrahedron();
        debug_assert_eq!(self.mesh.facets.len(), 4);

        let mut face_list: VecDeque<usize> = VecDeque::new();
        for i in 0..4 {
            let facet = &mut self.mesh.facets[i];
            if !facet.points_on_positive_side.is_empty() {
                face_list.push_back(i);
                facet.in_face_stack = true;
            }
        }

        // Process faces until the queue is empty.
        let mut iteration: u64 = 0;
        while let Some(top_face_index) = face_list.pop_front() {
            iteration += 1;
            if iteration == i64::MAX as u64 {
                // The stamp below is only ever compared for equality, so on
                // the (unreachable) wrap every stamp is cleared to keep stale
                // values from colliding with the new epoch.
                for facet in &mut self.mesh.facets {
                    facet.visibility_checked_on_iteration = 0;
                }
                iteration = 1;
            }

            let skip = {
                let tf = &mut self.mesh.facets[top_face_index];
                tf.in_face_stack = false;
                tf.is_disabled() || tf.points_on_positive_side.is_empty()
            };
            if skip {
                continue;
            }

            // The most distant point of this facet is the one we extrude to.
            let active_point_index = self.mesh.facets[top_face_index].most_distant_point;
            let active_point = self.vertex_data[active_point_index];

            horizon_edges.clear();
            visible_faces.clear();
            possibly_visible_faces.clear();

            // Find the faces that have the active point on their positive
            // side by flooding outward from the top face across twins,
            // collecting the horizon edges on the boundary of that region.
            possibly_visible_faces.push(FaceData {
                face_index: top_face_index,
                entered_from_half_edge: Bounded::max_value(),
            });
            while let Some(face_data) = possibly_visible_faces.pop() {
                let checked = {
                    let pvf = &self.mesh.facets[face_data.face_index];
                    debug_assert!(!pvf.is_disabled());
                    pvf.visibility_checked_on_iteration == iteration
                };

                if checked {
                    if self.mesh.facets[face_data.face_index].visible_on_current_iteration {
                        continue;
                    }
                } else {
                    let plane = self.mesh.facets[face_data.face_index].plane;
                    let distance = plane.signed_distance(&active_point);
                    let pvf = &mut self.mesh.facets[face_data.face_index];
                    pvf.visibility_checked_on_iteration = iteration;
                    if distance > 0.0 {
                        pvf.visible_on_current_iteration = true;
                        pvf.horizon_edges_on_current_iteration = 0;
                        visible_faces.push(face_data.face_index);

                        for half_edge_index in
                            self.mesh.half_edge_indices_of_facet(face_data.face_index)
                        {
                            let opp = self.mesh.half_edges[half_edge_index].opp;
                            if opp != face_data.entered_from_half_edge {
                                possibly_visible_faces.push(FaceData {
                                    face_index: self.mesh.half_edges[opp].face,
                                    entered_from_half_edge: half_edge_index,
                                });
                            }
                        }
                        continue;
                    }

                    assert!(
                        face_data.face_index != top_face_index,
                        "Internal error: the top face must see its own most distant point."
                    );
                }

                // The face is not visible, so the half-edge we came from is
                // part of the horizon.
                self.mesh.facets[face_data.face_index].visible_on_current_iteration = false;
                horizon_edges.push(face_data.entered_from_half_edge);

                // Remember which half-edge of the owning (visible) face is on
                // the horizon; the other two will not survive and their slots
                // can be recycled.
                let owner = self.mesh.half_edges[face_data.entered_from_half_edge].face;
                let owner_half_edges = self.mesh.half_edge_indices_of_facet(owner);
                let position = if owner_half_edges[0] == face_data.entered_from_half_edge {
                    0
                } else if owner_half_edges[1] == face_data.entered_from_half_edge {
                    1
                } else {
                    2
                };
                self.mesh.facets[owner].horizon_edges_on_current_iteration |= 1 << position;
            }

            let n_horizon_edges = horizon_edges.len();

            // Order the horizon edges into a loop. This can fail under
            // numerical instability, in which case the point is given up and
            // the hull keeps going with a minor degeneration.
            if !reorder_horizon_edges(&self.mesh, &mut horizon_edges) {
                self.diagnostics.failed_horizon_edges += 1;
                log::warn!(
                    "Failed to solve the horizon edge loop; discarding point {}.",
                    active_point_index
                );

                let tf = &mut self.mesh.facets[top_face_index];
                if let Some(position) = tf
                    .points_on_positive_side
                    .iter()
                    .position(|&p| p == active_point_index)
                {
                    let _ = tf.points_on_positive_side.remove(position);
                }
                continue;
            }

            // Disable the visible faces, keeping their point lists, and
            // recycle their non-horizon half-edge slots: the first 2H of them
            // become the side edges of the cone built below.
            new_face_indices.clear();
            new_half_edge_indices.clear();
            disabled_face_points.clear();

            let mut n_disabled = 0;
            for &face_index in &visible_faces {
                let half_edges = self.mesh.half_edge_indices_of_facet(face_index);
                let horizon_mask =
                    self.mesh.facets[face_index].horizon_edges_on_current_iteration;
                for (i, &half_edge_index) in half_edges.iter().enumerate() {
                    if horizon_mask & (1 << i) == 0 {
                        if n_disabled < n_horizon_edges * 2 {
                            // Reused on this iteration.
                            new_half_edge_indices.push(half_edge_index);
                            n_disabled += 1;
                        } else {
                            // Reused on a later iteration.
                            self.mesh.disable_half_edge(half_edge_index);
                        }
                    }
                }

                let points = self.mesh.disable_facet(face_index);
                if !points.is_empty() {
                    disabled_face_points.push(points);
                }
            }
            if n_disabled < n_horizon_edges * 2 {
                let shortfall = n_horizon_edges * 2 - n_disabled;
                for _ in 0..shortfall {
                    let index = self.mesh.add_half_edge();
                    new_half_edge_indices.push(index);
                }
            }

            // Cone the active point over the horizon loop: one new face per
            // horizon edge `ab`, bounded by `ab` itself and two side edges
            // shared with the neighbouring cone faces.
            for i in 0..n_horizon_edges {
                let ab = horizon_edges[i];
                let (a, b) = self.mesh.vertex_indices_of_half_edge(ab);

                let new_face_index = self.mesh.add_facet();
                new_face_indices.push(new_face_index);

                let ca = new_half_edge_indices[2 * i];
                let bc = new_half_edge_indices[2 * i + 1];

                self.mesh.half_edges[ab].next = bc;
                self.mesh.half_edges[bc].next = ca;
                self.mesh.half_edges[ca].next = ab;

                self.mesh.half_edges[ab].face = new_face_index;
                self.mesh.half_edges[bc].face = new_face_index;
                self.mesh.half_edges[ca].face = new_face_index;

                self.mesh.half_edges[ca].end_vertex = a;
                self.mesh.half_edges[bc].end_vertex = active_point_index;

                let previous = if i > 0 {
                    2 * i - 1
                } else {
                    2 * n_horizon_edges - 1
                };
                let next = 2 * (i + 1) % (2 * n_horizon_edges);
                self.mesh.half_edges[ca].opp = new_half_edge_indices[previous];
                self.mesh.half_edges[bc].opp = new_half_edge_indices[next];

                let facet = &mut self.mesh.facets[new_face_index];
                facet.plane = Plane::new(
                    triangle_normal(&self.vertex_data[a], &self.vertex_data[b], &active_point),
                    &active_point,
                );
                facet.half_edge = ab;
            }

            // Reassign the points of the disabled faces to the new faces;
            // whatever no new face accepts is now interior and is dropped.
            for disabled_points in &disabled_face_points {
                for &point_index in disabled_points {
                    if point_index == active_point_index {
                        continue;
                    }
                    for i in 0..n_horizon_edges {
                        if add_point_to_facet(
                            &self.vertex_data,
                            self.epsilon_squared,
                            &mut self.mesh.facets[new_face_indices[i]],
                            point_index,
                        ) {
                            break;
                        }
                    }
                }
            }

            // Queue the new faces that received points.
            for &new_face_index in &new_face_indices {
                let facet = &mut self.mesh.facets[new_face_index];
                if !facet.points_on_positive_side.is_empty() && !facet.in_face_stack {
                    face_list.push_back(new_face_index);
                    facet.in_face_stack = true;
                }
            }
        }
    }
}

/// Assigns `point_index` to the facet if the point lies beyond its plane by
/// more than the working tolerance. Returns whether the point was accepted.
pub(super) fn add_point_to_facet(
    vertex_data: &[Point<Real>],
    epsilon_squared: Real,
    facet: &mut Facet,
    point_index: usize,
) -> bool {
    let distance = facet.plane.signed_distance(&vertex_data[point_index]);
    if distance > 0.0 && distance * distance > epsilon_squared * facet.plane.sqr_n_length {
        facet.points_on_positive_side.push(point_index);
        if distance > facet.most_distant_point_dist {
            facet.most_distant_point_dist = distance;
            facet.most_distant_point = point_index;
        }
        true
    } else {
        false
    }
}

/// Rearranges `horizon_edges` in place so that consecutive edges share an
/// endpoint. Returns false when no loop can be formed, which indicates a
/// numerical instability in the visibility flood.
fn reorder_horizon_edges(mesh: &MeshBuilder, horizon_edges: &mut [usize]) -> bool {
    let n_edges = horizon_edges.len();
    for i in 0..n_edges.saturating_sub(1) {
        let end_vertex = mesh.half_edges[horizon_edges[i]].end_vertex;
        let mut found_next = false;
        for j in (i + 1)..n_edges {
            let begin_vertex = mesh.half_edges[mesh.half_edges[horizon_edges[j]].opp].end_vertex;
            if begin_vertex == end_vertex {
                horizon_edges.swap(i + 1, j);
                found_next = true;
                break;
            }
        }
        if !found_next {
            return false;
        }
    }
    true
}
