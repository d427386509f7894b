use crate::geometry::Plane;
use crate::math::Real;
use crate::mesh::{HalfEdge, DISABLED};

/// A triangular facet of the mesh under construction.
///
/// Beside its topology (one bounding half-edge) a facet carries the working
/// state of the hull iteration: the supporting plane, the exterior points
/// assigned to its positive side, and the per-iteration visibility
/// bookkeeping.
#[derive(Clone, Debug)]
pub(crate) struct Facet {
    /// Index of a bounding half-edge, or `DISABLED`.
    pub half_edge: usize,
    /// The supporting plane, oriented so that its normal points out of the
    /// hull.
    pub plane: Plane,
    /// The assigned point with the largest positive distance to `plane`.
    pub most_distant_point: usize,
    /// Distance of `most_distant_point` to `plane`.
    pub most_distant_point_dist: Real,
    /// Iteration stamp of the most recent visibility test.
    pub visibility_checked_on_iteration: u64,
    /// Cached verdict of the visibility test stamped above.
    pub visible_on_current_iteration: bool,
    /// Whether the facet currently sits in the processing queue.
    pub in_face_stack: bool,
    /// Bit `i` set when the `i`-th half-edge of this facet became a horizon
    /// edge on the current iteration.
    pub horizon_edges_on_current_iteration: u8,
    /// Exterior points on the positive side of `plane`.
    pub points_on_positive_side: Vec<usize>,
}

impl Facet {
    pub fn disable(&mut self) {
        self.half_edge = DISABLED;
    }

    pub fn is_disabled(&self) -> bool {
        self.half_edge == DISABLED
    }
}

impl Default for Facet {
    fn default() -> Self {
        Self {
            half_edge: DISABLED,
            plane: Plane::default(),
            most_distant_point: 0,
            most_distant_point_dist: 0.0,
            visibility_checked_on_iteration: 0,
            visible_on_current_iteration: false,
            in_face_stack: false,
            horizon_edges_on_current_iteration: 0,
            points_on_positive_side: Vec::new(),
        }
    }
}

/// The arena owning every facet and half-edge of the mesh under construction.
///
/// Records are never removed from the two vectors. Disabling a record marks
/// it with a sentinel and pushes its index onto a free-list; allocation pops
/// the free-list before growing the vector. Index stability is what allows
/// the hull iteration to hold facet and half-edge indices across disables.
#[derive(Clone, Debug, Default)]
pub(crate) struct MeshBuilder {
    pub facets: Vec<Facet>,
    pub half_edges: Vec<HalfEdge>,

    disabled_facets: Vec<usize>,
    disabled_half_edges: Vec<usize>,
}

impl MeshBuilder {
    /// Creates the mesh of the tetrahedron `abcd`.
    ///
    /// `d` must lie on the non-positive side of the plane `abc` so that every
    /// facet normal computed from its vertex cycle points outward.
    pub fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        let half_edges = vec![
            // Face 0: a -> b -> c.
            HalfEdge { end_vertex: b, opp: 6, face: 0, next: 1 },  // ab
            HalfEdge { end_vertex: c, opp: 9, face: 0, next: 2 },  // bc
            HalfEdge { end_vertex: a, opp: 3, face: 0, next: 0 },  // ca
            // Face 1: a -> c -> d.
            HalfEdge { end_vertex: c, opp: 2, face: 1, next: 4 },  // ac
            HalfEdge { end_vertex: d, opp: 11, face: 1, next: 5 }, // cd
            HalfEdge { end_vertex: a, opp: 7, face: 1, next: 3 },  // da
            // Face 2: b -> a -> d.
            HalfEdge { end_vertex: a, opp: 0, face: 2, next: 7 },  // ba
            HalfEdge { end_vertex: d, opp: 5, face: 2, next: 8 },  // ad
            HalfEdge { end_vertex: b, opp: 10, face: 2, next: 6 }, // db
            // Face 3: c -> b -> d.
            HalfEdge { end_vertex: b, opp: 1, face: 3, next: 10 }, // cb
            HalfEdge { end_vertex: d, opp: 8, face: 3, next: 11 }, // bd
            HalfEdge { end_vertex: c, opp: 4, face: 3, next: 9 },  // dc
        ];

        let facets = vec![
            Facet { half_edge: 0, ..Facet::default() },
            Facet { half_edge: 3, ..Facet::default() },
            Facet { half_edge: 6, ..Facet::default() },
            Facet { half_edge: 9, ..Facet::default() },
        ];

        Self {
            facets,
            half_edges,
            disabled_facets: Vec::new(),
            disabled_half_edges: Vec::new(),
        }
    }

    /// Allocates a facet slot, reusing a disabled one when available, and
    /// returns its index. The caller is responsible for setting the bounding
    /// half-edge and the plane.
    pub fn add_facet(&mut self) -> usize {
        if let Some(index) = self.disabled_facets.pop() {
            let facet = &mut self.facets[index];
            debug_assert!(facet.is_disabled());
            debug_assert!(facet.points_on_positive_side.is_empty());
            facet.most_distant_point_dist = 0.0;
            facet.visibility_checked_on_iteration = 0;
            facet.visible_on_current_iteration = false;
            facet.in_face_stack = false;
            facet.horizon_edges_on_current_iteration = 0;
            return index;
        }

        self.facets.push(Facet::default());
        self.facets.len() - 1
    }

    /// Allocates a half-edge slot, reusing a disabled one when available, and
    /// returns its index. The caller overwrites all four fields.
    pub fn add_half_edge(&mut self) -> usize {
        if let Some(index) = self.disabled_half_edges.pop() {
            return index;
        }

        self.half_edges.push(HalfEdge {
            end_vertex: DISABLED,
            opp: 0,
            face: 0,
            next: 0,
        });
        self.half_edges.len() - 1
    }

    /// Disables a facet and transfers ownership of its positive-side points
    /// to the caller.
    pub fn disable_facet(&mut self, facet_index: usize) -> Vec<usize> {
        let facet = &mut self.facets[facet_index];
        facet.disable();
        self.disabled_facets.push(facet_index);
        std::mem::take(&mut facet.points_on_positive_side)
    }

    /// Disables a half-edge, releasing its slot for reuse.
    pub fn disable_half_edge(&mut self, half_edge_index: usize) {
        self.half_edges[half_edge_index].disable();
        self.disabled_half_edges.push(half_edge_index);
    }

    /// Number of facets that are currently enabled.
    pub fn enabled_facet_count(&self) -> usize {
        self.facets.len() - self.disabled_facets.len()
    }

    /// The three vertex indices of a facet, in boundary-cycle order.
    pub fn vertex_indices_of_facet(&self, facet_index: usize) -> [usize; 3] {
        let he = &self.half_edges[self.facets[facet_index].half_edge];
        let second = &self.half_edges[he.next];
        let third = &self.half_edges[second.next];
        [he.end_vertex, second.end_vertex, third.end_vertex]
    }

    /// The start and end vertex of a half-edge.
    pub fn vertex_indices_of_half_edge(&self, half_edge_index: usize) -> (usize, usize) {
        let he = &self.half_edges[half_edge_index];
        (self.half_edges[he.opp].end_vertex, he.end_vertex)
    }

    /// The three half-edge indices of a facet, in boundary-cycle order.
    pub fn half_edge_indices_of_facet(&self, facet_index: usize) -> [usize; 3] {
        let first = self.facets[facet_index].half_edge;
        let second = self.half_edges[first].next;
        [first, second, self.half_edges[second].next]
    }
}

#[cfg(test)]
mod tests {
    use super::MeshBuilder;

    #[test]
    fn seed_tetrahedron_topology() {
        let mb = MeshBuilder::new(0, 1, 2, 3);
        assert_eq!(mb.facets.len(), 4);
        assert_eq!(mb.half_edges.len(), 12);

        // Twins are involutive and reverse direction.
        for i in 0..12 {
            let he = &mb.half_edges[i];
            assert_eq!(mb.half_edges[he.opp].opp, i);
            let (start, end) = mb.vertex_indices_of_half_edge(i);
            let (opp_start, opp_end) = mb.vertex_indices_of_half_edge(he.opp);
            assert_eq!((start, end), (opp_end, opp_start));
        }

        // Every next-chain closes in exactly three hops and stays in its facet.
        for f in 0..4 {
            let [h0, h1, h2] = mb.half_edge_indices_of_facet(f);
            assert_eq!(mb.half_edges[h2].next, h0);
            for h in [h0, h1, h2] {
                assert_eq!(mb.half_edges[h].face, f);
            }
        }

        // Each of the six tetrahedron edges is covered by exactly two
        // half-edges.
        let mut counts = std::collections::HashMap::new();
        for i in 0..12 {
            let (start, end) = mb.vertex_indices_of_half_edge(i);
            let key = (start.min(end), start.max(end));
            *counts.entry(key).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn facet_walk_starts_at_the_bounding_half_edge() {
        let mb = MeshBuilder::new(4, 5, 6, 7);
        // Face 0 is the cycle 4 -> 5 -> 6; walking from its bounding
        // half-edge (4 -> 5) yields end vertices 5, 6, 4.
        assert_eq!(mb.vertex_indices_of_facet(0), [5, 6, 4]);
        assert_eq!(mb.vertex_indices_of_half_edge(0), (4, 5));
    }

    #[test]
    fn disabled_slots_are_reused_before_growing() {
        let mut mb = MeshBuilder::new(0, 1, 2, 3);

        mb.facets[1].points_on_positive_side.push(7);
        let points = mb.disable_facet(1);
        assert_eq!(points, vec![7]);
        assert!(mb.facets[1].is_disabled());
        assert!(mb.facets[1].points_on_positive_side.is_empty());
        assert_eq!(mb.enabled_facet_count(), 3);

        assert_eq!(mb.add_facet(), 1);
        assert_eq!(mb.facets.len(), 4);
        assert_eq!(mb.add_facet(), 4);
        assert_eq!(mb.facets.len(), 5);

        mb.disable_half_edge(5);
        assert!(mb.half_edges[5].is_disabled());
        assert_eq!(mb.add_half_edge(), 5);
        assert_eq!(mb.add_half_edge(), 12);
    }
}
