use crate::geometry::{triangle_normal, Plane, Ray};
use crate::hull::quick_hull::{add_point_to_facet, QuickHull};
use crate::math::{Point, Real};
use crate::mesh::MeshBuilder;
use num::Bounded;

/// Indices of the extreme points of the cloud, in the order max x, min x,
/// max y, min y, max z, min z.
pub(super) fn extreme_values(vertex_data: &[Point<Real>]) -> [usize; 6] {
    let first = vertex_data[0];
    let mut extremes = [first.x, first.x, first.y, first.y, first.z, first.z];
    let mut indices = [0usize; 6];

    for (index, point) in vertex_data.iter().enumerate().skip(1) {
        for (axis, coord) in [point.x, point.y, point.z].into_iter().enumerate() {
            if coord > extremes[2 * axis] {
                extremes[2 * axis] = coord;
                indices[2 * axis] = index;
            } else if coord < extremes[2 * axis + 1] {
                extremes[2 * axis + 1] = coord;
                indices[2 * axis + 1] = index;
            }
        }
    }

    indices
}

/// The scale of the cloud: the largest absolute coordinate reached by any of
/// its extreme points.
pub(super) fn compute_scale(vertex_data: &[Point<Real>], extreme_value_indices: [usize; 6]) -> Real {
    let mut scale: Real = 0.0;
    for (i, &index) in extreme_value_indices.iter().enumerate() {
        scale = scale.max(vertex_data[index][i / 2].abs());
    }
    scale
}

/// A seed for clouds with no usable 3D extent: a tetrahedron over the first
/// few distinct indices, oriented to satisfy the builder precondition.
fn degenerate_tetrahedron(vertex_data: &[Point<Real>]) -> MeshBuilder {
    let last = vertex_data.len() - 1;
    let mut v = [0, 1.min(last), 2.min(last), 3.min(last)];

    let normal = triangle_normal(&vertex_data[v[0]], &vertex_data[v[1]], &vertex_data[v[2]]);
    let plane = Plane::new(normal, &vertex_data[v[0]]);
    if plane.is_point_on_positive_side(&vertex_data[v[3]]) {
        v.swap(0, 1);
    }

    MeshBuilder::new(v[0], v[1], v[2], v[3])
}

impl QuickHull {
    /// Builds the seed tetrahedron mesh and partitions the cloud into the
    /// positive-side lists of its four faces. Degenerate clouds (a single
    /// point, a line, a plane) are detected here and handled in-band.
    ///
    /// `extreme_value_indices` must be set up before this is called.
    pub(super) fn initial_tetrahedron(&mut self) -> MeshBuilder {
        let n_vertices = self.vertex_data.len();

        // With at most three points the cloud cannot span a tetrahedron.
        if n_vertices <= 3 {
            return degenerate_tetrahedron(&self.vertex_data);
        }

        // Find the two most distant extreme points.
        let mut max_d = self.epsilon_squared;
        let (mut p1, mut p2) = (0, 0);
        for i in 0..6 {
            for j in (i + 1)..6 {
                let delta = self.vertex_data[self.extreme_value_indices[i]]
                    - self.vertex_data[self.extreme_value_indices[j]];
                let d_squared = delta.norm_squared();
                if d_squared > max_d {
                    max_d = d_squared;
                    p1 = self.extreme_value_indices[i];
                    p2 = self.extreme_value_indices[j];
                }
            }
        }
        if max_d == self.epsilon_squared {
            // The cloud consists of a single point.
            return degenerate_tetrahedron(&self.vertex_data);
        }
        debug_assert!(p1 != p2);

        // Find the point most distant from the line through those two.
        let ray = Ray::new(
            self.vertex_data[p1],
            self.vertex_data[p2] - self.vertex_data[p1],
        );
        let mut max_d = self.epsilon_squared;
        let mut p3: usize = Bounded::max_value();
        for (index, point) in self.vertex_data.iter().enumerate() {
            let distance = ray.squared_distance_to_point(point);
            if distance > max_d {
                max_d = distance;
                p3 = index;
            }
        }
        if max_d == self.epsilon_squared {
            // The cloud spans a one-dimensional subspace: the hull has no
            // volume. Any two further distinct points close a thin simplex.
            let v1 = self.vertex_data[p1];
            let v2 = self.vertex_data[p2];
            let p3 = self
                .vertex_data
                .iter()
                .position(|v| *v != v1 && *v != v2)
                .unwrap_or(p1);
            let v3 = self.vertex_data[p3];
            let p4 = self
                .vertex_data
                .iter()
                .position(|v| *v != v1 && *v != v2 && *v != v3)
                .unwrap_or(p1);
            return MeshBuilder::new(p1, p2, p3, p4);
        }

        // These three points form the base triangle of the tetrahedron.
        debug_assert!(p1 != p3 && p2 != p3);
        let mut base_triangle = [p1, p2, p3];
        let base_vertices = [
            self.vertex_data[base_triangle[0]],
            self.vertex_data[base_triangle[1]],
            self.vertex_data[base_triangle[2]],
        ];

        // The fourth vertex is the point farthest from the base plane.
        let normal = triangle_normal(&base_vertices[0], &base_vertices[1], &base_vertices[2]);
        let base_plane = Plane::new(normal, &base_vertices[0]);
        let mut max_d = self.epsilon;
        let mut max_i = 0usize;
        for (index, point) in self.vertex_data.iter().enumerate() {
            let distance = base_plane.signed_distance(point).abs();
            if distance > max_d {
                max_d = distance;
                max_i = index;
            }
        }
        if max_d == self.epsilon {
            // The cloud lies on a plane. Appending one synthetic point off
            // that plane gives the hull volume; extraction rewrites every
            // reference to it back to vertex 0 afterwards. The cyclic
            // permutation below yields the same normal as `normal`; it only
            // matters that the offset is taken from point 0.
            self.planar = true;
            let n = triangle_normal(&base_vertices[1], &base_vertices[2], &base_vertices[0]);
            let extra_point = self.vertex_data[0] + n;
            self.vertex_data.push(extra_point);
            max_i = self.vertex_data.len() - 1;
        }

        // Enforce counter-clockwise orientation of the base triangle, seen
        // from the apex.
        let base_plane = Plane::new(normal, &base_vertices[0]);
        if base_plane.is_point_on_positive_side(&self.vertex_data[max_i]) {
            base_triangle.swap(0, 1);
        }

        // The apex must end up on the non-positive side of the base triangle
        // so that the seed faces are oriented outward.
        debug_assert!({
            let n = triangle_normal(
                &self.vertex_data[base_triangle[0]],
                &self.vertex_data[base_triangle[1]],
                &self.vertex_data[base_triangle[2]],
            );
            let plane = Plane::new(n, &self.vertex_data[base_triangle[0]]);
            plane.signed_distance(&self.vertex_data[max_i]) <= 0.0
        });

        // Build the seed mesh and compute the plane of each face from its
        // vertex cycle.
        let mut mesh = MeshBuilder::new(
            base_triangle[0],
            base_triangle[1],
            base_triangle[2],
            max_i,
        );
        for i in 0..mesh.facets.len() {
            let v = mesh.vertex_indices_of_facet(i);
            let n = triangle_normal(
                &self.vertex_data[v[0]],
                &self.vertex_data[v[1]],
                &self.vertex_data[v[2]],
            );
            mesh.facets[i].plane = Plane::new(n, &self.vertex_data[v[0]]);
        }

        // Assign each point to the first face accepting it; points on the
        // positive side of no face are interior and never reconsidered. The
        // synthetic planar point, when present, is excluded.
        for point_index in 0..n_vertices {
            for facet_index in 0..mesh.facets.len() {
                if add_point_to_facet(
                    &self.vertex_data,
                    self.epsilon_squared,
                    &mut mesh.facets[facet_index],
                    point_index,
                ) {
                    break;
                }
            }
        }

        mesh
    }
}
