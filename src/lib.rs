/*!
quickhull3d
===========

**quickhull3d** computes the convex hull of a 3D point cloud using the
Quickhull algorithm, producing either an indexed triangle mesh or a compacted
half-edge mesh.

The hull is grown from an initial tetrahedron by repeatedly coning the most
distant exterior point over the faces visible from it. All intermediate
topology lives in a single arena ([`mesh`]) whose face and half-edge slots are
recycled through free-lists, so no live index is ever invalidated while the
hull is under construction.

# Example

```
use quickhull3d::convex_hull;
use quickhull3d::math::{Point, Real};

let points: Vec<Point<Real>> = vec![
    Point::new(0.0, 0.0, 0.0),
    Point::new(0.0, 0.0, 1.0),
    Point::new(0.0, 1.0, 0.0),
    Point::new(0.0, 1.0, 1.0),
    Point::new(1.0, 0.0, 0.0),
    Point::new(1.0, 0.0, 1.0),
    Point::new(1.0, 1.0, 0.0),
    Point::new(1.0, 1.0, 1.0),
];

let hull = convex_hull(&points);
assert_eq!(hull.vertices.len(), 8);
assert_eq!(hull.indices.len(), 12);
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[cfg_attr(test, macro_use)]
extern crate approx;
extern crate num_traits as num;
#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod geometry;
pub mod hull;
pub mod math;
pub mod mesh;

pub use crate::hull::{check_hull, ConvexHull, Diagnostics, QuickHull, ValidationError};
pub use crate::mesh::{Face, HalfEdge, HalfEdgeMesh};

use crate::math::{Point, Real, DEFAULT_EPSILON};

/// Computes the convex hull of `points` with the library defaults:
/// counter-clockwise winding, a compacted vertex buffer, and the default
/// tolerance.
pub fn convex_hull(points: &[Point<Real>]) -> ConvexHull {
    QuickHull::new().convex_hull(points, true, false, DEFAULT_EPSILON)
}

/// Computes the convex hull of `points` and returns it as a compacted
/// half-edge mesh.
pub fn convex_hull_as_mesh(points: &[Point<Real>]) -> HalfEdgeMesh {
    QuickHull::new().convex_hull_as_mesh(points, DEFAULT_EPSILON)
}
