use quickhull3d::geometry::triangle_normal;
use quickhull3d::math::{Point, Real, Vector};
use quickhull3d::{check_hull, convex_hull, ConvexHull, QuickHull};

fn sorted(mut points: Vec<Point<Real>>) -> Vec<Point<Real>> {
    points.sort_by(|a, b| {
        (a.x, a.y, a.z)
            .partial_cmp(&(b.x, b.y, b.z))
            .expect("NaN in test data")
    });
    points
}

fn assert_same_points(actual: &[Point<Real>], expected: &[Point<Real>]) {
    assert_eq!(sorted(actual.to_vec()), sorted(expected.to_vec()));
}

fn cube_corners(min: Real, max: Real) -> Vec<Point<Real>> {
    let mut corners = Vec::new();
    for &x in &[min, max] {
        for &y in &[min, max] {
            for &z in &[min, max] {
                corners.push(Point::new(x, y, z));
            }
        }
    }
    corners
}

/// The right-handed normal of an output triangle.
fn winding_normal(triangle: &[Point<Real>; 3]) -> Vector<Real> {
    (triangle[1] - triangle[0]).cross(&(triangle[2] - triangle[0]))
}

fn centroid(points: &[Point<Real>]) -> Point<Real> {
    let mut sum = Vector::zeros();
    for point in points {
        sum += point.coords;
    }
    Point::from(sum / points.len() as Real)
}

#[test]
fn cube_with_interior_point() {
    // One point strictly inside a cube must not appear on the hull.
    let mut points = cube_corners(0.0, 10.0);
    points.push(Point::new(5.0, 5.0, 5.0));

    let hull = convex_hull(&points);
    assert_eq!(hull.vertices.len(), 8);
    assert_eq!(hull.indices.len(), 12);
    assert_same_points(&hull.vertices, &cube_corners(0.0, 10.0));
    check_hull(&hull.vertices, &hull.indices).expect("the cube hull must be closed");
}

#[test]
fn square_in_a_plane() {
    // All points lie on the plane z = 1. The point on the border of the
    // square and the one inside it are both excluded from the hull.
    let points = vec![
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.0, 5.0, 1.0),
        Point::new(0.0, 10.0, 1.0),
        Point::new(10.0, 0.0, 1.0),
        Point::new(10.0, 10.0, 1.0),
        Point::new(5.0, 5.0, 1.0),
    ];

    let expected = vec![
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.0, 10.0, 1.0),
        Point::new(10.0, 0.0, 1.0),
        Point::new(10.0, 10.0, 1.0),
    ];

    let hull = convex_hull(&points);
    assert_same_points(&hull.vertices, &expected);
}

#[test]
fn triangle_in_a_plane() {
    let points = vec![
        Point::new(1.0, 2.0, 1.0),
        Point::new(4.0, 7.0, 1.0),
        Point::new(7.0, 2.0, 1.0),
        Point::new(4.0, 4.0, 1.0), // Inside the triangle.
    ];

    let expected = vec![
        Point::new(1.0, 2.0, 1.0),
        Point::new(4.0, 7.0, 1.0),
        Point::new(7.0, 2.0, 1.0),
    ];

    let hull = convex_hull(&points);
    assert_same_points(&hull.vertices, &expected);
}

#[test]
fn empty_input_yields_an_empty_hull() {
    let hull = convex_hull(&[]);
    assert!(hull.vertices.is_empty());
    assert!(hull.indices.is_empty());
    assert!(hull.triangles().is_empty());
}

#[test]
fn hull_vertices_are_a_subset_of_the_input() {
    let mut points = cube_corners(-3.0, 4.0);
    points.push(Point::new(0.5, -0.25, 1.0));
    points.push(Point::new(1.0, 1.0, 1.0));

    let hull = convex_hull(&points);
    for vertex in &hull.vertices {
        assert!(points.contains(vertex));
    }
}

#[test]
fn every_input_point_lies_inside_the_hull() {
    let mut points = cube_corners(0.0, 10.0);
    points.push(Point::new(5.0, 5.0, 5.0));
    points.push(Point::new(1.0, 9.0, 3.0));

    // The clockwise output winds every triangle so that its right-handed
    // normal points out of the hull.
    let hull = QuickHull::new().convex_hull(&points, false, false, 0.0);
    for triangle in hull.triangles() {
        let normal = winding_normal(&triangle);
        for point in &points {
            let distance = normal.dot(&(point - triangle[0]));
            assert!(
                distance <= 1.0e-7 * normal.norm(),
                "point {point} is outside the hull"
            );
        }
    }
}

#[test]
fn winding_flag_orients_triangles() {
    let points = cube_corners(-1.0, 1.0);
    let hull = QuickHull::new().convex_hull(&points, false, false, 0.0);
    let hull_center = centroid(&hull.vertices);

    for triangle in hull.triangles() {
        let normal = winding_normal(&triangle);
        let outward = centroid(&triangle) - hull_center;
        assert!(normal.dot(&outward) > 0.0);
    }

    let hull = QuickHull::new().convex_hull(&points, true, false, 0.0);
    for triangle in hull.triangles() {
        let normal = winding_normal(&triangle);
        let outward = centroid(&triangle) - hull_center;
        assert!(normal.dot(&outward) < 0.0);
    }
}

#[test]
fn winding_toggle_reverses_every_triangle() {
    let mut points = cube_corners(0.0, 2.0);
    points.push(Point::new(1.0, 1.0, 1.0));

    let mut quick_hull = QuickHull::new();
    let ccw: ConvexHull = quick_hull.convex_hull(&points, true, false, 0.0);
    let cw: ConvexHull = quick_hull.convex_hull(&points, false, false, 0.0);

    assert_eq!(ccw.vertices, cw.vertices);
    assert_eq!(ccw.indices.len(), cw.indices.len());
    for (forward, backward) in ccw.indices.iter().zip(cw.indices.iter()) {
        assert_eq!(forward[0], backward[0]);
        assert_eq!(forward[1], backward[2]);
        assert_eq!(forward[2], backward[1]);
    }
}

#[test]
fn index_modes_produce_congruent_triangles() {
    let mut points = cube_corners(0.0, 1.0);
    points.push(Point::new(0.5, 0.5, 0.5));

    let mut quick_hull = QuickHull::new();
    let compacted = quick_hull.convex_hull(&points, true, false, 0.0);
    let original = quick_hull.convex_hull(&points, true, true, 0.0);

    // With original indices the vertex buffer is the input cloud itself.
    assert_eq!(original.vertices, points);
    assert_eq!(compacted.vertices.len(), 8);

    // Both modes resolve to the same triangles in the same order.
    assert_eq!(compacted.triangles(), original.triangles());
}

#[test]
fn triangles_resolves_the_index_buffer() {
    let points = cube_corners(0.0, 1.0);
    let hull = convex_hull(&points);

    let triangles = hull.triangles();
    assert_eq!(triangles.len(), hull.indices.len());
    for (triangle, indices) in triangles.iter().zip(hull.indices.iter()) {
        for i in 0..3 {
            assert_eq!(triangle[i], hull.vertices[indices[i] as usize]);
        }
    }
}

#[test]
fn hull_of_a_tetrahedron_keeps_every_face() {
    let points = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(4.0, 0.0, 0.0),
        Point::new(0.0, 4.0, 0.0),
        Point::new(0.0, 0.0, 4.0),
    ];

    let hull = convex_hull(&points);
    assert_eq!(hull.vertices.len(), 4);
    assert_eq!(hull.indices.len(), 4);
    check_hull(&hull.vertices, &hull.indices).expect("the tetrahedron hull must be closed");
}

#[test]
fn emitted_winding_matches_the_triangle_normal_convention() {
    // The winding of the non-ccw output reproduces the internal face cycles,
    // whose normals are computed with `triangle_normal`.
    let points = cube_corners(0.0, 1.0);
    let hull = QuickHull::new().convex_hull(&points, false, false, 0.0);
    let hull_center = centroid(&hull.vertices);

    for triangle in hull.triangles() {
        let n = triangle_normal(&triangle[0], &triangle[1], &triangle[2]);
        let outward = centroid(&triangle) - hull_center;
        assert!(n.dot(&outward) > 0.0);
    }
}

#[test]
fn diagnostics_are_clean_on_well_behaved_input() {
    let mut quick_hull = QuickHull::new();
    let _ = quick_hull.convex_hull(&cube_corners(0.0, 1.0), true, false, 0.0);
    assert_eq!(quick_hull.diagnostics().failed_horizon_edges, 0);
}
