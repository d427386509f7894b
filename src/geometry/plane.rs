use crate::math::{Point, Real, Vector};

/// A plane in general position, described by a normal of arbitrary length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// The plane normal. Not necessarily of unit length.
    pub n: Vector<Real>,
    /// Signed distance of the plane from the origin, exact only when `n` is
    /// of unit length.
    pub d: Real,
    /// Squared length of `n`, cached so distance tests can cancel the normal
    /// scale without a square root.
    pub sqr_n_length: Real,
}

impl Plane {
    /// Builds the plane with normal `n` containing the point `p`.
    pub fn new(n: Vector<Real>, p: &Point<Real>) -> Self {
        Self {
            n,
            d: -n.dot(&p.coords),
            sqr_n_length: n.norm_squared(),
        }
    }

    /// The signed distance from `q` to this plane, scaled by the length of
    /// `n`.
    pub fn signed_distance(&self, q: &Point<Real>) -> Real {
        self.n.dot(&q.coords) + self.d
    }

    /// Whether `q` lies on the positive side of this plane (points exactly on
    /// the plane count as positive).
    pub fn is_point_on_positive_side(&self, q: &Point<Real>) -> bool {
        self.signed_distance(q) >= 0.0
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vector::zeros(), &Point::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::Plane;
    use crate::math::{Point, Vector};

    #[test]
    fn signed_distance_scales_with_normal_length() {
        let plane = Plane::new(Vector::new(1.0, 0.0, 0.0), &Point::new(2.0, 0.0, 0.0));
        assert_relative_eq!(plane.signed_distance(&Point::new(3.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(plane.signed_distance(&Point::new(1.0, 0.0, 0.0)), -1.0);

        // Doubling the normal doubles the reported distance.
        let plane = Plane::new(Vector::new(2.0, 0.0, 0.0), &Point::new(2.0, 0.0, 0.0));
        assert_relative_eq!(plane.signed_distance(&Point::new(6.0, 0.0, 0.0)), 8.0);
        assert_relative_eq!(plane.sqr_n_length, 4.0);
    }

    #[test]
    fn points_on_the_plane_are_on_the_positive_side() {
        let plane = Plane::new(Vector::new(0.0, 1.0, 0.0), &Point::new(0.0, 5.0, 0.0));
        assert!(plane.is_point_on_positive_side(&Point::new(10.0, 5.0, -3.0)));
        assert!(plane.is_point_on_positive_side(&Point::new(0.0, 6.0, 0.0)));
        assert!(!plane.is_point_on_positive_side(&Point::new(0.0, 4.0, 0.0)));
    }
}
