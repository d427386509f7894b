//! Aliases for the scalar and algebra types used throughout this crate.

pub use na::{Point3, Vector3};

/// The scalar type used throughout this crate.
pub use f64 as Real;

/// The point type.
pub use Point3 as Point;

/// The vector type.
pub use Vector3 as Vector;

/// The relative tolerance used by the hull computation when the caller does
/// not provide one. The working tolerance is this value multiplied by the
/// scale of the point cloud.
pub const DEFAULT_EPSILON: Real = 1.0e-4;
