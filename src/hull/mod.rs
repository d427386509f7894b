//! The Quickhull engine, its output types, and hull validation.

pub use self::convex_hull::ConvexHull;
pub use self::diagnostics::Diagnostics;
pub use self::quick_hull::QuickHull;
pub use self::validation::{check_hull, ValidationError};

mod convex_hull;
mod diagnostics;
mod initial_simplex;
mod quick_hull;
mod validation;
