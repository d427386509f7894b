/// Counters exposing the numerical health of a hull computation.
///
/// The counters are reset at the start of every build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// How many times the horizon edge loop could not be reconstructed.
    ///
    /// Each failure makes the computation skip the offending point: the hull
    /// stays a valid closed mesh but may not contain that point.
    pub failed_horizon_edges: usize,
}
