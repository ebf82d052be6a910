//! Parameter types configuring the estimator.
//!
//! Defaults mirror the reference behaviour: a 200×200 accumulator and the
//! general (non-vertical) selection policy.

use serde::Deserialize;

/// Estimator-wide options.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    /// Trust the top-ranked accumulator bin unconditionally. For images whose
    /// mirror axis is known to be vertical, where the exactly-degenerate bins
    /// carry the true signal.
    pub vertical_only: bool,
    /// Number of best correspondences retained in the diagnostic trace.
    /// Never affects the estimate.
    pub top_matches: usize,
    /// Per-axis resolution of the vote accumulator.
    pub histogram_bins: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            vertical_only: false,
            top_matches: 10,
            histogram_bins: 200,
        }
    }
}
