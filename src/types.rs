use serde::{Deserialize, Serialize};

/// Mirror axis in polar form: the set of points with `x·cosθ + y·sinθ = r`.
///
/// `theta` is the angle the line's normal makes with the x-axis, in [0, π);
/// `r` is the signed perpendicular distance from the image origin. A
/// left-right mirror axis therefore sits near θ = 0 (or π) with r close to
/// half the image width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MirrorLine {
    pub r: f32,
    pub theta: f32,
}

impl MirrorLine {
    /// Solves the line equation for x at scan row `y`.
    ///
    /// Non-finite for lines parallel to the scan rows (cos θ = 0); callers
    /// rendering the line skip such rows.
    #[inline]
    pub fn x_at_row(&self, y: f32) -> f32 {
        (self.r - y * self.theta.sin()) / self.theta.cos()
    }
}
