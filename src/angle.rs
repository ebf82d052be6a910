//! Angle utilities used across the voting pipeline.

use nalgebra::Point2;

/// Computes the angle the segment joining `p` and `q` subtends with the
/// x-axis, folded into [0, π).
///
/// A vertically aligned pair (Δx = 0) maps to exactly π/2 without ever
/// dividing. Otherwise the raw arctangent of Δy/Δx is shifted by +π when
/// negative; a line rotated by 180° is the same undirected line, so the
/// fold discards the sign ambiguity.
#[inline]
pub fn angle_with_x_axis(p: Point2<f32>, q: Point2<f32>) -> f32 {
    let delta = p - q;
    if delta.x == 0.0 {
        return std::f32::consts::FRAC_PI_2;
    }
    let angle = (delta.y / delta.x).atan();
    if angle < 0.0 {
        angle + std::f32::consts::PI
    } else {
        angle
    }
}

/// Reflects a keypoint orientation given in degrees about the vertical axis,
/// returning radians in [0, 2π).
#[inline]
pub fn reflect_orientation_deg(angle_deg: f32) -> f32 {
    let reflected = std::f32::consts::PI - angle_deg.to_radians();
    if reflected < 0.0 {
        reflected + 2.0 * std::f32::consts::PI
    } else {
        reflected
    }
}
