//! Correspondence geometry: converts one matched point-pair into a polar
//! vote for the mirror line.
//!
//! All functions are pure; the keypoint detected on the flipped image is
//! never mutated, a corrected copy is produced instead.

use crate::angle::{angle_with_x_axis, reflect_orientation_deg};
use crate::features::KeyPoint;
use nalgebra::Point2;

/// One candidate mirror line in polar form, `x·cosθ + y·sinθ = r`,
/// with θ in [0, π) by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vote {
    pub r: f32,
    pub theta: f32,
}

/// Reinterprets a keypoint detected on the horizontally flipped image as if
/// it had originated on a true mirror reflection: the x-coordinate is
/// mirrored back across the flipped buffer width and the orientation is
/// reflected about the vertical axis.
pub fn unflip_keypoint(kp: &KeyPoint, flipped_width: f32) -> KeyPoint {
    KeyPoint {
        location: Point2::new(flipped_width - kp.location.x, kp.location.y),
        angle_deg: reflect_orientation_deg(kp.angle_deg).to_degrees(),
    }
}

/// Midpoint of two image-space points.
#[inline]
pub fn midpoint(p: Point2<f32>, q: Point2<f32>) -> Point2<f32> {
    Point2::new((p.x + q.x) * 0.5, (p.y + q.y) * 0.5)
}

/// Computes the vote cast by one correspondence: `point` from the original
/// image and `mirrored` already corrected via [`unflip_keypoint`].
///
/// The vote line passes through the pair midpoint with its normal along the
/// pair direction. Never fails; the vertically aligned case bypasses the
/// arctangent entirely.
pub fn vote_for_pair(point: &KeyPoint, mirrored: &KeyPoint) -> Vote {
    let theta = angle_with_x_axis(point.location, mirrored.location);
    let mid = midpoint(point.location, mirrored.location);
    let r = mid.x * theta.cos() + mid.y * theta.sin();
    Vote { r, theta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn keypoint(x: f32, y: f32, angle_deg: f32) -> KeyPoint {
        KeyPoint {
            location: Point2::new(x, y),
            angle_deg,
        }
    }

    #[test]
    fn midpoint_is_symmetric() {
        let p = Point2::new(10.0, 40.0);
        let q = Point2::new(-6.0, 12.0);
        assert_eq!(midpoint(p, q), midpoint(q, p));
        assert_eq!(midpoint(p, q), Point2::new(2.0, 26.0));
    }

    #[test]
    fn double_reflection_restores_x() {
        let kp = keypoint(123.5, 88.0, 0.0);
        let width = 640.0;
        let twice = unflip_keypoint(&unflip_keypoint(&kp, width), width);
        assert_eq!(twice.location.x, kp.location.x);
        assert_eq!(twice.location.y, kp.location.y);
    }

    #[test]
    fn unflip_mirrors_x_and_keeps_y() {
        let kp = keypoint(100.0, 57.0, 30.0);
        let corrected = unflip_keypoint(&kp, 640.0);
        assert_eq!(corrected.location.x, 540.0);
        assert_eq!(corrected.location.y, 57.0);
    }

    #[test]
    fn unflip_reflects_orientation() {
        // 30° reflects to 150°; 300° reflects to 240°.
        let corrected = unflip_keypoint(&keypoint(0.0, 0.0, 30.0), 100.0);
        assert!((corrected.angle_deg - 150.0).abs() < 1e-3);
        let corrected = unflip_keypoint(&keypoint(0.0, 0.0, 300.0), 100.0);
        assert!((corrected.angle_deg - 240.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_pair_votes_for_vertical_axis() {
        // Pair symmetric about x = 320: normal along x, r at the midpoint.
        let vote = vote_for_pair(&keypoint(100.0, 50.0, 0.0), &keypoint(540.0, 50.0, 0.0));
        assert_eq!(vote.theta, 0.0);
        assert_eq!(vote.r, 320.0);
    }

    #[test]
    fn coincident_pair_votes_half_pi() {
        // Δx = 0 must bypass the arctangent and pin θ to π/2 exactly.
        let vote = vote_for_pair(&keypoint(200.0, 120.0, 0.0), &keypoint(200.0, 120.0, 0.0));
        assert_eq!(vote.theta, FRAC_PI_2);
        assert!((vote.r - 120.0).abs() < 1e-4);
    }

    #[test]
    fn vote_theta_always_in_half_open_range() {
        let pairs = [
            ((0.0, 0.0), (10.0, 3.0)),
            ((0.0, 3.0), (10.0, 0.0)),
            ((5.0, 5.0), (5.0, 25.0)),
            ((9.0, 2.0), (1.0, 2.0)),
        ];
        for ((ax, ay), (bx, by)) in pairs {
            let vote = vote_for_pair(&keypoint(ax, ay, 0.0), &keypoint(bx, by, 0.0));
            assert!(
                (0.0..std::f32::consts::PI).contains(&vote.theta),
                "theta={}",
                vote.theta
            );
        }
    }
}
