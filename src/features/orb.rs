//! Built-in ORB-style feature extractor.
//!
//! FAST-9 corner detection, intensity-centroid orientation and a rotated
//! 256-bit binary test pattern. Single scale: the estimator compares an image
//! against its own reflection, so the two sides share scale by construction.

use super::{Descriptor, Feature, FeatureExtractor, KeyPoint};
use crate::image::GrayImageU8;
use nalgebra::Point2;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Bresenham circle of radius 3 used by the FAST segment test.
const RING: [(i32, i32); 16] = [
    (0, -3),
    (1, -3),
    (2, -2),
    (3, -1),
    (3, 0),
    (3, 1),
    (2, 2),
    (1, 3),
    (0, 3),
    (-1, 3),
    (-2, 2),
    (-3, 1),
    (-3, 0),
    (-3, -1),
    (-2, -2),
    (-1, -3),
];

/// Consecutive ring pixels required to accept a corner.
const FAST_ARC: usize = 9;

/// Half-extent of the binary test pattern; rotated samples stay inside the
/// patch radius for any orientation.
const PATTERN_SPREAD: i32 = 10;

/// Knobs for the built-in extractor.
#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(default)]
pub struct OrbOptions {
    /// Minimum intensity offset for the FAST segment test.
    pub fast_threshold: u8,
    /// Cap on keypoints kept after non-maximum suppression.
    pub max_keypoints: usize,
    /// Suppression cell size in pixels.
    pub nms_radius: f32,
    /// Support radius for orientation and descriptor sampling.
    pub patch_radius: i32,
}

impl Default for OrbOptions {
    fn default() -> Self {
        Self {
            fast_threshold: 20,
            max_keypoints: 500,
            nms_radius: 5.0,
            patch_radius: 15,
        }
    }
}

/// FAST + oriented binary descriptors over a single scale.
#[derive(Clone, Debug)]
pub struct OrbExtractor {
    options: OrbOptions,
    pattern: Vec<(i32, i32, i32, i32)>,
}

impl Default for OrbExtractor {
    fn default() -> Self {
        Self::new(OrbOptions::default())
    }
}

struct Corner {
    x: usize,
    y: usize,
    response: f32,
}

impl OrbExtractor {
    pub fn new(options: OrbOptions) -> Self {
        OrbExtractor {
            options,
            pattern: build_test_pattern(),
        }
    }

    fn detect_corners(&self, image: &GrayImageU8, margin: usize) -> Vec<Corner> {
        let threshold = self.options.fast_threshold;
        (margin..image.height() - margin)
            .into_par_iter()
            .flat_map_iter(|y| {
                (margin..image.width() - margin).filter_map(move |x| {
                    let center = image.get(x, y);
                    corner_response(image, x, y, center, threshold)
                        .map(|response| Corner { x, y, response })
                })
            })
            .collect()
    }

    /// Grid-based non-maximum suppression keeping the strongest corners.
    fn suppress(&self, mut corners: Vec<Corner>) -> Vec<Corner> {
        corners.sort_by(|a, b| {
            b.response
                .partial_cmp(&a.response)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (a.y, a.x).cmp(&(b.y, b.x)))
        });

        let cell = self.options.nms_radius.max(1.0);
        let mut occupied = HashSet::new();
        let mut kept = Vec::new();
        for corner in corners {
            let gx = (corner.x as f32 / cell) as i32;
            let gy = (corner.y as f32 / cell) as i32;
            let mut free = true;
            'scan: for dy in -1..=1 {
                for dx in -1..=1 {
                    if occupied.contains(&(gx + dx, gy + dy)) {
                        free = false;
                        break 'scan;
                    }
                }
            }
            if free {
                occupied.insert((gx, gy));
                kept.push(corner);
                if kept.len() >= self.options.max_keypoints {
                    break;
                }
            }
        }
        kept
    }

    /// Orientation from the intensity centroid of the support disc, degrees
    /// in [0, 360).
    fn orientation_deg(&self, image: &GrayImageU8, x: usize, y: usize) -> f32 {
        let radius = self.options.patch_radius;
        let mut m10 = 0.0f32;
        let mut m01 = 0.0f32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let px = x as i32 + dx;
                let py = y as i32 + dy;
                if px < 0 || py < 0 || px >= image.width() as i32 || py >= image.height() as i32 {
                    continue;
                }
                let value = image.get(px as usize, py as usize) as f32;
                m10 += value * dx as f32;
                m01 += value * dy as f32;
            }
        }
        let mut angle = m01.atan2(m10).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        // A tiny negative can round up to a full turn after the shift.
        if angle >= 360.0 {
            angle = 0.0;
        }
        angle
    }

    /// Binary descriptor with the test pattern steered by the orientation.
    fn describe(&self, image: &GrayImageU8, x: usize, y: usize, angle_deg: f32) -> Descriptor {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let sample = |dx: i32, dy: i32| -> u8 {
            let rx = (dx as f32 * cos - dy as f32 * sin).round() as i32;
            let ry = (dx as f32 * sin + dy as f32 * cos).round() as i32;
            let px = (x as i32 + rx).clamp(0, image.width() as i32 - 1);
            let py = (y as i32 + ry).clamp(0, image.height() as i32 - 1);
            image.get(px as usize, py as usize)
        };

        let mut descriptor = [0u8; 32];
        for (bit, &(ax, ay, bx, by)) in self.pattern.iter().enumerate() {
            if sample(ax, ay) < sample(bx, by) {
                descriptor[bit / 8] |= 1 << (bit % 8);
            }
        }
        descriptor
    }
}

impl FeatureExtractor for OrbExtractor {
    fn extract(&self, image: &GrayImageU8) -> Vec<Feature> {
        let margin = (self.options.patch_radius.max(3) + 1) as usize;
        if image.width() <= 2 * margin || image.height() <= 2 * margin {
            return Vec::new();
        }

        let corners = self.detect_corners(image, margin);
        let kept = self.suppress(corners);

        kept.par_iter()
            .map(|corner| {
                let angle_deg = self.orientation_deg(image, corner.x, corner.y);
                let descriptor = self.describe(image, corner.x, corner.y, angle_deg);
                Feature {
                    keypoint: KeyPoint {
                        location: Point2::new(corner.x as f32, corner.y as f32),
                        angle_deg,
                    },
                    descriptor,
                }
            })
            .collect()
    }
}

/// FAST-9 segment test. Returns the corner response (summed absolute ring
/// contrast) when a long-enough bright or dark arc exists.
fn corner_response(
    image: &GrayImageU8,
    x: usize,
    y: usize,
    center: u8,
    threshold: u8,
) -> Option<f32> {
    let bright = center.saturating_add(threshold);
    let dark = center.saturating_sub(threshold);

    let mut ring = [0u8; 16];
    for (i, &(dx, dy)) in RING.iter().enumerate() {
        ring[i] = image.get((x as i32 + dx) as usize, (y as i32 + dy) as usize);
    }

    let mut bright_run = 0usize;
    let mut dark_run = 0usize;
    let mut max_bright = 0usize;
    let mut max_dark = 0usize;
    // Walk the ring twice so arcs crossing the seam are counted.
    for i in 0..RING.len() * 2 {
        let value = ring[i % RING.len()];
        if value > bright {
            bright_run += 1;
            dark_run = 0;
            max_bright = max_bright.max(bright_run);
        } else if value < dark {
            dark_run += 1;
            bright_run = 0;
            max_dark = max_dark.max(dark_run);
        } else {
            bright_run = 0;
            dark_run = 0;
        }
    }

    if max_bright < FAST_ARC && max_dark < FAST_ARC {
        return None;
    }
    let response: u32 = ring
        .iter()
        .map(|&v| (v as i32 - center as i32).unsigned_abs())
        .sum();
    Some(response as f32)
}

/// Deterministic pseudo-random test pattern, fixed across runs and builds.
fn build_test_pattern() -> Vec<(i32, i32, i32, i32)> {
    let mut state = 0x9e37_79b9u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state % (2 * PATTERN_SPREAD as u32 + 1)) as i32 - PATTERN_SPREAD
    };
    (0..256).map(|_| (next(), next(), next(), next())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image(size: usize, x0: usize, y0: usize, side: usize) -> GrayImageU8 {
        let mut data = vec![255u8; size * size];
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                data[y * size + x] = 0;
            }
        }
        GrayImageU8::new(size, size, data)
    }

    #[test]
    fn square_corners_are_detected() {
        let image = square_image(200, 60, 60, 40);
        let features = OrbExtractor::default().extract(&image);
        assert!(!features.is_empty(), "expected corners on a solid square");

        let expected = [(60.0, 60.0), (99.0, 60.0), (60.0, 99.0), (99.0, 99.0)];
        for (cx, cy) in expected {
            let hit = features.iter().any(|f| {
                let p = f.keypoint.location;
                (p.x - cx).abs() <= 5.0 && (p.y - cy).abs() <= 5.0
            });
            assert!(hit, "no keypoint near square corner ({cx}, {cy})");
        }
    }

    #[test]
    fn blank_image_has_no_features() {
        let image = GrayImageU8::new(128, 128, vec![200u8; 128 * 128]);
        let features = OrbExtractor::default().extract(&image);
        assert!(features.is_empty());
    }

    #[test]
    fn orientation_stays_in_range() {
        let image = square_image(200, 60, 60, 40);
        for feature in OrbExtractor::default().extract(&image) {
            let angle = feature.keypoint.angle_deg;
            assert!((0.0..360.0).contains(&angle), "angle={angle}");
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let image = square_image(200, 48, 72, 32);
        let extractor = OrbExtractor::default();
        let first = extractor.extract(&image);
        let second = extractor.extract(&image);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.keypoint.location, b.keypoint.location);
            assert_eq!(a.descriptor, b.descriptor);
        }
    }

    #[test]
    fn test_pattern_is_bounded() {
        for (ax, ay, bx, by) in build_test_pattern() {
            for v in [ax, ay, bx, by] {
                assert!(v.abs() <= PATTERN_SPREAD);
            }
        }
    }
}
