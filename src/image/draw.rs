//! Diagnostic rendering onto RGB buffers.
//!
//! Rendering never participates in the estimate; it only annotates a copy of
//! the input for inspection.

use super::RgbImageU8;
use crate::types::MirrorLine;

const LINE_MARK: [u8; 3] = [255, 255, 255];
const POINT_MARK: [u8; 3] = [0, 220, 0];
const MIRROR_MARK: [u8; 3] = [230, 40, 40];

/// Draws `line` by solving x for every scan row.
///
/// Each of the two marker pixels is bounds-checked independently; rows whose
/// solution falls outside the buffer, or is non-finite (lines parallel to
/// the scan rows), are skipped rather than clamped, so a partially visible
/// line degrades to a partial drawing.
pub fn draw_mirror_line(image: &mut RgbImageU8, line: &MirrorLine) {
    let width = image.width() as i64;
    for y in 0..image.height() {
        let x = line.x_at_row(y as f32);
        if !x.is_finite() {
            continue;
        }
        let x = x as i64;
        if (0..width).contains(&x) {
            image.set_pixel(x as usize, y, LINE_MARK);
        }
        if (0..width).contains(&(x + 1)) {
            image.set_pixel((x + 1) as usize, y, LINE_MARK);
        }
    }
}

/// Overlays correspondence pairs: a green dot on the original point, a red
/// dot on its corrected mirror partner and a connecting stroke between them.
pub fn draw_match_markers(image: &mut RgbImageU8, pairs: &[([f32; 2], [f32; 2])]) {
    for &(point, mirrored) in pairs {
        draw_stroke(image, point, mirrored);
        draw_dot(image, point, POINT_MARK);
        draw_dot(image, mirrored, MIRROR_MARK);
    }
}

fn draw_dot(image: &mut RgbImageU8, center: [f32; 2], rgb: [u8; 3]) {
    let cx = center[0].round() as i64;
    let cy = center[1].round() as i64;
    for dy in -1..=1 {
        for dx in -1..=1 {
            put_pixel(image, cx + dx, cy + dy, rgb);
        }
    }
}

fn draw_stroke(image: &mut RgbImageU8, from: [f32; 2], to: [f32; 2]) {
    let steps = (to[0] - from[0])
        .abs()
        .max((to[1] - from[1]).abs())
        .ceil()
        .max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from[0] + (to[0] - from[0]) * t;
        let y = from[1] + (to[1] - from[1]) * t;
        put_pixel(image, x.round() as i64, y.round() as i64, LINE_MARK);
    }
}

#[inline]
fn put_pixel(image: &mut RgbImageU8, x: i64, y: i64, rgb: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as usize) < image.width() && (y as usize) < image.height() {
        image.set_pixel(x as usize, y as usize, rgb);
    }
}
