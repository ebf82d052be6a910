//! Peak selection over ranked accumulator bins.

use crate::accumulator::VoteBin;
use crate::error::DetectError;
use crate::types::MirrorLine;
use log::warn;
use std::f32::consts::PI;

/// Vertical-mode diagnostic tolerance around the vertical-mirror angles.
const VERTICAL_TOL_RAD: f32 = 0.175; // ~10°

/// Picks the winning bin from a count-ranked list.
///
/// In vertical-only mode the first bin wins unconditionally; a warning is
/// logged when its angle strays from the vertical-mirror angles {0, π},
/// since that usually means the flag was asserted on the wrong image.
///
/// Otherwise bins whose center angle sits exactly on 0 or π are skipped:
/// such bins only arise from degenerate vote layouts (every pair exactly
/// horizontal, typically self-matches) rather than from a real symmetry
/// signal. When every bin is degenerate, or the list is empty, there is no
/// peak to report.
pub fn select_peak(ranked: &[VoteBin], vertical_only: bool) -> Result<MirrorLine, DetectError> {
    if vertical_only {
        let best = ranked.first().ok_or(DetectError::NoValidPeak)?;
        let off_axis = best.theta.min(PI - best.theta);
        if off_axis > VERTICAL_TOL_RAD {
            warn!(
                "vertical mode picked a bin far from a vertical axis: r={:.2} theta={:.4}",
                best.r, best.theta
            );
        }
        return Ok(MirrorLine {
            r: best.r,
            theta: best.theta,
        });
    }

    ranked
        .iter()
        .find(|bin| bin.theta != 0.0 && bin.theta != PI)
        .map(|bin| MirrorLine {
            r: bin.r,
            theta: bin.theta,
        })
        .ok_or(DetectError::NoValidPeak)
}
