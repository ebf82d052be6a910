#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// “Expert” modules – still public, but considered unstable internals.
pub mod accumulator;
pub mod angle;
pub mod features;
pub mod geometry;
pub mod peaks;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorOptions, MirrorDetector};
pub use crate::error::DetectError;
pub use crate::types::MirrorLine;

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use mirror_detector::prelude::*;
///
/// # fn main() {
/// let rgb = vec![255u8; 64 * 48 * 3];
/// let image = RgbImageU8::new(64, 48, rgb);
///
/// let detector = MirrorDetector::new(DetectorOptions::default());
/// match detector.detect(&image) {
///     Ok(line) => println!("r={:.1} theta={:.4}", line.r, line.theta),
///     Err(err) => println!("failed: {err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RgbImageU8;
    pub use crate::{DetectError, DetectorOptions, MirrorDetector, MirrorLine};
}
