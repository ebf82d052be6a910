//! Failure taxonomy of a single estimation run.

use serde::Serialize;
use thiserror::Error;

/// Ways an estimation run can fail to produce a mirror line.
///
/// The estimate is deterministic given fixed inputs, so callers should not
/// retry on failure without changing the input image or options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectError {
    /// The matcher produced zero usable pairs between the image and its
    /// reflection, so the voting stage cannot run.
    #[error("no correspondences between the image and its reflection")]
    NoCorrespondences,
    /// The accumulator was empty, or every bin was degenerate in
    /// non-vertical mode.
    #[error("no valid accumulator peak for a mirror line")]
    NoValidPeak,
}
