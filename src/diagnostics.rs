//! Per-run diagnostics reported alongside the mirror-line estimate.
//!
//! [`DetectionReport`] is the main entry point returned by the detector,
//! bundling the estimate (or its typed failure) with a [`PipelineTrace`]
//! describing every stage the run executed. Nothing in the trace feeds back
//! into the estimate.

use crate::accumulator::VoteBin;
use crate::error::DetectError;
use crate::types::MirrorLine;
use serde::Serialize;

/// Timing entry describing a single stage of the pipeline.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one estimation run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Input image descriptor.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// One retained correspondence, for inspection only.
///
/// `mirrored` is the partner location after correction back into the
/// original image frame.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDescriptor {
    pub point: [f32; 2],
    pub mirrored: [f32; 2],
    pub distance: u32,
}

/// Feature extraction + matching stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStage {
    pub elapsed_ms: f64,
    pub keypoints: usize,
    pub mirrored_keypoints: usize,
    pub matches: usize,
    /// Best correspondences by ascending distance, capped by the
    /// `top_matches` option.
    pub top_matches: Vec<MatchDescriptor>,
}

/// Voting + accumulation + selection stage summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStage {
    pub elapsed_ms: f64,
    pub votes: usize,
    pub bin_resolution: usize,
    pub nonzero_bins: usize,
    /// Highest-count bins, capped to a small sample.
    pub top_bins: Vec<VoteBin>,
}

/// Structured trace of one estimation run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub matching: Option<MatchStage>,
    pub voting: Option<VotingStage>,
}

/// Estimate + trace bundle returned by the diagnostic entry point.
///
/// Exactly one of `line` and `failure` is set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub line: Option<MirrorLine>,
    pub failure: Option<DetectError>,
    pub trace: PipelineTrace,
}
