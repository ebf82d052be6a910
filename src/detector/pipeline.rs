//! Estimation pipeline driving mirror-line detection end-to-end.
//!
//! The [`MirrorDetector`] exposes a simple API: feed a canonical-RGB image
//! and get the mirror line (or a typed failure) plus detailed diagnostics.
//! Internally it coordinates horizontal mirroring, feature extraction on
//! both sides, descriptor matching, per-pair voting, histogram accumulation
//! and peak selection.
//!
//! Typical usage:
//! ```no_run
//! use mirror_detector::image::RgbImageU8;
//! use mirror_detector::{DetectorOptions, MirrorDetector};
//!
//! # fn example(image: RgbImageU8) {
//! let detector = MirrorDetector::new(DetectorOptions::default());
//! let report = detector.detect_with_diagnostics(&image);
//! if let Some(line) = report.line {
//!     println!("r={:.1} theta={:.4}", line.r, line.theta);
//! }
//! # }
//! ```

use super::options::DetectorOptions;
use crate::accumulator::VoteHistogram;
use crate::diagnostics::{
    DetectionReport, InputDescriptor, MatchDescriptor, MatchStage, PipelineTrace, TimingBreakdown,
    VotingStage,
};
use crate::error::DetectError;
use crate::features::{
    Descriptor, DescriptorMatcher, FeatureExtractor, FeatureMatch, HammingMatcher, KeyPoint,
    OrbExtractor,
};
use crate::geometry::{unflip_keypoint, vote_for_pair, Vote};
use crate::image::RgbImageU8;
use crate::peaks::select_peak;
use crate::types::MirrorLine;
use log::debug;
use std::time::Instant;

/// Ranked bins recorded in the diagnostic trace.
const TOP_BIN_SAMPLE: usize = 8;

/// Mirror-line estimator orchestrating mirroring, feature matching, polar
/// voting and peak selection.
pub struct MirrorDetector {
    options: DetectorOptions,
    extractor: Box<dyn FeatureExtractor>,
    matcher: Box<dyn DescriptorMatcher>,
}

impl MirrorDetector {
    /// Creates a detector with the built-in extractor and matcher.
    pub fn new(options: DetectorOptions) -> Self {
        Self::with_components(
            options,
            Box::new(OrbExtractor::default()),
            Box::new(HammingMatcher),
        )
    }

    /// Creates a detector with injected extraction/matching capabilities.
    pub fn with_components(
        options: DetectorOptions,
        extractor: Box<dyn FeatureExtractor>,
        matcher: Box<dyn DescriptorMatcher>,
    ) -> Self {
        Self {
            options,
            extractor,
            matcher,
        }
    }

    /// Runs the estimator, returning only the line.
    pub fn detect(&self, image: &RgbImageU8) -> Result<MirrorLine, DetectError> {
        let report = self.detect_with_diagnostics(image);
        report
            .line
            .ok_or_else(|| report.failure.unwrap_or(DetectError::NoValidPeak))
    }

    /// Runs the estimator and reports the full pipeline trace.
    pub fn detect_with_diagnostics(&self, image: &RgbImageU8) -> DetectionReport {
        let (width, height) = (image.width(), image.height());
        debug!("MirrorDetector::detect start w={} h={}", width, height);
        let total_start = Instant::now();

        // Mirror + extract keypoints and descriptors on both sides.
        let extract_start = Instant::now();
        let mirrored_image = image.flip_horizontal();
        let features = self.extractor.extract(&image.to_gray());
        let mirrored_features = self.extractor.extract(&mirrored_image.to_gray());
        let extract_ms = extract_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "MirrorDetector::detect keypoints={} mirrored_keypoints={}",
            features.len(),
            mirrored_features.len()
        );

        // Match the two descriptor sets, keeping the nearest neighbour of
        // each k = 2 pair, ordered by ascending distance.
        let match_start = Instant::now();
        let query: Vec<Descriptor> = features.iter().map(|f| f.descriptor).collect();
        let train: Vec<Descriptor> = mirrored_features.iter().map(|f| f.descriptor).collect();
        let mut matches: Vec<FeatureMatch> = self
            .matcher
            .knn_match(&query, &train, 2)
            .into_iter()
            .filter_map(|list| list.into_iter().next())
            .collect();
        matches.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.query_idx.cmp(&b.query_idx))
        });
        let match_ms = match_start.elapsed().as_secs_f64() * 1000.0;

        // Correspondences with the partner corrected back into the original
        // frame. The corrected keypoint is a new value; extractor output is
        // never mutated.
        let pairs: Vec<(KeyPoint, KeyPoint, u32)> = matches
            .iter()
            .map(|m| {
                let point = features[m.query_idx].keypoint;
                let mirrored =
                    unflip_keypoint(&mirrored_features[m.train_idx].keypoint, width as f32);
                (point, mirrored, m.distance)
            })
            .collect();

        let top_matches: Vec<MatchDescriptor> = pairs
            .iter()
            .take(self.options.top_matches)
            .map(|(point, mirrored, distance)| MatchDescriptor {
                point: [point.location.x, point.location.y],
                mirrored: [mirrored.location.x, mirrored.location.y],
                distance: *distance,
            })
            .collect();
        let match_stage = MatchStage {
            elapsed_ms: match_ms,
            keypoints: features.len(),
            mirrored_keypoints: mirrored_features.len(),
            matches: pairs.len(),
            top_matches,
        };

        let mut timings = TimingBreakdown::default();
        timings.push("features", extract_ms);
        timings.push("matching", match_ms);

        if pairs.is_empty() {
            debug!("MirrorDetector::detect no correspondences -> giving up");
            timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
            return DetectionReport {
                line: None,
                failure: Some(DetectError::NoCorrespondences),
                trace: PipelineTrace {
                    input: InputDescriptor { width, height },
                    timings,
                    matching: Some(match_stage),
                    voting: None,
                },
            };
        }

        // One polar vote per correspondence, then histogram + selection.
        let vote_start = Instant::now();
        let votes: Vec<Vote> = pairs
            .iter()
            .map(|(point, mirrored, _)| vote_for_pair(point, mirrored))
            .collect();
        let histogram = VoteHistogram::from_votes(&votes, self.options.histogram_bins);
        let selection = select_peak(histogram.ranked(), self.options.vertical_only);
        let vote_ms = vote_start.elapsed().as_secs_f64() * 1000.0;

        let voting_stage = VotingStage {
            elapsed_ms: vote_ms,
            votes: votes.len(),
            bin_resolution: self.options.histogram_bins,
            nonzero_bins: histogram.nonzero_bins(),
            top_bins: histogram.ranked().iter().take(TOP_BIN_SAMPLE).copied().collect(),
        };
        timings.push("voting", vote_ms);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        let (line, failure) = match selection {
            Ok(line) => {
                debug!(
                    "MirrorDetector::detect done r={:.2} theta={:.4} votes={} latency_ms={:.3}",
                    line.r,
                    line.theta,
                    votes.len(),
                    timings.total_ms
                );
                (Some(line), None)
            }
            Err(err) => {
                debug!("MirrorDetector::detect failed: {err}");
                (None, Some(err))
            }
        };

        DetectionReport {
            line,
            failure,
            trace: PipelineTrace {
                input: InputDescriptor { width, height },
                timings,
                matching: Some(match_stage),
                voting: Some(voting_stage),
            },
        }
    }
}
