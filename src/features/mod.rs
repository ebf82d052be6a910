//! Feature boundary: keypoints, descriptors and the capability traits the
//! estimator is parameterized over.
//!
//! The estimator never talks to a concrete extractor or matcher; it receives
//! both as injected capabilities, which keeps every estimation run reentrant
//! and testable with fakes. [`OrbExtractor`] and [`HammingMatcher`] are the
//! built-in implementations used by the CLI.

mod matcher;
mod orb;

pub use matcher::HammingMatcher;
pub use orb::{OrbExtractor, OrbOptions};

use crate::image::GrayImageU8;
use nalgebra::Point2;

/// 256-bit binary descriptor stored as 32 bytes.
pub type Descriptor = [u8; 32];

/// Salient point with an orientation, in image pixel space.
#[derive(Clone, Copy, Debug)]
pub struct KeyPoint {
    pub location: Point2<f32>,
    /// Orientation in degrees, [0, 360).
    pub angle_deg: f32,
}

/// Keypoint together with its descriptor.
#[derive(Clone, Copy, Debug)]
pub struct Feature {
    pub keypoint: KeyPoint,
    pub descriptor: Descriptor,
}

/// Candidate correspondence between a query and a train feature.
#[derive(Clone, Copy, Debug)]
pub struct FeatureMatch {
    pub query_idx: usize,
    pub train_idx: usize,
    /// Descriptor distance, lower is better.
    pub distance: u32,
}

/// Capability: detect salient points with orientations and descriptors.
pub trait FeatureExtractor {
    fn extract(&self, image: &GrayImageU8) -> Vec<Feature>;
}

/// Capability: rank candidate correspondences between two descriptor sets.
pub trait DescriptorMatcher {
    /// For every query descriptor, the `k` nearest train descriptors ordered
    /// by ascending distance. An entry holds fewer than `k` matches when the
    /// train set is smaller than `k`.
    fn knn_match(
        &self,
        query: &[Descriptor],
        train: &[Descriptor],
        k: usize,
    ) -> Vec<Vec<FeatureMatch>>;
}
