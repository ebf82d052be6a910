//! Brute-force binary descriptor matching.

use super::{Descriptor, DescriptorMatcher, FeatureMatch};

/// Exhaustive k-nearest-neighbour matcher over Hamming distance.
///
/// Ties are broken by ascending train index so the ranking is reproducible
/// across runs regardless of descriptor layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct HammingMatcher;

impl DescriptorMatcher for HammingMatcher {
    fn knn_match(
        &self,
        query: &[Descriptor],
        train: &[Descriptor],
        k: usize,
    ) -> Vec<Vec<FeatureMatch>> {
        query
            .iter()
            .enumerate()
            .map(|(query_idx, q)| {
                let mut candidates: Vec<FeatureMatch> = train
                    .iter()
                    .enumerate()
                    .map(|(train_idx, t)| FeatureMatch {
                        query_idx,
                        train_idx,
                        distance: hamming_distance(q, t),
                    })
                    .collect();
                candidates.sort_by(|a, b| {
                    a.distance
                        .cmp(&b.distance)
                        .then_with(|| a.train_idx.cmp(&b.train_idx))
                });
                candidates.truncate(k);
                candidates
            })
            .collect()
    }
}

fn hamming_distance(a: &Descriptor, b: &Descriptor) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}
