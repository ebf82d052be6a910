//! Histogram voting over the (r, θ) vote space.

use crate::geometry::Vote;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One non-empty accumulator cell, addressed by its center coordinates.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBin {
    pub r: f32,
    pub theta: f32,
    pub count: u32,
}

/// 2D histogram over polar votes with a fixed per-axis resolution.
///
/// Binning is rectangular and deterministic: each axis spans the observed
/// min..max of the votes it received, divided into `bins` equal cells. An
/// axis with a single observed value collapses to one cell centered exactly
/// on that value. Zero-count cells are never materialized, so the ranked
/// output always sums to the number of input votes.
///
/// Ranking is count descending; ties are broken by ascending θ, then
/// ascending r, making the order reproducible across runs.
#[derive(Clone, Debug)]
pub struct VoteHistogram {
    ranked: Vec<VoteBin>,
}

struct Axis {
    min: f32,
    width: f32,
}

impl Axis {
    fn over(values: impl Iterator<Item = f32> + Clone, bins: usize) -> Axis {
        let min = values.clone().fold(f32::INFINITY, f32::min);
        let max = values.fold(f32::NEG_INFINITY, f32::max);
        Axis {
            min,
            width: (max - min) / bins as f32,
        }
    }

    fn index(&self, value: f32, bins: usize) -> usize {
        if self.width <= 0.0 {
            return 0;
        }
        (((value - self.min) / self.width) as usize).min(bins - 1)
    }

    fn center(&self, index: usize) -> f32 {
        // A degenerate axis keeps the observed value itself as the center.
        self.min + (index as f32 + 0.5) * self.width
    }
}

impl VoteHistogram {
    /// Bins `votes` into a `bins × bins` histogram and ranks the non-empty
    /// cells.
    pub fn from_votes(votes: &[Vote], bins: usize) -> Self {
        assert!(bins > 0, "vote histogram requires at least one bin per axis");
        if votes.is_empty() {
            return VoteHistogram { ranked: Vec::new() };
        }

        let r_axis = Axis::over(votes.iter().map(|v| v.r), bins);
        let theta_axis = Axis::over(votes.iter().map(|v| v.theta), bins);

        let mut counts: HashMap<(usize, usize), u32> = HashMap::new();
        for vote in votes {
            let key = (
                r_axis.index(vote.r, bins),
                theta_axis.index(vote.theta, bins),
            );
            *counts.entry(key).or_insert(0) += 1;
        }

        let mut ranked: Vec<VoteBin> = counts
            .into_iter()
            .map(|((ri, ti), count)| VoteBin {
                r: r_axis.center(ri),
                theta: theta_axis.center(ti),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.theta.partial_cmp(&b.theta).unwrap_or(Ordering::Equal))
                .then_with(|| a.r.partial_cmp(&b.r).unwrap_or(Ordering::Equal))
        });

        VoteHistogram { ranked }
    }

    /// Non-empty bins, best first.
    pub fn ranked(&self) -> &[VoteBin] {
        &self.ranked
    }

    /// Number of non-empty bins.
    pub fn nonzero_bins(&self) -> usize {
        self.ranked.len()
    }

    /// Total evidence held by the histogram.
    pub fn total_count(&self) -> u32 {
        self.ranked.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(r: f32, theta: f32) -> Vote {
        Vote { r, theta }
    }

    #[test]
    fn empty_votes_yield_empty_ranking() {
        let hist = VoteHistogram::from_votes(&[], 200);
        assert!(hist.ranked().is_empty());
        assert_eq!(hist.total_count(), 0);
    }

    #[test]
    fn counts_are_conserved() {
        let votes: Vec<Vote> = (0..57)
            .map(|i| vote(10.0 + i as f32 * 3.7, (i as f32 * 0.05) % 3.0))
            .collect();
        let hist = VoteHistogram::from_votes(&votes, 16);
        assert_eq!(hist.total_count() as usize, votes.len());
        assert!(hist.ranked().iter().all(|bin| bin.count > 0));
    }

    #[test]
    fn identical_votes_collapse_to_one_exact_bin() {
        let votes = vec![vote(320.0, 0.0); 9];
        let hist = VoteHistogram::from_votes(&votes, 200);
        assert_eq!(hist.nonzero_bins(), 1);
        let best = hist.ranked()[0];
        assert_eq!(best.count, 9);
        // Degenerate axes center on the observed value itself.
        assert_eq!(best.r, 320.0);
        assert_eq!(best.theta, 0.0);
    }

    #[test]
    fn dominant_cluster_ranks_first() {
        let mut votes = vec![vote(100.0, 1.0); 12];
        votes.push(vote(300.0, 2.0));
        votes.push(vote(500.0, 0.5));
        let hist = VoteHistogram::from_votes(&votes, 8);
        let best = hist.ranked()[0];
        assert_eq!(best.count, 12);
        assert!((best.r - 100.0).abs() < (500.0 - 100.0) / 8.0);
    }

    #[test]
    fn equal_counts_are_ordered_by_theta_then_r() {
        // Four single-vote bins spread across both axes.
        let votes = vec![
            vote(50.0, 2.0),
            vote(10.0, 2.0),
            vote(50.0, 1.0),
            vote(10.0, 1.0),
        ];
        let hist = VoteHistogram::from_votes(&votes, 4);
        let order: Vec<(u32, bool)> = hist
            .ranked()
            .windows(2)
            .map(|w| {
                let ordered = w[0].theta < w[1].theta
                    || (w[0].theta == w[1].theta && w[0].r <= w[1].r);
                (w[0].count, ordered)
            })
            .collect();
        for (count, ordered) in order {
            assert_eq!(count, 1);
            assert!(ordered, "ties must be ordered by ascending theta, then r");
        }
    }

    #[test]
    fn ranking_is_deterministic() {
        let votes: Vec<Vote> = (0..40)
            .map(|i| vote((i % 7) as f32, (i % 5) as f32 * 0.3))
            .collect();
        let a = VoteHistogram::from_votes(&votes, 10);
        let b = VoteHistogram::from_votes(&votes, 10);
        let pairs = a.ranked().iter().zip(b.ranked().iter());
        for (x, y) in pairs {
            assert_eq!(x.count, y.count);
            assert_eq!(x.r, y.r);
            assert_eq!(x.theta, y.theta);
        }
    }
}
