//! Epsilon (threshold) graphs.
//!
//! Items i and j are connected when `d(i, j) <= ε`. The edge weight inverts
//! the distance into a similarity-style value, `max(selected) - d(i, j)`, so
//! the closest pairs weigh most and the farthest selected pair weighs 0. The
//! raw distance stays available in [`Edge::distance`].
//!
//! Raising ε never removes an edge, though weights shift because the
//! maximum over the selected distances changes.

use super::traits::GraphBuilder;
use super::{node_labels, Edge, SparseGraph};
use crate::advisory::{Advisories, Outcome};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::histogram::percentile_rank;
use crate::matrix::DistanceMatrix;
use crate::progress::{self, Progress};

/// Threshold graph builder.
#[derive(Debug, Clone)]
pub struct EpsilonGraphBuilder {
    epsilon: f64,
    config: BuildConfig,
}

impl EpsilonGraphBuilder {
    /// Connect pairs at distance `epsilon` or less.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            config: BuildConfig::default(),
        }
    }

    /// Set the threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set safeguard thresholds.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// The threshold.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Percentage of all N² matrix entries strictly below the threshold.
    pub fn percentile(&self, matrix: &DistanceMatrix) -> f64 {
        percentile_rank(&matrix.flat_sorted(), self.epsilon)
    }

    /// Histogram-based edge estimate for the threshold.
    pub fn estimate_edges(&self, matrix: &DistanceMatrix) -> usize {
        matrix.histogram().estimate_edges(self.epsilon)
    }
}

impl Default for EpsilonGraphBuilder {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl GraphBuilder for EpsilonGraphBuilder {
    fn build_with_progress(
        &self,
        matrix: &DistanceMatrix,
        progress: &mut dyn Progress,
    ) -> Result<Outcome<SparseGraph>> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: format!("must be finite and non-negative, got {}", self.epsilon),
            });
        }

        let n = matrix.size();
        let estimate = self.estimate_edges(matrix);
        tracing::debug!(n, epsilon = self.epsilon, estimate, "building epsilon graph");
        self.config.check_edge_count(estimate)?;

        let mut advisories = Advisories::new();
        let items = node_labels(matrix, &mut advisories);

        let mut selected: Vec<(usize, usize, f64)> = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = matrix.get(i, j);
                if d <= self.epsilon {
                    selected.push((i, j, d));
                }
            }
            progress::step(progress, i + 1, n)?;
        }

        let max = selected.iter().map(|&(_, _, d)| d).fold(0.0, f64::max);
        let edges = selected
            .into_iter()
            .map(|(i, j, d)| Edge {
                source: i,
                target: j,
                weight: max - d,
                distance: d,
            })
            .collect();

        let graph = SparseGraph::from_parts(items, edges, false);
        self.config
            .advise_size(graph.node_count(), graph.edge_count(), &mut advisories);
        tracing::debug!(edges = graph.edge_count(), "epsilon graph built");

        Ok(Outcome::new(graph, advisories))
    }

    fn config(&self) -> &BuildConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::AdvisoryKind;
    use ndarray::Array2;
    use proptest::prelude::*;

    fn three() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_selects_close_pairs() {
        let g = EpsilonGraphBuilder::new(2.0).build(&three()).unwrap().value;

        assert_eq!(g.node_count(), 3);
        assert!(!g.is_directed());
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(0, 2));

        // max(selected) = 2
        let e01 = g.edge(0, 1).unwrap();
        assert_eq!(e01.weight, 1.0);
        assert_eq!(e01.distance, 1.0);
        let e12 = g.edge(1, 2).unwrap();
        assert_eq!(e12.weight, 0.0);
        assert_eq!(e12.distance, 2.0);
    }

    #[test]
    fn test_zero_epsilon_has_no_edges() {
        let g = EpsilonGraphBuilder::new(0.0).build(&three()).unwrap().value;
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn test_zero_epsilon_keeps_duplicates() {
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 0.0, 3.0],
            vec![0.0, 0.0, 3.0],
            vec![3.0, 3.0, 0.0],
        ])
        .unwrap();
        let g = EpsilonGraphBuilder::new(0.0).build(&m).unwrap().value;
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(0, 1));
        assert_eq!(g.edge(0, 1).unwrap().weight, 0.0);
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        for eps in [-1.0, f64::NAN, f64::INFINITY] {
            let err = EpsilonGraphBuilder::new(eps).build(&three()).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { name: "epsilon", .. }));
        }
    }

    #[test]
    fn test_labels_propagate_or_fall_back() {
        let m = three().with_labels(vec!["a".into(), "b".into(), "c".into()]);
        let out = EpsilonGraphBuilder::new(1.0).build(&m).unwrap();
        assert_eq!(out.value.items(), ["a", "b", "c"]);
        assert!(out.advisories.is_clean());

        let m = three().with_labels(vec!["a".into()]);
        let out = EpsilonGraphBuilder::new(1.0).build(&m).unwrap();
        assert_eq!(out.value.items(), ["0", "1", "2"]);
        assert!(out.advisories.contains(AdvisoryKind::LabelMismatch));
    }

    #[test]
    fn test_too_many_edges_estimate() {
        // 500 items all at distance 1: 250_000 entries, every bin selected.
        let n = 500;
        let mut values = Array2::<f64>::from_elem((n, n), 1.0);
        for i in 0..n {
            values[[i, i]] = 0.0;
        }
        let m = DistanceMatrix::from_array(values).unwrap();

        let err = EpsilonGraphBuilder::new(1.0).build(&m).unwrap_err();
        assert_eq!(err, Error::TooManyEdges { count: 2 * n * n });

        // A low threshold only selects the lowest bin (the diagonal).
        assert_eq!(EpsilonGraphBuilder::new(0.0).estimate_edges(&m), 2 * n);
        let out = EpsilonGraphBuilder::new(0.0).build(&m).unwrap();
        assert_eq!(out.value.edge_count(), 0);
    }

    #[test]
    fn test_large_graph_advisory() {
        let m = three();
        let config = BuildConfig::default().with_advisory_edge_threshold(1);
        let out = EpsilonGraphBuilder::new(2.0)
            .with_config(config)
            .build(&m)
            .unwrap();
        assert!(out.advisories.contains(AdvisoryKind::LargeGraph));
        assert_eq!(out.value.edge_count(), 2);
    }

    #[test]
    fn test_percentile() {
        // Entries: 0,0,0,1,1,2,2,4,4
        let b = EpsilonGraphBuilder::new(2.0);
        assert!((b.percentile(&three()) - 500.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancellation() {
        let mut stop = |done: usize, _: usize| done < 2;
        let err = EpsilonGraphBuilder::new(2.0)
            .build_with_progress(&three(), &mut stop)
            .unwrap_err();
        assert_eq!(
            err,
            Error::Cancelled {
                completed: 2,
                total: 3
            }
        );
    }

    proptest! {
        #[test]
        fn edge_set_grows_with_epsilon(
            points in proptest::collection::vec(0.0f64..10.0, 2..20),
            a in 0.0f64..10.0,
            b in 0.0f64..10.0,
        ) {
            let n = points.len();
            let rows: Vec<Vec<f64>> = (0..n)
                .map(|i| (0..n).map(|j| (points[i] - points[j]).abs()).collect())
                .collect();
            let m = DistanceMatrix::from_rows(rows).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let small = EpsilonGraphBuilder::new(lo).build(&m).unwrap().value;
            let large = EpsilonGraphBuilder::new(hi).build(&m).unwrap().value;

            for e in small.edges() {
                prop_assert!(large.has_edge(e.source, e.target));
            }
            for e in large.edges() {
                prop_assert!(e.weight >= 0.0);
                prop_assert!(e.distance <= hi);
            }
        }
    }
}
