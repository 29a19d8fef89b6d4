//! Relative neighborhood graphs.
//!
//! Items i and j are relative neighbors when no third item k is strictly
//! closer to both of them than they are to each other:
//!
//! ```text
//! (i, j) ∈ E  ⇔  ∄ k ∉ {i, j} : d(i, k) < d(i, j) ∧ d(j, k) < d(i, j)
//! ```
//!
//! The test is symmetric in i and j, so each qualifying unordered pair is
//! emitted once as an undirected edge weighted by its distance.
//!
//! # Complexity
//!
//! O(N³): every pair scans every other item. This is the most expensive
//! construction in the crate. [`BuildConfig::rng_node_ceiling`] rejects inputs
//! above a size limit before the scan starts, and the progress hook is
//! consulted once per row.

use super::traits::GraphBuilder;
use super::{node_labels, Edge, SparseGraph};
use crate::advisory::{Advisories, Outcome};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::progress::{self, Progress};

/// True if `k` is strictly closer to both `i` and `j` than they are to each other.
#[inline]
pub fn dominates(matrix: &DistanceMatrix, i: usize, j: usize, k: usize) -> bool {
    let d_ij = matrix.get(i, j);
    k != i && k != j && matrix.get(i, k) < d_ij && matrix.get(j, k) < d_ij
}

/// True if no item dominates the pair `(i, j)`. Always false for `i == j`.
pub fn is_relative_neighbor(matrix: &DistanceMatrix, i: usize, j: usize) -> bool {
    i != j && !(0..matrix.size()).any(|k| dominates(matrix, i, j, k))
}

/// Relative neighborhood graph builder.
#[derive(Debug, Clone, Default)]
pub struct RngGraphBuilder {
    config: BuildConfig,
}

impl RngGraphBuilder {
    /// Create a builder with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set safeguard thresholds.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }
}

impl GraphBuilder for RngGraphBuilder {
    fn build_with_progress(
        &self,
        matrix: &DistanceMatrix,
        progress: &mut dyn Progress,
    ) -> Result<Outcome<SparseGraph>> {
        let n = matrix.size();
        if let Some(ceiling) = self.config.rng_node_ceiling {
            if n > ceiling {
                tracing::warn!(n, ceiling, "too many nodes for relative neighborhood graph");
                return Err(Error::TooManyNodes { nodes: n, ceiling });
            }
        }
        tracing::debug!(n, "building relative neighborhood graph");

        let mut advisories = Advisories::new();
        let items = node_labels(matrix, &mut advisories);

        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if is_relative_neighbor(matrix, i, j) {
                    edges.push(Edge::from_distance(i, j, matrix.get(i, j)));
                }
            }
            progress::step(progress, i + 1, n)?;
        }
        self.config.check_edge_count(edges.len())?;

        let graph = SparseGraph::from_parts(items, edges, false);
        self.config
            .advise_size(graph.node_count(), graph.edge_count(), &mut advisories);
        let stats = graph.stats();
        tracing::debug!(
            edges = stats.edges,
            mean_degree = stats.mean_degree,
            "relative neighborhood graph built"
        );

        Ok(Outcome::new(graph, advisories))
    }

    fn config(&self) -> &BuildConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ])
        .unwrap()
    }

    fn planar(points: &[(f64, f64)]) -> DistanceMatrix {
        let rows = points
            .iter()
            .map(|a| {
                points
                    .iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_three_points() {
        let m = three();
        assert!(dominates(&m, 0, 2, 1));
        assert!(!dominates(&m, 0, 1, 2));

        let g = RngGraphBuilder::new().build(&m).unwrap().value;
        assert!(!g.is_directed());
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(0, 2));
        assert_eq!(g.edge(1, 2).unwrap().weight, 2.0);
    }

    #[test]
    fn test_equilateral_keeps_all_edges() {
        // Ties never dominate: the test is strict.
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        let g = RngGraphBuilder::new().build(&m).unwrap().value;
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_square_drops_diagonals() {
        let m = planar(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let g = RngGraphBuilder::new().build(&m).unwrap().value;
        assert_eq!(g.edge_count(), 4);
        assert!(!g.has_edge(0, 2));
        assert!(!g.has_edge(1, 3));
        assert!((g.stats().mean_degree - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_node_ceiling() {
        let m = three();
        let config = BuildConfig::default().with_rng_node_ceiling(2);
        let err = RngGraphBuilder::new()
            .with_config(config)
            .build(&m)
            .unwrap_err();
        assert_eq!(
            err,
            Error::TooManyNodes {
                nodes: 3,
                ceiling: 2
            }
        );

        let config = BuildConfig::default().without_rng_node_ceiling();
        assert!(RngGraphBuilder::new().with_config(config).build(&m).is_ok());
    }

    #[test]
    fn test_actual_edge_ceiling() {
        let config = BuildConfig::default().with_edge_count_ceiling(1);
        let err = RngGraphBuilder::new()
            .with_config(config)
            .build(&three())
            .unwrap_err();
        assert_eq!(err, Error::TooManyEdges { count: 2 });
    }

    proptest! {
        #[test]
        fn relative_neighbor_test_is_symmetric(
            points in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 2..12),
        ) {
            let m = planar(&points);
            let n = m.size();
            for i in 0..n {
                for j in 0..n {
                    prop_assert_eq!(
                        is_relative_neighbor(&m, i, j),
                        is_relative_neighbor(&m, j, i)
                    );
                }
            }
        }

        #[test]
        fn graph_is_connected_along_a_line(
            points in proptest::collection::vec(-10.0f64..10.0, 2..15),
        ) {
            // On a line the RNG contains every gap between consecutive points.
            let pts: Vec<(f64, f64)> = points.iter().map(|&x| (x, 0.0)).collect();
            let g = RngGraphBuilder::new().build(&planar(&pts)).unwrap().value;
            let mut order: Vec<usize> = (0..pts.len()).collect();
            order.sort_by(|&a, &b| points[a].total_cmp(&points[b]).then(a.cmp(&b)));
            for w in order.windows(2) {
                if points[w[0]] != points[w[1]] {
                    prop_assert!(g.has_edge(w[0], w[1]));
                }
            }
        }
    }
}
