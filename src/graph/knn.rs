//! k-nearest-neighbor graphs from a distance matrix.
//!
//! Each item i gets directed edges to the `k` items closest to it, weighted by
//! distance. Ties are broken by the smaller index so the result is
//! deterministic. With `include_closest`, the edge set is closed under
//! reversal: j → i is added whenever i → j was selected, so an item is also
//! linked to every item that counts it among *its* nearest neighbors.
//!
//! # Complexity
//!
//! O(N² log N): one sort of N - 1 distances per item. The `N × k` edge
//! ceiling is checked before any sorting starts.

use super::traits::GraphBuilder;
use super::{by_distance_then_index, node_labels, Edge, SparseGraph};
use crate::advisory::{Advisories, AdvisoryKind, Outcome};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::progress::{self, Progress};

/// kNN graph builder.
#[derive(Debug, Clone)]
pub struct KnnGraphBuilder {
    /// Neighbors per item.
    k: usize,
    /// Add reverse edges for every selected pair.
    include_closest: bool,
    config: BuildConfig,
}

impl KnnGraphBuilder {
    /// Connect each item to its `k` nearest neighbors.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            include_closest: false,
            config: BuildConfig::default(),
        }
    }

    /// Set `k`.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Symmetrize by adding reverse edges.
    pub fn with_include_closest(mut self, include_closest: bool) -> Self {
        self.include_closest = include_closest;
        self
    }

    /// Set safeguard thresholds.
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Requested `k`.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Whether reverse edges are added.
    pub fn include_closest(&self) -> bool {
        self.include_closest
    }

    /// Indices of the `k` items closest to `i`, nearest first.
    fn nearest(matrix: &DistanceMatrix, i: usize, k: usize) -> Vec<(f64, usize)> {
        let mut candidates: Vec<(f64, usize)> = matrix
            .row(i)
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, &d)| (d, j))
            .collect();
        candidates.sort_by(by_distance_then_index);
        candidates.truncate(k);
        candidates
    }
}

impl Default for KnnGraphBuilder {
    fn default() -> Self {
        Self::new(2)
    }
}

impl GraphBuilder for KnnGraphBuilder {
    fn build_with_progress(
        &self,
        matrix: &DistanceMatrix,
        progress: &mut dyn Progress,
    ) -> Result<Outcome<SparseGraph>> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1".into(),
            });
        }

        let n = matrix.size();
        self.config.check_edge_count(n.saturating_mul(self.k))?;
        tracing::debug!(
            n,
            k = self.k,
            include_closest = self.include_closest,
            "building knn graph"
        );

        let mut advisories = Advisories::new();
        let items = node_labels(matrix, &mut advisories);

        let k = if self.k >= n {
            let clamped = n - 1;
            advisories.record(
                AdvisoryKind::ParameterOutOfRange,
                format!(
                    "k = {} is not smaller than the number of items ({n}); using k = {clamped}",
                    self.k
                ),
            );
            clamped
        } else {
            self.k
        };

        let capacity = if self.include_closest { 2 * n * k } else { n * k };
        let mut edges = Vec::with_capacity(capacity);
        for i in 0..n {
            for (d, j) in Self::nearest(matrix, i, k) {
                edges.push(Edge::from_distance(i, j, d));
                if self.include_closest {
                    edges.push(Edge::from_distance(j, i, d));
                }
            }
            progress::step(progress, i + 1, n)?;
        }

        let graph = SparseGraph::from_parts(items, edges, true);
        self.config
            .advise_size(graph.node_count(), graph.edge_count(), &mut advisories);
        tracing::debug!(edges = graph.edge_count(), "knn graph built");

        Ok(Outcome::new(graph, advisories))
    }

    fn config(&self) -> &BuildConfig {
        &self.config
    }
}
