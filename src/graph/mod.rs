//! Sparse proximity graphs built from a [`DistanceMatrix`].
//!
//! ## Construction rules
//!
//! | Builder | Edge (i, j) iff | Weight | Direction | Cost |
//! |---------|-----------------|--------|-----------|------|
//! | [`EpsilonGraphBuilder`] | `d(i, j) <= ε` | `max(selected) - d(i, j)` | undirected | O(N²) |
//! | [`KnnGraphBuilder`] | j among the k closest to i | `d(i, j)` | directed | O(N² log N) |
//! | [`RngGraphBuilder`] | no k with `d(i,k) < d(i,j)` and `d(j,k) < d(i,j)` | `d(i, j)` | undirected | O(N³) |
//!
//! Every [`Edge`] also keeps the raw matrix distance in
//! [`Edge::distance`], so the epsilon builder's similarity-style weight never
//! hides the original value.
//!
//! ## Safeguards
//!
//! All builders share one [`BuildConfig`]. Before committing to full
//! construction each checks an estimated (or, for the relative neighborhood
//! graph, actual) edge count against `edge_count_ceiling` and fails with
//! [`Error::TooManyEdges`](crate::Error::TooManyEdges) instead of returning a
//! partial graph. Results larger than the advisory thresholds carry a
//! [`LargeGraph`](crate::advisory::AdvisoryKind::LargeGraph) advisory.
//!
//! ## Usage
//!
//! ```rust
//! use proxgraph::{DistanceMatrix, GraphBuilder, KnnGraphBuilder};
//!
//! let m = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 1.0, 4.0],
//!     vec![1.0, 0.0, 2.0],
//!     vec![4.0, 2.0, 0.0],
//! ])?;
//!
//! let graph = KnnGraphBuilder::new(1).build(&m)?.value;
//! assert!(graph.has_edge(0, 1));
//! assert!(graph.has_edge(2, 1));
//! assert!(!graph.has_edge(1, 2));
//! # Ok::<(), proxgraph::Error>(())
//! ```

mod epsilon;
mod interop;
mod knn;
mod rng;
mod traits;

pub use epsilon::EpsilonGraphBuilder;
pub use knn::KnnGraphBuilder;
pub use rng::{dominates, is_relative_neighbor, RngGraphBuilder};
pub use traits::GraphBuilder;

use crate::advisory::{Advisories, AdvisoryKind};
use crate::matrix::DistanceMatrix;
use std::cmp::Ordering;

/// A weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Source node. For undirected graphs, `source < target`.
    pub source: usize,
    /// Target node.
    pub target: usize,
    /// Builder-specific weight.
    pub weight: f64,
    /// Matrix distance between the endpoints.
    pub distance: f64,
}

impl Edge {
    /// Edge whose weight is its distance.
    pub fn from_distance(source: usize, target: usize, distance: f64) -> Self {
        Self {
            source,
            target,
            weight: distance,
            distance,
        }
    }

    fn key(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// Node set plus weighted edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseGraph {
    items: Vec<String>,
    /// Sorted by `(source, target)`, no duplicates.
    edges: Vec<Edge>,
    directed: bool,
    /// Undirected: incident edges. Directed: out-degree.
    degrees: Vec<usize>,
    in_degrees: Vec<usize>,
}

impl SparseGraph {
    /// Assemble a graph from builder output.
    ///
    /// Undirected edges are normalized to `source < target`; self loops are
    /// dropped; duplicate pairs keep their first occurrence.
    pub(crate) fn from_parts(items: Vec<String>, edges: Vec<Edge>, directed: bool) -> Self {
        let n = items.len();
        let mut edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| e.source != e.target)
            .map(|mut e| {
                if !directed && e.source > e.target {
                    std::mem::swap(&mut e.source, &mut e.target);
                }
                e
            })
            .collect();
        debug_assert!(edges.iter().all(|e| e.source < n && e.target < n));

        // Stable sort so dedup keeps the first occurrence.
        edges.sort_by_key(Edge::key);
        edges.dedup_by_key(|e| e.key());

        let mut degrees = vec![0usize; n];
        let mut in_degrees = vec![0usize; n];
        for e in &edges {
            degrees[e.source] += 1;
            if directed {
                in_degrees[e.target] += 1;
            } else {
                degrees[e.target] += 1;
            }
        }
        if !directed {
            in_degrees.clone_from(&degrees);
        }

        Self {
            items,
            edges,
            directed,
            degrees,
            in_degrees,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.items.len()
    }

    /// Number of stored edges (undirected edges count once).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Per-node labels.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Edges sorted by `(source, target)`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Incident edges (undirected) or out-degree (directed).
    pub fn degree(&self, node: usize) -> usize {
        self.degrees[node]
    }

    /// In-degree. Equals [`degree`](Self::degree) for undirected graphs.
    pub fn in_degree(&self, node: usize) -> usize {
        self.in_degrees[node]
    }

    /// Adjacent nodes (out-neighbors for directed graphs).
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let directed = self.directed;
        self.edges.iter().filter_map(move |e| {
            if e.source == node {
                Some(e.target)
            } else if !directed && e.target == node {
                Some(e.source)
            } else {
                None
            }
        })
    }

    /// The edge between `source` and `target`, respecting direction.
    pub fn edge(&self, source: usize, target: usize) -> Option<&Edge> {
        let key = if self.directed || source <= target {
            (source, target)
        } else {
            (target, source)
        };
        self.edges
            .binary_search_by(|e| e.key().cmp(&key))
            .ok()
            .map(|idx| &self.edges[idx])
    }

    /// True if the edge exists, respecting direction.
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edge(source, target).is_some()
    }

    /// Summary counts.
    pub fn stats(&self) -> GraphStats {
        let nodes = self.node_count();
        let edges = self.edge_count();
        let connected_nodes = (0..nodes)
            .filter(|&i| self.degrees[i] > 0 || self.in_degrees[i] > 0)
            .count();
        let degree_sum: usize = self.degrees.iter().sum();
        let per_node = |x: usize| if nodes == 0 { 0.0 } else { x as f64 / nodes as f64 };
        GraphStats {
            nodes,
            edges,
            connected_nodes,
            connected_fraction: per_node(connected_nodes),
            edges_per_node: per_node(edges),
            mean_degree: per_node(degree_sum),
        }
    }
}

/// Summary counts for a [`SparseGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphStats {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of stored edges.
    pub edges: usize,
    /// Nodes with at least one incident edge.
    pub connected_nodes: usize,
    /// `connected_nodes / nodes`.
    pub connected_fraction: f64,
    /// `edges / nodes`.
    pub edges_per_node: f64,
    /// Mean of [`SparseGraph::degree`] over all nodes.
    pub mean_degree: f64,
}

/// Node labels for the matrix's items.
///
/// Row labels propagate when there is exactly one per item; otherwise a
/// [`LabelMismatch`](AdvisoryKind::LabelMismatch) advisory is recorded and
/// positional labels are used.
pub(crate) fn node_labels(matrix: &DistanceMatrix, advisories: &mut Advisories) -> Vec<String> {
    let n = matrix.size();
    match matrix.row_labels() {
        Some(labels) if labels.len() == n => labels.to_vec(),
        Some(labels) => {
            advisories.record(
                AdvisoryKind::LabelMismatch,
                format!(
                    "number of data items ({}) does not match the number of nodes ({n}); using positional labels",
                    labels.len()
                ),
            );
            positional_labels(n)
        }
        None => positional_labels(n),
    }
}

pub(crate) fn positional_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

/// Ascending by distance, ties by index.
#[inline]
pub(crate) fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}
