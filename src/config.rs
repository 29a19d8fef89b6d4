//! Safeguard and advisory thresholds shared by every graph builder.

use crate::advisory::{Advisories, AdvisoryKind};
use crate::error::{Error, Result};

/// Default ceiling on estimated or actual edge count.
pub const DEFAULT_EDGE_COUNT_CEILING: usize = 200_000;
/// Node count above which a large-graph advisory is raised.
pub const DEFAULT_ADVISORY_NODE_THRESHOLD: usize = 1_000;
/// Edge count above which a large-graph advisory is raised.
pub const DEFAULT_ADVISORY_EDGE_THRESHOLD: usize = 2_000;
/// Default node ceiling for the O(n³) relative neighborhood construction.
pub const DEFAULT_RNG_NODE_CEILING: usize = 2_000;

/// Thresholds applied by the builders.
///
/// ```rust
/// use proxgraph::BuildConfig;
///
/// let config = BuildConfig::default()
///     .with_edge_count_ceiling(50_000)
///     .without_rng_node_ceiling();
/// assert_eq!(config.edge_count_ceiling, 50_000);
/// assert!(config.rng_node_ceiling.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Abort construction when the (estimated) edge count exceeds this.
    pub edge_count_ceiling: usize,
    /// Raise a large-graph advisory above this many nodes.
    pub advisory_node_threshold: usize,
    /// Raise a large-graph advisory above this many edges.
    pub advisory_edge_threshold: usize,
    /// Reject relative neighborhood construction above this many nodes.
    /// `None` disables the check.
    pub rng_node_ceiling: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            edge_count_ceiling: DEFAULT_EDGE_COUNT_CEILING,
            advisory_node_threshold: DEFAULT_ADVISORY_NODE_THRESHOLD,
            advisory_edge_threshold: DEFAULT_ADVISORY_EDGE_THRESHOLD,
            rng_node_ceiling: Some(DEFAULT_RNG_NODE_CEILING),
        }
    }
}

impl BuildConfig {
    /// Set the edge ceiling.
    pub fn with_edge_count_ceiling(mut self, ceiling: usize) -> Self {
        self.edge_count_ceiling = ceiling;
        self
    }

    /// Set the large-graph node threshold.
    pub fn with_advisory_node_threshold(mut self, threshold: usize) -> Self {
        self.advisory_node_threshold = threshold;
        self
    }

    /// Set the large-graph edge threshold.
    pub fn with_advisory_edge_threshold(mut self, threshold: usize) -> Self {
        self.advisory_edge_threshold = threshold;
        self
    }

    /// Set the relative neighborhood node ceiling.
    pub fn with_rng_node_ceiling(mut self, ceiling: usize) -> Self {
        self.rng_node_ceiling = Some(ceiling);
        self
    }

    /// Disable the relative neighborhood node ceiling.
    pub fn without_rng_node_ceiling(mut self) -> Self {
        self.rng_node_ceiling = None;
        self
    }

    /// Fail with [`Error::TooManyEdges`] if `count` exceeds the ceiling.
    pub fn check_edge_count(&self, count: usize) -> Result<()> {
        if count > self.edge_count_ceiling {
            tracing::warn!(
                count,
                ceiling = self.edge_count_ceiling,
                "edge count over ceiling, aborting construction"
            );
            return Err(Error::TooManyEdges { count });
        }
        Ok(())
    }

    /// Record a large-graph advisory if either threshold is exceeded.
    pub fn advise_size(&self, nodes: usize, edges: usize, advisories: &mut Advisories) {
        if nodes > self.advisory_node_threshold || edges > self.advisory_edge_threshold {
            advisories.record(
                AdvisoryKind::LargeGraph,
                format!(
                    "large number of nodes/edges ({nodes} nodes, {edges} edges); performance will be hindered"
                ),
            );
        }
    }
}
