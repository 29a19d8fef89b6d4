//! # proxgraph
//!
//! Proximity graphs and mixed-type distances.
//!
//! ```text
//! Table ──MixedDistanceMetric──▶ DistanceMatrix ──┬─ EpsilonGraphBuilder ─┐
//!                                                 ├─ KnnGraphBuilder ─────┼─▶ SparseGraph
//!                                                 └─ RngGraphBuilder ─────┘
//! ```
//!
//! Every step is a pure function of its inputs: nothing is cached between
//! calls, and independent inputs can be processed on different threads
//! without coordination. Fatal conditions (empty input, edge ceiling
//! exceeded) are [`Error`]s with no partial result; recoverable ones (label
//! mismatch, clamped `k`, constant column, large graph) come back as
//! [`Advisories`] next to a valid value in an [`Outcome`].
//!
//! ```rust
//! use proxgraph::{Column, GraphBuilder, MixedDistanceMetric, RngGraphBuilder, Table};
//!
//! let table = Table::new(vec![
//!     Column::continuous("height", vec![1.0, 1.2, 3.0, 3.1]),
//!     Column::discrete("kind", ["a", "a", "b", "b"]),
//! ])?;
//!
//! let distances = MixedDistanceMetric::new().compute(&table)?.value;
//! let graph = RngGraphBuilder::new().build(&distances)?.value;
//!
//! assert_eq!(graph.node_count(), 4);
//! assert!(graph.has_edge(0, 1));
//! assert!(graph.has_edge(2, 3));
//! # Ok::<(), proxgraph::Error>(())
//! ```

pub mod advisory;
pub mod community;
pub mod config;
/// Error types used across `proxgraph`.
pub mod error;
pub mod graph;
pub mod histogram;
pub mod matrix;
pub mod metric;
pub mod progress;
pub mod table;


pub use advisory::{Advisories, Advisory, AdvisoryKind, Outcome, Severity};
pub use community::{community_table, detect_communities, CommunityDetection};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use graph::{
    Edge, EpsilonGraphBuilder, GraphBuilder, GraphStats, KnnGraphBuilder, RngGraphBuilder,
    SparseGraph,
};
pub use histogram::Histogram;
pub use matrix::DistanceMatrix;
pub use metric::MixedDistanceMetric;
pub use progress::{Progress, Unobserved};
pub use table::{Column, ColumnData, ColumnKind, Table};
