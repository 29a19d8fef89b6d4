//! Community labels for graph nodes.
//!
//! Community detection itself (Louvain, Leiden, ...) is supplied by the
//! caller through [`CommunityDetection`]. This module runs a detector on a
//! [`SparseGraph`] and shapes its node → community mapping into a one-column
//! discrete [`Table`]:
//!
//! ```text
//! partition  [0, 0, 2, 2, 1]
//!      │
//!      ▼
//! Community  C0 C0 C2 C2 C1     values = [C0, C1, C2]
//! ```

use crate::error::{Error, Result};
use crate::graph::SparseGraph;
use crate::table::{Column, Table};
use petgraph::graph::UnGraph;
use std::collections::BTreeMap;

/// Name of the column produced by [`community_table`].
pub const COMMUNITY_COLUMN: &str = "Community";

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to community ID.
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;
}

/// Shape a node → community mapping into a labeled table.
///
/// Community `id` becomes the discrete value `"C{id}"`; the value list is
/// ordered by ascending id.
///
/// # Errors
///
/// [`Error::EmptyInput`] for an empty partition.
pub fn community_table(partition: &[usize]) -> Result<Table> {
    if partition.is_empty() {
        return Err(Error::EmptyInput);
    }

    let positions: BTreeMap<usize, u32> = {
        let mut ids: Vec<usize> = partition.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .enumerate()
            .map(|(pos, id)| (id, pos as u32))
            .collect()
    };
    let values = positions.keys().map(|id| format!("C{id}")).collect();
    let codes = partition.iter().map(|id| positions[id]).collect();

    Table::new(vec![Column::discrete_from_codes(
        COMMUNITY_COLUMN,
        values,
        codes,
    )?])
}

/// Run `detector` on the undirected view of `graph` and label its nodes.
///
/// # Errors
///
/// Propagates detector errors; [`Error::DimensionMismatch`] if the detector
/// returns a partition of the wrong length.
pub fn detect_communities<D>(graph: &SparseGraph, detector: &D) -> Result<Table>
where
    D: CommunityDetection,
{
    let partition = detector.detect(&graph.to_petgraph())?;
    if partition.len() != graph.node_count() {
        return Err(Error::DimensionMismatch {
            expected: graph.node_count(),
            found: partition.len(),
        });
    }
    let table = community_table(&partition)?;
    tracing::debug!(
        nodes = graph.node_count(),
        communities = table.columns()[0].label_count(),
        "communities labeled"
    );
    Ok(table)
}
