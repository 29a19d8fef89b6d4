//! Graph builder trait.

use super::SparseGraph;
use crate::advisory::Outcome;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::progress::{Progress, Unobserved};

/// Trait for proximity graph construction rules.
pub trait GraphBuilder {
    /// Build a graph from `matrix`.
    ///
    /// Returns the graph with any advisories raised on the way, or a fatal
    /// error with no partial graph.
    fn build(&self, matrix: &DistanceMatrix) -> Result<Outcome<SparseGraph>> {
        self.build_with_progress(matrix, &mut Unobserved)
    }

    /// Build, reporting progress and honouring stop requests.
    fn build_with_progress(
        &self,
        matrix: &DistanceMatrix,
        progress: &mut dyn Progress,
    ) -> Result<Outcome<SparseGraph>>;

    /// Safeguard thresholds in effect.
    fn config(&self) -> &BuildConfig;
}
