//! Cooperative progress reporting and cancellation.
//!
//! The kNN builder is O(n² log n) and the relative neighborhood builder is
//! O(n³). Both call [`Progress::report`] once per processed row; returning
//! `false` stops the build with [`Error::Cancelled`](crate::Error::Cancelled).
//!
//! ```rust
//! use proxgraph::{DistanceMatrix, GraphBuilder, RngGraphBuilder, Error};
//!
//! let m = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ])?;
//!
//! // Stop after the first row.
//! let mut stop_early = |done: usize, _total: usize| done < 1;
//! let err = RngGraphBuilder::new()
//!     .build_with_progress(&m, &mut stop_early)
//!     .unwrap_err();
//! assert!(matches!(err, Error::Cancelled { completed: 1, total: 3 }));
//! # Ok::<(), proxgraph::Error>(())
//! ```

use crate::error::{Error, Result};

/// Receives progress updates and decides whether to continue.
pub trait Progress {
    /// Called after `completed` of `total` steps. Return `false` to stop.
    fn report(&mut self, completed: usize, total: usize) -> bool;
}

/// Progress sink that never stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl Progress for Unobserved {
    #[inline]
    fn report(&mut self, _completed: usize, _total: usize) -> bool {
        true
    }
}

impl<F> Progress for F
where
    F: FnMut(usize, usize) -> bool,
{
    fn report(&mut self, completed: usize, total: usize) -> bool {
        self(completed, total)
    }
}

/// Report a step and turn a stop request into [`Error::Cancelled`].
pub(crate) fn step(progress: &mut dyn Progress, completed: usize, total: usize) -> Result<()> {
    if progress.report(completed, total) {
        Ok(())
    } else {
        tracing::debug!(completed, total, "build cancelled by progress hook");
        Err(Error::Cancelled { completed, total })
    }
}
