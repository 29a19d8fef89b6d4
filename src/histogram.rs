//! Binned distance distribution.
//!
//! The epsilon builder never counts qualifying pairs one by one before it
//! commits. It bins all N² matrix entries into at most 100 equal-width bins
//! (`floor(sqrt(N²))` when that is smaller) and sums the counts of every bin
//! whose lower edge is at or below ε. The sum is doubled for symmetry, which
//! makes the estimate an over-count; the ceiling check is therefore
//! conservative.

/// Upper bound on the number of bins.
pub const MAX_BINS: usize = 100;

/// Equal-width histogram over a set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` (any order).
    ///
    /// Bins are half-open `[lo, hi)` except the last, which is closed. When all
    /// values are equal the range is widened to `[v - 0.5, v + 0.5]`. An empty
    /// input yields a histogram with no bins.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let n_bins = ((values.len() as f64).sqrt() as usize).clamp(1, MAX_BINS);
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins)
            .map(|b| if b == n_bins { hi } else { lo + width * b as f64 })
            .collect();

        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let bin = (((v - lo) / width) as usize).min(n_bins - 1);
            counts[bin] += 1;
        }

        Self { edges, counts }
    }

    /// Bin edges (`counts().len() + 1` of them).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// `(first edge, last edge)`, or `None` for an empty histogram.
    pub fn boundary(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    /// Clamp `x` into [`boundary`](Self::boundary).
    pub fn clamp(&self, x: f64) -> f64 {
        match self.boundary() {
            Some((lo, hi)) => x.clamp(lo, hi),
            None => x,
        }
    }

    /// Edge-count estimate for threshold `epsilon`:
    /// `2 × Σ counts of bins whose lower edge <= epsilon`.
    pub fn estimate_edges(&self, epsilon: f64) -> usize {
        let selected: usize = self
            .edges
            .iter()
            .zip(&self.counts)
            .filter(|(&lower, _)| lower <= epsilon)
            .map(|(_, &c)| c)
            .sum();
        2 * selected
    }
}

/// Percentage of `sorted` strictly below `x`.
///
/// `sorted` must be ascending. Returns 0 for an empty slice.
pub fn percentile_rank(sorted: &[f64], x: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let below = sorted.partition_point(|&v| v < x);
    100.0 * below as f64 / sorted.len() as f64
}
