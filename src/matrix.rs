//! Dense pairwise dissimilarity matrix.
//!
//! A [`DistanceMatrix`] is the shared input of every graph builder: an
//! N×N array of finite, non-negative distances that is symmetric and has a
//! zero diagonal. Validation happens once, at construction; afterwards the
//! matrix is immutable and builders only borrow it.

use crate::error::{Error, Result};
use crate::histogram::Histogram;
use ndarray::{Array2, ArrayView1};

/// Symmetric, zero-diagonal matrix of pairwise distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    values: Array2<f64>,
    row_labels: Option<Vec<String>>,
}

impl DistanceMatrix {
    /// Validate and wrap a dense array.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for a 0×0 array.
    /// - [`Error::ShapeMismatch`] if the array is not square.
    /// - [`Error::InvalidDistance`] for a negative or non-finite entry.
    /// - [`Error::NonZeroDiagonal`] / [`Error::AsymmetricMatrix`].
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != cols {
            return Err(Error::ShapeMismatch {
                expected: format!("{rows}x{rows}"),
                actual: format!("{rows}x{cols}"),
            });
        }
        if rows == 0 {
            return Err(Error::EmptyInput);
        }

        for ((row, col), &value) in values.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidDistance { row, col, value });
            }
        }
        for i in 0..rows {
            if values[[i, i]] != 0.0 {
                return Err(Error::NonZeroDiagonal { index: i });
            }
            for j in (i + 1)..rows {
                if values[[i, j]] != values[[j, i]] {
                    return Err(Error::AsymmetricMatrix { row: i, col: j });
                }
            }
        }

        Ok(Self {
            values,
            row_labels: None,
        })
    }

    /// Validate and wrap nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n) {
            return Err(Error::ShapeMismatch {
                expected: format!("{n}x{n}"),
                actual: format!("row of length {}", row.len()),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((n, n), flat).map_err(|e| Error::ShapeMismatch {
            expected: format!("{n}x{n}"),
            actual: e.to_string(),
        })?;
        Self::from_array(values)
    }

    /// Wrap an array that is symmetric with a zero diagonal by construction.
    pub(crate) fn from_array_unchecked(values: Array2<f64>) -> Self {
        debug_assert_eq!(values.nrows(), values.ncols());
        Self {
            values,
            row_labels: None,
        }
    }

    /// Attach row labels.
    ///
    /// The count is not checked here; builders fall back to positional labels
    /// (with an advisory) when it differs from [`size`](Self::size).
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.row_labels = Some(labels);
        self
    }

    /// Number of items N.
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    /// Distance between items `i` and `j`.
    ///
    /// # Panics
    ///
    /// If either index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Distances from item `i` to every item.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// The underlying array.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Row labels, if any were attached.
    pub fn row_labels(&self) -> Option<&[String]> {
        self.row_labels.as_deref()
    }

    /// All N² entries (diagonal included), ascending.
    pub fn flat_sorted(&self) -> Vec<f64> {
        let mut flat: Vec<f64> = self.values.iter().copied().collect();
        flat.sort_by(f64::total_cmp);
        flat
    }

    /// Largest distance in the matrix.
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Histogram of all N² entries.
    pub fn histogram(&self) -> Histogram {
        Histogram::from_values(&self.flat_sorted())
    }
}
