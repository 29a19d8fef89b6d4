//! Normalized distance over mixed continuous/discrete tables.
//!
//! For rows `i` and `j` of a table with `C` columns:
//!
//! ```text
//! continuous = sqrt( Σ_cont ((x_i - x_j) / (max - min))² )
//! discrete   = #{ discrete columns where x_i != x_j }
//! d(i, j)    = (continuous + discrete) / C
//! ```
//!
//! Min and max are taken over all rows. A continuous column whose max equals
//! its min contributes 0 to every pair and is reported as a
//! [`DegenerateColumn`](crate::advisory::AdvisoryKind::DegenerateColumn)
//! advisory.
//!
//! A column chosen with [`MixedDistanceMetric::with_label_column`] only names
//! rows: it is not a term and is not counted in `C`.
//!
//! # Complexity
//!
//! O(N²·C) time, O(N²) space for the output. This dominates for large tables;
//! with the `parallel` feature the rows are spread over the rayon pool.

use crate::advisory::{Advisories, AdvisoryKind, Outcome};
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;
use crate::table::{ColumnData, ColumnKind, Table};
use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-column comparison plan, resolved once before the pair loop.
enum Term<'a> {
    /// Values and `1 / (max - min)`.
    Continuous { values: &'a [f64], inv_range: f64 },
    Discrete { codes: &'a [u32] },
}

/// Mixed continuous/discrete distance metric.
#[derive(Debug, Clone, Default)]
pub struct MixedDistanceMetric {
    label_column: Option<String>,
}

impl MixedDistanceMetric {
    /// Create the metric.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label output rows with the values of a discrete column.
    ///
    /// The label column is excluded from the distance.
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = Some(name.into());
        self
    }

    /// Compute the distance matrix of `table`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if the table has no rows or no columns besides
    ///   the label column.
    /// - [`Error::InvalidParameter`] if the label column is missing or continuous.
    pub fn compute(&self, table: &Table) -> Result<Outcome<DistanceMatrix>> {
        let n = table.n_rows();
        if n == 0 || table.n_columns() == 0 {
            return Err(Error::EmptyInput);
        }

        let labels = self.labels(table)?;
        let mut advisories = Advisories::new();
        let terms = plan(table, self.label_column.as_deref(), &mut advisories);
        let c = terms.len();
        if c == 0 {
            return Err(Error::EmptyInput);
        }

        tracing::debug!(rows = n, columns = c, "computing mixed distances");

        let scale = 1.0 / c as f64;
        let pair = |i: usize, j: usize| -> f64 {
            let mut squares = 0.0;
            let mut mismatches = 0usize;
            for term in &terms {
                match *term {
                    Term::Continuous { values, inv_range } => {
                        let d = (values[i] - values[j]) * inv_range;
                        squares += d * d;
                    }
                    Term::Discrete { codes } => {
                        if codes[i] != codes[j] {
                            mismatches += 1;
                        }
                    }
                }
            }
            (squares.sqrt() + mismatches as f64) * scale
        };

        #[cfg(feature = "parallel")]
        let upper = upper_rows_parallel(n, &pair);

        #[cfg(not(feature = "parallel"))]
        let upper = upper_rows(n, &pair);

        let mut values = Array2::<f64>::zeros((n, n));
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, d) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[[i, j]] = d;
                values[[j, i]] = d;
            }
        }

        let mut matrix = DistanceMatrix::from_array_unchecked(values);
        if let Some(labels) = labels {
            matrix = matrix.with_labels(labels);
        }
        Ok(Outcome::new(matrix, advisories))
    }

    fn labels(&self, table: &Table) -> Result<Option<Vec<String>>> {
        let Some(name) = &self.label_column else {
            return Ok(None);
        };
        let column = table.column(name).ok_or_else(|| Error::InvalidParameter {
            name: "label_column",
            message: format!("no column named '{name}'"),
        })?;
        if column.kind() != ColumnKind::Discrete {
            return Err(Error::InvalidParameter {
                name: "label_column",
                message: format!("column '{name}' is not discrete"),
            });
        }
        Ok(Some(
            (0..table.n_rows())
                .filter_map(|row| table.discrete_label(name, row).map(str::to_string))
                .collect(),
        ))
    }
}

/// Upper triangle, one row at a time: `rows[i][offset]` is `d(i, i + 1 + offset)`.
#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn upper_rows<F>(n: usize, pair: &F) -> Vec<Vec<f64>>
where
    F: Fn(usize, usize) -> f64,
{
    (0..n)
        .map(|i| ((i + 1)..n).map(|j| pair(i, j)).collect())
        .collect()
}

#[cfg(feature = "parallel")]
fn upper_rows_parallel<F>(n: usize, pair: &F) -> Vec<Vec<f64>>
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    (0..n)
        .into_par_iter()
        .map(|i| ((i + 1)..n).map(|j| pair(i, j)).collect())
        .collect()
}

/// Resolve each column except `skip` into a [`Term`], recording zero-range
/// columns.
fn plan<'a>(table: &'a Table, skip: Option<&str>, advisories: &mut Advisories) -> Vec<Term<'a>> {
    table
        .columns()
        .iter()
        .filter(|column| Some(column.name()) != skip)
        .map(|column| match column.data() {
            ColumnData::Continuous(values) => {
                let (min, max) = values
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                let inv_range = if max > min {
                    1.0 / (max - min)
                } else {
                    advisories.record(
                        AdvisoryKind::DegenerateColumn,
                        format!(
                            "continuous column '{}' has zero range; it contributes 0 to every distance",
                            column.name()
                        ),
                    );
                    0.0
                };
                Term::Continuous { values, inv_range }
            }
            ColumnData::Discrete { codes, .. } => Term::Discrete { codes },
        })
        .collect()
}
