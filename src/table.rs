//! Column-typed tables.
//!
//! Every column carries an explicit [`ColumnKind`]. Continuous columns hold
//! `f64` values; discrete columns are dictionary-encoded (a list of value
//! names plus one code per row), so equality tests compare integers.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Real-valued, compared by normalized difference.
    Continuous,
    /// Categorical, compared by equality.
    Discrete,
}

/// Column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// One value per row.
    Continuous(Vec<f64>),
    /// `codes[row]` indexes into `values`.
    Discrete {
        /// Distinct value names, in first-seen order.
        values: Vec<String>,
        /// One code per row.
        codes: Vec<u32>,
    },
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// A continuous column.
    pub fn continuous(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Continuous(values),
        }
    }

    /// A discrete column, encoding each distinct string once.
    pub fn discrete<I, S>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: Vec<String> = Vec::new();
        let mut index: HashMap<String, u32> = HashMap::new();
        let codes = cells
            .into_iter()
            .map(|cell| {
                let cell = cell.as_ref();
                if let Some(&code) = index.get(cell) {
                    return code;
                }
                let code = values.len() as u32;
                values.push(cell.to_string());
                let _ = index.insert(cell.to_string(), code);
                code
            })
            .collect();
        Self {
            name: name.into(),
            data: ColumnData::Discrete { values, codes },
        }
    }

    /// A discrete column from a fixed value list and per-row codes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if a code is out of range or a value name
    /// appears twice. Codes are compared directly, so each name must own
    /// exactly one code.
    pub fn discrete_from_codes(
        name: impl Into<String>,
        values: Vec<String>,
        codes: Vec<u32>,
    ) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(values.len());
        if let Some(dup) = values.iter().find(|v| !seen.insert(v.as_str())) {
            return Err(Error::InvalidParameter {
                name: "values",
                message: format!("value '{dup}' is listed more than once"),
            });
        }
        if codes.iter().any(|&c| c as usize >= values.len()) {
            return Err(Error::InvalidParameter {
                name: "codes",
                message: format!("every code must be below {}", values.len()),
            });
        }
        Ok(Self {
            name: name.into(),
            data: ColumnData::Discrete { values, codes },
        })
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column kind.
    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Continuous(_) => ColumnKind::Continuous,
            ColumnData::Discrete { .. } => ColumnKind::Discrete,
        }
    }

    /// Column storage.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Continuous(v) => v.len(),
            ColumnData::Discrete { codes, .. } => codes.len(),
        }
    }

    /// True if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct values of a discrete column; 0 for continuous columns.
    pub fn label_count(&self) -> usize {
        match &self.data {
            ColumnData::Discrete { values, .. } => values.len(),
            ColumnData::Continuous(_) => 0,
        }
    }

    /// Display value of `row` for a discrete column.
    pub fn label(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Discrete { values, codes } => {
                codes.get(row).map(|&c| values[c as usize].as_str())
            }
            ColumnData::Continuous(_) => None,
        }
    }
}

/// Rows over a fixed, ordered set of typed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length and that
    /// continuous cells are finite.
    ///
    /// A table without columns has zero rows.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != n_rows {
                return Err(Error::DimensionMismatch {
                    expected: n_rows,
                    found: column.len(),
                });
            }
            if let ColumnData::Continuous(values) = &column.data {
                if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                    return Err(Error::NonFiniteValue {
                        column: column.name.clone(),
                        row,
                    });
                }
            }
        }
        Ok(Self { columns, n_rows })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Display value of `row` in the discrete column `column`.
    ///
    /// `None` if the column is missing or continuous, or `row` is out of range.
    pub fn discrete_label(&self, column: &str, row: usize) -> Option<&str> {
        self.column(column)?.label(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_encoding() {
        let c = Column::discrete("color", ["red", "blue", "red", "green"]);
        assert_eq!(c.kind(), ColumnKind::Discrete);
        match c.data() {
            ColumnData::Discrete { values, codes } => {
                assert_eq!(values, &["red", "blue", "green"]);
                assert_eq!(codes, &[0, 1, 0, 2]);
            }
            ColumnData::Continuous(_) => panic!("expected discrete"),
        }
        assert_eq!(c.label(3), Some("green"));
        assert_eq!(c.label(4), None);
    }

    #[test]
    fn test_discrete_from_codes_checks_range() {
        let ok = Column::discrete_from_codes("c", vec!["a".into(), "b".into()], vec![0, 1, 1]);
        assert!(ok.is_ok());
        let bad = Column::discrete_from_codes("c", vec!["a".into()], vec![0, 1]);
        assert!(matches!(bad, Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_discrete_from_codes_rejects_repeated_names() {
        // Two codes for "a" would make equal cells compare unequal.
        let err = Column::discrete_from_codes("c", vec!["a".into(), "a".into()], vec![0, 1])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "values", .. }));
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::continuous("x", vec![1.0, 2.0]),
            Column::discrete("y", ["a"]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_table_rejects_non_finite() {
        let err = Table::new(vec![Column::continuous("x", vec![1.0, f64::NAN])]).unwrap_err();
        assert_eq!(
            err,
            Error::NonFiniteValue {
                column: "x".into(),
                row: 1
            }
        );
    }

    #[test]
    fn test_table_queries() {
        let t = Table::new(vec![
            Column::continuous("x", vec![1.0, 2.0, 3.0]),
            Column::discrete("y", ["a", "b", "a"]),
        ])
        .unwrap();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_columns(), 2);
        assert_eq!(t.column("y").map(Column::kind), Some(ColumnKind::Discrete));
        assert!(t.column("z").is_none());
        assert_eq!(t.discrete_label("y", 1), Some("b"));
        assert_eq!(t.discrete_label("y", 3), None);
        assert_eq!(t.discrete_label("x", 0), None);
        assert_eq!(t.discrete_label("z", 0), None);
        assert_eq!(Table::new(vec![]).unwrap().n_rows(), 0);
    }
}
