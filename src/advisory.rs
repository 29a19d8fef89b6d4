//! Non-fatal diagnostics returned alongside a valid result.
//!
//! Builders and the distance metric never fail on recoverable conditions.
//! They apply a fallback and record an [`Advisory`] instead:
//!
//! | Kind | Fallback |
//! |------|----------|
//! | [`AdvisoryKind::LabelMismatch`] | positional labels `"0".."n-1"` |
//! | [`AdvisoryKind::ParameterOutOfRange`] | clamp (e.g. `k` to `n - 1`) |
//! | [`AdvisoryKind::DegenerateColumn`] | column contributes 0 to every distance |
//! | [`AdvisoryKind::LargeGraph`] | none, informational |
//!
//! # Example
//!
//! ```rust
//! use proxgraph::{DistanceMatrix, EpsilonGraphBuilder, GraphBuilder};
//!
//! let m = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//! ])?
//! .with_labels(vec!["only-one".to_string()]);
//!
//! let out = EpsilonGraphBuilder::new(1.0).build(&m)?;
//! assert!(!out.advisories.is_clean());
//! for advisory in out.advisories.iter() {
//!     eprintln!("{advisory}");
//! }
//! # Ok::<(), proxgraph::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;

/// Severity level for advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// A fallback was applied; the result is valid but may not be what the caller expected.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
        }
    }
}

/// What triggered an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    /// Row-label count differs from the matrix size.
    LabelMismatch,
    /// A parameter was clamped into its valid range.
    ParameterOutOfRange,
    /// A continuous column has zero range.
    DegenerateColumn,
    /// The graph is large enough to slow downstream consumers.
    LargeGraph,
}

impl AdvisoryKind {
    /// Default severity for this kind.
    pub fn severity(self) -> Severity {
        match self {
            AdvisoryKind::LargeGraph => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

/// A single non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    /// What triggered it.
    pub kind: AdvisoryKind,
    /// Severity of the advisory.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Advisory {
    /// Create an advisory with the kind's default severity.
    pub fn new(kind: AdvisoryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Advisories collected during one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advisories {
    items: Vec<Advisory>,
}

impl Advisories {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record an advisory. Warnings are also emitted through `tracing`.
    pub fn push(&mut self, advisory: Advisory) {
        match advisory.severity {
            Severity::Warning => tracing::warn!(kind = ?advisory.kind, "{}", advisory.message),
            Severity::Info => tracing::info!(kind = ?advisory.kind, "{}", advisory.message),
        }
        self.items.push(advisory);
    }

    /// Record an advisory of `kind` with its default severity.
    pub fn record(&mut self, kind: AdvisoryKind, message: impl Into<String>) {
        self.push(Advisory::new(kind, message));
    }

    /// Append everything from `other`.
    pub fn extend(&mut self, other: Advisories) {
        self.items.extend(other.items);
    }

    /// True when nothing was recorded.
    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of advisories.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Advisory> {
        self.items.iter()
    }

    /// True if an advisory of `kind` was recorded.
    pub fn contains(&self, kind: AdvisoryKind) -> bool {
        self.items.iter().any(|a| a.kind == kind)
    }

    /// Advisories of a specific severity or higher.
    pub fn at_level(&self, min_severity: Severity) -> Vec<&Advisory> {
        self.items
            .iter()
            .filter(|a| a.severity >= min_severity)
            .collect()
    }

    /// Count advisories by kind.
    pub fn counts(&self) -> HashMap<AdvisoryKind, usize> {
        let mut counts = HashMap::new();
        for advisory in &self.items {
            *counts.entry(advisory.kind).or_default() += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Advisories {
    type Item = &'a Advisory;
    type IntoIter = std::slice::Iter<'a, Advisory>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Advisories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "no advisories");
        }
        writeln!(f, "{} advisories", self.items.len())?;
        for advisory in &self.items {
            writeln!(f, "  {}", advisory)?;
        }
        Ok(())
    }
}

/// A valid result plus the advisories raised while producing it.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// The computed value.
    pub value: T,
    /// Non-fatal diagnostics.
    pub advisories: Advisories,
}

impl<T> Outcome<T> {
    /// Wrap a value with advisories.
    pub fn new(value: T, advisories: Advisories) -> Self {
        Self { value, advisories }
    }

    /// Discard the advisories.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the advisories.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            advisories: self.advisories,
        }
    }
}
