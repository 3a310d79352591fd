//! Sort indicator state.
//!
//! Purely an indicator: the table never reorders rows, it reports the
//! requested ordering through `on_sort` and the host re-queries.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire name, as hosts pass it to their query layer.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Tri-state header indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Glyph drawn after the header label.
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

/// Which column, if any, is marked sorted.
///
/// Holding a single optional column makes "two columns sorted" unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Sorted by `column` in `direction`.
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Indicator for the header of `column`.
    pub fn indicator(&self, column: &str) -> SortIndicator {
        match (&self.column, self.direction) {
            (Some(active), SortDirection::Asc) if active == column => SortIndicator::Ascending,
            (Some(active), SortDirection::Desc) if active == column => SortIndicator::Descending,
            _ => SortIndicator::Unsorted,
        }
    }

    /// Apply a header click on `column` and return the new direction:
    /// a new column starts ascending, the active one flips.
    pub fn toggle(&mut self, column: &str) -> SortDirection {
        let direction = match &self.column {
            Some(active) if active == column => self.direction.flip(),
            _ => SortDirection::Asc,
        };
        self.column = Some(column.to_string());
        self.direction = direction;
        direction
    }
}
