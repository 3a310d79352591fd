//! Error types for the components.

use thiserror::Error;

/// Failure of a caller-supplied cell renderer.
///
/// Renderers return this to signal a malformed record; panics inside a
/// renderer are converted to [`CellRenderError::Panicked`] by the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellRenderError {
    /// The record lacks a field the renderer needs.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// The field holds a value the renderer cannot display.
    #[error("unexpected value in `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Free-form renderer failure.
    #[error("{0}")]
    Message(String),

    /// The renderer panicked.
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

impl CellRenderError {
    /// Shorthand for [`CellRenderError::Message`].
    pub fn msg(message: impl Into<String>) -> Self {
        CellRenderError::Message(message.into())
    }
}

/// Errors reported by the searchable select.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Search results arrived for a search that is no longer current.
    #[error("stale search results (generation {issued}, current {current:?})")]
    StaleSearch { issued: u64, current: Option<u64> },

    /// Search results were addressed to a different select instance.
    #[error("search results addressed to {ticket}, not {select}")]
    ForeignTicket { ticket: String, select: String },

    /// The select is required and has no value.
    #[error("{field} is required")]
    Required { field: String },
}

/// Failure to map a selected label back to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing was selected.
    #[error("no selection")]
    EmptySelection,

    /// More than one candidate matches.
    #[error("selection `{label}` is ambiguous ({matches} candidates)")]
    Ambiguous { label: String, matches: usize },

    /// No candidate matches, not even by its leading code.
    #[error("selection `{label}` does not match any candidate")]
    Unresolved { label: String },
}

impl ResolveError {
    /// Whether the caller should treat the selection as unresolved.
    ///
    /// True for every variant except [`ResolveError::EmptySelection`], which
    /// simply means "nothing chosen yet".
    pub fn is_unresolved(&self) -> bool {
        !matches!(self, ResolveError::EmptySelection)
    }
}
