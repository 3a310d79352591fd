//! Interaction state of the searchable select.
//!
//! The select is either [`SelectState::Closed`] or [`SelectState::Open`]; all
//! transient interaction data (search text, highlight, filtered list, the
//! outside-click subscription) lives inside the `Open` variant, so leaving
//! `Open` by any path discards it in one move.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::layout::{Position, Rect};
use unicode_segmentation::UnicodeSegmentation;

use crate::pointer::ListenerGuard;
use crate::scroll::{ScrollMove, ScrollState};

use super::filter::filter_options;

/// Unique identifier for a select instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectId(usize);

impl SelectId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SelectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select#{}", self.0)
    }
}

/// Identifies the search a remote result set answers.
///
/// Handed out with every [`SearchRequest`]; results are only applied if the
/// ticket still names the live search of the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    /// Instance that issued the search.
    pub select: SelectId,
    /// Search generation at the time of issue.
    pub generation: u64,
}

/// Payload of the `on_search` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Current search text.
    pub term: String,
    /// Ticket to pass back with the results.
    pub ticket: SearchTicket,
}

/// Read-only view of the interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Whether the dropdown is open.
    pub is_open: bool,
    /// Search text typed since opening.
    pub search_text: String,
    /// Highlighted position in the filtered list, `None` when nothing is
    /// highlighted.
    pub highlighted: Option<usize>,
}

/// Either closed, or open with the live edit.
#[derive(Debug, Default)]
pub enum SelectState {
    #[default]
    Closed,
    Open(OpenState),
}

/// Transient state of an open select.
#[derive(Debug)]
pub struct OpenState {
    search_text: String,
    highlighted: Option<usize>,
    filtered: Vec<usize>,
    generation: u64,
    scroll: ScrollState,
    // Released when this state is dropped.
    _listener: Option<ListenerGuard>,
}

impl OpenState {
    /// Search text typed since opening.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Highlighted position in the filtered list.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Indices into the option list that pass the current filter.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Dropdown scroll window.
    pub(crate) fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    fn sync_scroll(&mut self) {
        self.scroll.set_len(self.filtered.len());
        match self.highlighted {
            Some(index) => self.scroll.reveal(index),
            None => self.scroll.apply(ScrollMove::Top),
        }
    }
}

/// Screen areas from the last render, used for hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HitAreas {
    pub field: Option<Rect>,
    pub clear: Option<Rect>,
    pub dropdown: Option<Rect>,
    /// Option rows with their position in the filtered list.
    pub options: Vec<(Rect, usize)>,
}

impl HitAreas {
    /// Whether the point lies on the widget (field or dropdown).
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let pos = Position::new(column, row);
        self.field.is_some_and(|r| r.contains(pos)) || self.dropdown.is_some_and(|r| r.contains(pos))
    }

    pub fn on_clear(&self, column: u16, row: u16) -> bool {
        self.clear.is_some_and(|r| r.contains(Position::new(column, row)))
    }

    pub fn on_field(&self, column: u16, row: u16) -> bool {
        self.field.is_some_and(|r| r.contains(Position::new(column, row)))
    }

    pub fn on_dropdown(&self, column: u16, row: u16) -> bool {
        self.dropdown.is_some_and(|r| r.contains(Position::new(column, row)))
    }

    pub fn option_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.options
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, index)| *index)
    }
}

/// Direction of a highlight move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Up,
    Down,
}

/// The state machine shared between the widget and its outside-click
/// listener.
#[derive(Debug, Default)]
pub(crate) struct SelectCore {
    pub state: SelectState,
    pub hits: HitAreas,
    last_generation: u64,
}

impl SelectCore {
    pub fn is_open(&self) -> bool {
        matches!(self.state, SelectState::Open(_))
    }

    pub fn open_state(&self) -> Option<&OpenState> {
        match &self.state {
            SelectState::Open(open) => Some(open),
            SelectState::Closed => None,
        }
    }

    fn open_state_mut(&mut self) -> Option<&mut OpenState> {
        match &mut self.state {
            SelectState::Open(open) => Some(open),
            SelectState::Closed => None,
        }
    }

    pub fn snapshot(&self) -> SelectionState {
        match &self.state {
            SelectState::Closed => SelectionState::default(),
            SelectState::Open(open) => SelectionState {
                is_open: true,
                search_text: open.search_text.clone(),
                highlighted: open.highlighted,
            },
        }
    }

    /// Live search generation, `None` when closed.
    pub fn generation(&self) -> Option<u64> {
        self.open_state().map(|open| open.generation)
    }

    fn bump_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }

    /// Closed -> Open. Highlights the first option when asked to and there is
    /// one.
    pub fn open(
        &mut self,
        options: &[String],
        highlight_first: bool,
        listener: Option<ListenerGuard>,
        max_visible: usize,
    ) {
        let generation = self.bump_generation();
        let filtered = filter_options("", options);
        let highlighted = (highlight_first && !filtered.is_empty()).then_some(0);
        let mut open = OpenState {
            search_text: String::new(),
            highlighted,
            scroll: ScrollState::new(filtered.len(), max_visible),
            filtered,
            generation,
            _listener: listener,
        };
        open.sync_scroll();
        self.state = SelectState::Open(open);
    }

    /// Any state -> Closed. Returns whether the select was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = SelectState::Closed;
        was_open
    }

    /// Replace the search text, refilter and clear the highlight. Returns the
    /// new generation, or `None` if closed or the text did not change.
    pub fn set_search(&mut self, options: &[String], text: String) -> Option<u64> {
        let generation = self.last_generation + 1;
        let open = self.open_state_mut()?;
        if open.search_text == text {
            return None;
        }
        open.filtered = filter_options(&text, options);
        open.search_text = text;
        open.highlighted = None;
        open.generation = generation;
        open.sync_scroll();
        self.last_generation = generation;
        Some(generation)
    }

    /// Append typed text to the search.
    pub fn push_search(&mut self, options: &[String], typed: &str) -> Option<u64> {
        let text = format!("{}{}", self.open_state()?.search_text, typed);
        self.set_search(options, text)
    }

    /// Remove the last grapheme of the search.
    pub fn pop_search(&mut self, options: &[String]) -> Option<u64> {
        let current = &self.open_state()?.search_text;
        let mut graphemes: Vec<&str> = current.graphemes(true).collect();
        graphemes.pop()?;
        let text = graphemes.concat();
        self.set_search(options, text)
    }

    /// Recompute the filtered list after the options changed, keeping the
    /// highlight inside the new bounds.
    pub fn refilter(&mut self, options: &[String]) {
        if let Some(open) = self.open_state_mut() {
            open.filtered = filter_options(&open.search_text, options);
            let len = open.filtered.len();
            open.highlighted = match open.highlighted {
                Some(_) if len == 0 => None,
                Some(index) => Some(index.min(len - 1)),
                None => None,
            };
            open.sync_scroll();
        }
    }

    /// Move the highlight one step, wrapping at both ends.
    pub fn step(&mut self, step: Step) {
        let Some(open) = self.open_state_mut() else {
            return;
        };
        let count = open.filtered.len();
        if count == 0 {
            return;
        }
        open.highlighted = Some(match (step, open.highlighted) {
            (Step::Down, None) => 0,
            (Step::Down, Some(index)) => (index + 1) % count,
            (Step::Up, None) | (Step::Up, Some(0)) => count - 1,
            (Step::Up, Some(index)) => (index - 1).min(count - 1),
        });
        open.sync_scroll();
    }

    /// Highlight a position in the filtered list (mouse hover/wheel).
    pub fn highlight(&mut self, position: usize) {
        if let Some(open) = self.open_state_mut()
            && position < open.filtered.len()
        {
            open.highlighted = Some(position);
            open.sync_scroll();
        }
    }

    /// Option label at a position in the filtered list.
    pub fn filtered_option<'a>(&self, options: &'a [String], position: usize) -> Option<&'a str> {
        let open = self.open_state()?;
        open.filtered
            .get(position)
            .and_then(|&index| options.get(index))
            .map(String::as_str)
    }

    /// Option label under the highlight.
    pub fn highlighted_option<'a>(&self, options: &'a [String]) -> Option<&'a str> {
        let position = self.open_state()?.highlighted?;
        self.filtered_option(options, position)
    }

    /// Resize the dropdown window to what the last render could fit.
    pub fn set_visible_rows(&mut self, rows: usize) {
        if let Some(open) = self.open_state_mut() {
            open.scroll.set_rows(rows);
            open.sync_scroll();
        }
    }
}
