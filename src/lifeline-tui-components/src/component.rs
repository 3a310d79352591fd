//! The contract between a page and the widgets on it.
//!
//! A page draws each widget into its slot of the frame and routes terminal
//! input to the focused one. Outcomes reach the page twice: through the
//! callbacks registered on the widget and through the returned
//! [`ComponentResult`], so a page can pick whichever style suits it.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// What a widget did with an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Consumed; nothing for the page to do.
    Handled,
    /// Not for this widget. The page may offer the event elsewhere, e.g. move
    /// focus on `Tab`.
    NotHandled,
    /// The user committed an outcome (a selection, a page or sort request).
    Done(T),
    /// The user backed out of an interaction without an outcome.
    Cancelled,
}

impl<T> ComponentResult<T> {
    /// Whether the page should stop routing the event.
    pub fn is_handled(&self) -> bool {
        !matches!(self, ComponentResult::NotHandled)
    }

    /// The committed outcome, if any.
    pub fn into_done(self) -> Option<T> {
        match self {
            ComponentResult::Done(value) => Some(value),
            _ => None,
        }
    }
}

/// How a widget shows focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused,
    /// Focused with an interaction in progress (an open dropdown).
    Editing,
}

impl FocusState {
    pub fn has_focus(&self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }
}

/// An interactive widget hosted by a page.
pub trait Component {
    /// Outcome carried by [`ComponentResult::Done`].
    type Output;

    /// Draw into `area` of `buf`. Widgets remember the regions they drew for
    /// hit-testing the next mouse event.
    fn render(&self, area: Rect, buf: &mut Buffer);

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Handle a mouse event. Coordinates are absolute screen cells.
    fn handle_mouse(&mut self, _event: MouseEvent) -> ComponentResult<Self::Output> {
        ComponentResult::NotHandled
    }

    fn focus_state(&self) -> FocusState;

    /// Gain or lose focus. Losing focus ends any interaction in progress
    /// without an outcome.
    fn set_focus(&mut self, focused: bool);

    /// `(key, action)` pairs for the page's status line.
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// The page is about to stop showing the widget.
    fn on_hide(&mut self) {}

    /// `(min_width, min_height, max_width, max_height)`; `u16::MAX` means
    /// unbounded.
    fn desired_size(&self) -> (u16, u16, u16, u16) {
        (0, 0, u16::MAX, u16::MAX)
    }
}
