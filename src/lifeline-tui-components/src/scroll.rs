//! Vertical window over a run of lines.
//!
//! The dropdown list of the searchable select keeps its highlight inside the
//! window with [`ScrollState::reveal`]; the table body is moved directly with
//! [`ScrollMove`]s from keys and the mouse wheel.

use lifeline_core::style::{SURFACE_1, TEXT_MUTED};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// A movement of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMove {
    Up(usize),
    Down(usize),
    /// One window up, keeping a line of context.
    PageUp,
    /// One window down, keeping a line of context.
    PageDown,
    Top,
    Bottom,
}

/// `rows` lines of a `len`-line run, starting at line `top`.
///
/// `top` never goes past the point where the window would show blank lines
/// below the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    len: usize,
    rows: usize,
    top: usize,
}

impl ScrollState {
    pub fn new(len: usize, rows: usize) -> Self {
        Self { len, rows, top: 0 }
    }

    /// First line in the window.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Window height.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Change the run length, e.g. after filtering or new data.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.top = self.top.min(self.last_top());
    }

    /// Change the window height to what the last render could fit.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.top = self.top.min(self.last_top());
    }

    pub fn apply(&mut self, step: ScrollMove) {
        let page = self.rows.saturating_sub(1).max(1);
        let top = match step {
            ScrollMove::Up(lines) => self.top.saturating_sub(lines),
            ScrollMove::Down(lines) => self.top.saturating_add(lines),
            ScrollMove::PageUp => self.top.saturating_sub(page),
            ScrollMove::PageDown => self.top.saturating_add(page),
            ScrollMove::Top => 0,
            ScrollMove::Bottom => usize::MAX,
        };
        self.top = top.min(self.last_top());
    }

    /// Shift the window as little as possible so `line` is in it.
    pub fn reveal(&mut self, line: usize) {
        if self.rows == 0 {
            return;
        }
        if line < self.top {
            self.top = line;
        } else if line >= self.top + self.rows {
            self.top = (line + 1 - self.rows).min(self.last_top());
        }
    }

    /// Whether some lines fall outside the window.
    pub fn overflows(&self) -> bool {
        self.len > self.rows
    }

    /// Lines currently in the window.
    pub fn window(&self) -> std::ops::Range<usize> {
        let end = self.top.saturating_add(self.rows).min(self.len);
        self.top.min(end)..end
    }

    fn last_top(&self) -> usize {
        self.len.saturating_sub(self.rows)
    }
}

/// Draw the scrollbar for `scroll` into a one-column `area`. Nothing is drawn
/// when everything fits.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, scroll: &ScrollState) {
    if !scroll.overflows() || area.is_empty() {
        return;
    }

    let mut state = ScrollbarState::new(scroll.last_top()).position(scroll.top);
    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .track_style(Style::default().fg(SURFACE_1))
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(TEXT_MUTED))
        .render(area, buf, &mut state);
}
