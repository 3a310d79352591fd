//! Drawing of the searchable select.
//!
//! Layout, top to bottom: optional label line, the field line, the error line
//! (closed only) and, while open, the dropdown block. The rectangles drawn are
//! recorded in the core for hit-testing by the next mouse event.

use lifeline_core::style::{
    self, ACCENT, BORDER, BORDER_FOCUS, ERROR, SURFACE_1, TEXT, TEXT_DIM, TEXT_MUTED,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border::ROUNDED;
use ratatui::widgets::{Block, Borders, Clear, Widget};

use crate::scroll::render_scrollbar;
use crate::text::{truncate, width_u16};

use super::SearchableSelect;
use super::state::HitAreas;

const CHEVRON_DOWN: &str = "▾";
const CHEVRON_UP: &str = "▴";
const CLEAR: &str = "×";
const CHECK: &str = "✓";

impl SearchableSelect {
    pub(super) fn render_select(&self, area: Rect, buf: &mut Buffer) {
        let mut hits = HitAreas::default();
        if area.width < 4 || area.height == 0 {
            self.core.borrow_mut().hits = hits;
            return;
        }

        let mut y = area.y;

        if let Some(label) = &self.label {
            let label_style = if self.disabled {
                style::disabled()
            } else {
                Style::default().fg(TEXT_DIM)
            };
            let width = usize::from(area.width);
            let text = truncate(label, width.saturating_sub(2));
            buf.set_string(area.x, y, &text, label_style);
            if self.required {
                buf.set_string(
                    area.x + width_u16(&text) + 1,
                    y,
                    "*",
                    Style::default().fg(ERROR),
                );
            }
            y += 1;
        }
        if y >= area.bottom() {
            self.core.borrow_mut().hits = hits;
            return;
        }

        let field = Rect::new(area.x, y, area.width, 1);
        hits.clear = self.render_field(field, buf);
        hits.field = Some(field);
        y += 1;

        let is_open = self.is_open();
        if !is_open {
            if let Some(error) = &self.error
                && y < area.bottom()
            {
                let text = truncate(error, usize::from(area.width));
                buf.set_string(area.x, y, text, Style::default().fg(ERROR));
            }
            self.core.borrow_mut().hits = hits;
            return;
        }

        let below = Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y));
        if below.height >= 3 {
            let (dropdown, options) = self.render_dropdown(below, buf);
            hits.dropdown = Some(dropdown);
            hits.options = options;
        }
        self.core.borrow_mut().hits = hits;
    }

    /// Draw the field line; returns the clear affordance if drawn.
    fn render_field(&self, field: Rect, buf: &mut Buffer) -> Option<Rect> {
        let is_open = self.is_open();
        let bg = SURFACE_1;
        buf.set_style(field, Style::default().bg(bg));

        let chevron_style = if self.disabled {
            style::disabled().bg(bg)
        } else if is_open || self.focused {
            Style::default().fg(ACCENT).bg(bg)
        } else {
            Style::default().fg(TEXT_DIM).bg(bg)
        };
        let chevron = if is_open { CHEVRON_UP } else { CHEVRON_DOWN };
        buf.set_string(field.right() - 2, field.y, chevron, chevron_style);

        let show_clear = !is_open && !self.value.is_empty() && !self.disabled;
        let text_width = usize::from(field.width.saturating_sub(if show_clear { 6 } else { 4 }));

        let (text, text_style) = if is_open {
            let search = self.snapshot().search_text;
            if search.is_empty() {
                // Keep the value visible until the user types.
                let shown = if self.value.is_empty() { &self.placeholder } else { &self.value };
                (shown.clone(), Style::default().fg(TEXT_MUTED).bg(bg))
            } else {
                (search, Style::default().fg(TEXT).bg(bg))
            }
        } else if self.value.is_empty() {
            (self.placeholder.clone(), style::placeholder().bg(bg))
        } else if self.disabled {
            (self.value.clone(), style::disabled().bg(bg))
        } else {
            (self.value.clone(), Style::default().fg(TEXT).bg(bg))
        };
        let text = truncate(&text, text_width);
        let end = buf.set_stringn(field.x + 1, field.y, &text, text_width, text_style).0;

        if is_open && end < field.right() - 3 {
            buf.set_string(end, field.y, "▏", Style::default().fg(ACCENT).bg(bg));
        }

        show_clear.then(|| {
            let clear = Rect::new(field.right() - 4, field.y, 1, 1);
            buf.set_string(clear.x, clear.y, CLEAR, Style::default().fg(TEXT_DIM).bg(bg));
            clear
        })
    }

    /// Draw the dropdown block into the top of `below`; returns its area and
    /// the option rows.
    fn render_dropdown(&self, below: Rect, buf: &mut Buffer) -> (Rect, Vec<(Rect, usize)>) {
        let snapshot = self.snapshot();
        let filtered_len = self
            .core
            .borrow()
            .open_state()
            .map_or(0, |open| open.filtered().len());
        let has_header = !snapshot.search_text.is_empty();

        let body_rows = if self.searching || filtered_len == 0 {
            1
        } else {
            filtered_len.min(self.config.max_visible)
        };
        let wanted = body_rows + usize::from(has_header) + 2;
        let height = u16::try_from(wanted).unwrap_or(u16::MAX).min(below.height);
        let dropdown = Rect::new(below.x, below.y, below.width, height);

        Clear.render(dropdown, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED)
            .border_style(Style::default().fg(if self.focused { BORDER_FOCUS } else { BORDER }));
        let mut inner = block.inner(dropdown);
        block.render(dropdown, buf);

        if has_header && inner.height > 0 {
            let noun = if filtered_len == 1 { "result" } else { "results" };
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                format!("{filtered_len} {noun}"),
                usize::from(inner.width.saturating_sub(1)),
                Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
            );
            inner.y += 1;
            inner.height -= 1;
        }
        if inner.height == 0 {
            return (dropdown, Vec::new());
        }

        if self.searching {
            let line = Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), 1);
            (&self.spinner).render(line, buf);
            return (dropdown, Vec::new());
        }
        if filtered_len == 0 {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                &self.config.no_results_text,
                usize::from(inner.width.saturating_sub(1)),
                style::placeholder(),
            );
            return (dropdown, Vec::new());
        }

        self.core.borrow_mut().set_visible_rows(usize::from(inner.height));
        let core = self.core.borrow();
        let Some(open) = core.open_state() else {
            return (dropdown, Vec::new());
        };
        let scroll = open.scroll();
        let row_width = if scroll.overflows() {
            inner.width.saturating_sub(1)
        } else {
            inner.width
        };

        let mut rows = Vec::new();
        for (line, position) in scroll.window().enumerate() {
            let Some(label) = open
                .filtered()
                .get(position)
                .and_then(|&index| self.options.get(index))
            else {
                continue;
            };
            let row = Rect::new(inner.x, inner.y + line as u16, row_width, 1);
            let is_highlighted = open.highlighted() == Some(position);
            let row_style = if is_highlighted {
                style::highlighted()
            } else {
                Style::default().fg(TEXT)
            };
            buf.set_style(row, row_style);

            if *label == self.value {
                buf.set_string(row.x + 1, row.y, CHECK, row_style.fg(ACCENT));
            }
            let text = truncate(label, usize::from(row.width.saturating_sub(4)));
            buf.set_string(row.x + 3, row.y, text, row_style);
            rows.push((row, position));
        }

        if scroll.overflows() {
            let bar = Rect::new(inner.right() - 1, inner.y, 1, inner.height);
            render_scrollbar(bar, buf, scroll);
        }

        (dropdown, rows)
    }

    /// Rows the widget wants in its current state.
    pub(super) fn desired_height(&self) -> u16 {
        let mut height = 1 + u16::from(self.label.is_some());
        let core = self.core.borrow();
        match core.open_state() {
            None => height += u16::from(self.error.is_some()),
            Some(open) => {
                let body = if self.searching || open.filtered().is_empty() {
                    1
                } else {
                    open.filtered().len().min(self.config.max_visible)
                };
                let header = usize::from(!open.search_text().is_empty());
                height += u16::try_from(body + header + 2).unwrap_or(u16::MAX);
            }
        }
        height
    }
}
