//! Drawing of the data table and the hit regions it leaves behind.

use lifeline_core::style::{self, SURFACE_0, TEXT, TEXT_DIM, TEXT_MUTED};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::scroll::render_scrollbar;
use crate::text::width_u16;

use super::column::resolve_widths;
use super::pagination::{PageControl, PageItem, Pagination};
use super::{CellOutput, DataTable, HeaderCell, RenderedRow, SortIndicator, TableRecord, TableView};

/// Screen regions from the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TableLayout {
    headers: Vec<(Rect, usize)>,
    controls: Vec<(Rect, PageControl)>,
    body: Option<Rect>,
    content_width: u16,
    viewport_width: u16,
}

impl TableLayout {
    pub fn header_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.headers
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, index)| *index)
    }

    pub fn control_at(&self, column: u16, row: u16) -> Option<PageControl> {
        let pos = Position::new(column, row);
        self.controls
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, control)| *control)
    }

    pub fn in_body(&self, column: u16, row: u16) -> bool {
        self.body.is_some_and(|r| r.contains(Position::new(column, row)))
    }

    pub fn max_h_offset(&self) -> u16 {
        self.content_width.saturating_sub(self.viewport_width)
    }
}

/// Draw `line` starting at virtual column `x`, at most `width` cells wide,
/// keeping only what falls inside `viewport`. Overlong content ends in `…`.
fn put_clipped(buf: &mut Buffer, viewport: Rect, y: u16, x: i32, width: u16, line: &Line, base: Style) {
    if width == 0 {
        return;
    }
    let overflow = line.width() > usize::from(width);
    let limit = x + i32::from(width) - i32::from(overflow);
    let left = i32::from(viewport.x);
    let right = i32::from(viewport.right());

    let mut cursor = x;
    for span in &line.spans {
        let span_style = base.patch(line.style).patch(span.style);
        for grapheme in span.content.graphemes(true) {
            let w = i32::try_from(grapheme.width()).unwrap_or(i32::MAX);
            if w == 0 {
                continue;
            }
            if cursor + w > limit {
                break;
            }
            if cursor >= left && cursor + w <= right {
                buf.set_stringn(cursor as u16, y, grapheme, w as usize, span_style);
            }
            cursor += w;
        }
    }

    if overflow && limit >= left && limit < right {
        buf.set_string(limit as u16, y, "…", base.fg(TEXT_MUTED));
    }
}

/// Width of a header cell: label plus indicator slot.
fn header_width(cell: &HeaderCell) -> u16 {
    width_u16(&cell.label) + if cell.sortable { 2 } else { 0 }
}

fn footer_tokens(pagination: &Pagination, pages: &[PageItem]) -> Vec<(String, Option<PageControl>, bool)> {
    let mut tokens = vec![("‹".to_string(), Some(PageControl::Previous), pagination.has_previous())];
    for item in pages {
        tokens.push(match item {
            PageItem::Page { number, current: true } => {
                (format!("[{number}]"), Some(PageControl::Page(*number)), true)
            }
            PageItem::Page { number, .. } => (number.to_string(), Some(PageControl::Page(*number)), true),
            PageItem::Ellipsis => ("…".to_string(), None, false),
        });
    }
    tokens.push(("›".to_string(), Some(PageControl::Next), pagination.has_next()));
    tokens
}

impl<R: TableRecord> DataTable<R> {
    pub(super) fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let mut layout = TableLayout::default();
        if area.width >= 4 && area.height > 0 {
            match self.view() {
                TableView::Loading => {
                    let line = Rect::new(area.x + 1, area.y, area.width - 1, 1);
                    (&self.spinner).render(line, buf);
                }
                TableView::Empty => {
                    let message = &self.config.empty_message;
                    let width = width_u16(message).min(area.width);
                    let x = area.x + (area.width - width) / 2;
                    buf.set_stringn(x, area.y, message, usize::from(width), style::placeholder());
                }
                TableView::Populated {
                    header,
                    rows,
                    pagination,
                    pages,
                } => {
                    layout = self.render_populated(area, buf, &header, &rows, &pagination, &pages);
                }
            }
        }
        *self.layout.borrow_mut() = layout;
    }

    fn natural_widths(&self, header: &[HeaderCell], rows: &[RenderedRow]) -> Vec<u16> {
        let badge = width_u16(&self.config.error_badge) + 2;
        let cap = self.config.natural_width_cap;
        header
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let widest = rows
                    .iter()
                    .filter_map(|row| row.cells.get(index))
                    .map(|cell| match cell {
                        CellOutput::Content(line) => u16::try_from(line.width()).unwrap_or(u16::MAX),
                        CellOutput::Fault(_) => badge,
                    })
                    .max()
                    .unwrap_or(0);
                header_width(cell).max(widest).min(cap).max(1)
            })
            .collect()
    }

    fn render_populated(
        &self,
        area: Rect,
        buf: &mut Buffer,
        header: &[HeaderCell],
        rows: &[RenderedRow],
        pagination: &Pagination,
        pages: &[PageItem],
    ) -> TableLayout {
        let mut layout = TableLayout::default();
        let footer_height = u16::from(area.height >= 3);
        let region = Rect::new(area.x, area.y, area.width, area.height - footer_height);

        // Vertical layout.
        let cap = self.max_body_height.unwrap_or(u16::MAX);
        let (header_y, lines_top, visible, total) = if self.sticky_header {
            let header_y = region.y + self.header_offset.min(region.height.saturating_sub(1));
            let top = header_y + 1;
            let visible = region.bottom().saturating_sub(top).min(cap);
            (Some(header_y), top, visible, rows.len())
        } else {
            let visible = region.height.min(cap.saturating_add(1));
            (None, region.y, visible, rows.len() + 1)
        };

        let mut scroll = self.scroll.borrow_mut();
        scroll.set_len(total);
        scroll.set_rows(usize::from(visible));
        let scrollbar = scroll.overflows();

        // Horizontal layout.
        let viewport = Rect::new(
            region.x,
            region.y,
            region.width.saturating_sub(u16::from(scrollbar)),
            region.height,
        );
        let hints: Vec<_> = self.columns.iter().map(|c| c.width_hint()).collect();
        let widths = resolve_widths(&hints, &self.natural_widths(header, rows), viewport.width);
        let mut starts = Vec::with_capacity(widths.len());
        let mut content_width: u16 = 0;
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                content_width = content_width.saturating_add(1);
            }
            starts.push(content_width);
            content_width = content_width.saturating_add(*width);
        }
        layout.content_width = content_width;
        layout.viewport_width = viewport.width;
        let h_offset = self.h_offset.min(layout.max_h_offset());
        let column_x = |index: usize| i32::from(viewport.x) + i32::from(starts[index]) - i32::from(h_offset);

        let draw_header = |y: u16, buf: &mut Buffer, layout: &mut TableLayout| {
            let row = Rect::new(viewport.x, y, viewport.width, 1);
            buf.set_style(row, style::header());
            for (index, cell) in header.iter().enumerate() {
                let x = column_x(index);
                let width = widths[index];
                let cell_style = if self.focused_header == Some(index) {
                    style::highlighted()
                } else {
                    style::header()
                };
                if self.focused_header == Some(index) {
                    let (from, to) = clip_span(x, width, viewport);
                    if to > from {
                        buf.set_style(Rect::new(from, y, to - from, 1), cell_style);
                    }
                }

                let label_width = if cell.sortable { width.saturating_sub(2) } else { width };
                put_clipped(buf, viewport, y, x, label_width, &Line::from(cell.label.as_str()), cell_style);
                if cell.sortable && width >= 2 {
                    let glyph_style = if cell.indicator == SortIndicator::Unsorted {
                        cell_style.fg(TEXT_MUTED)
                    } else {
                        cell_style
                    };
                    let glyph = Line::from(cell.indicator.glyph());
                    put_clipped(buf, viewport, y, x + i32::from(width) - 1, 1, &glyph, glyph_style);

                    let (from, to) = clip_span(x, width, viewport);
                    if to > from {
                        layout.headers.push((Rect::new(from, y, to - from, 1), index));
                    }
                }
            }
        };

        let draw_row = |y: u16, position: usize, buf: &mut Buffer| {
            let Some(row) = rows.get(position) else {
                return;
            };
            let row_style = if position % 2 == 1 {
                Style::default().fg(TEXT).bg(SURFACE_0)
            } else {
                Style::default().fg(TEXT)
            };
            buf.set_style(Rect::new(viewport.x, y, viewport.width, 1), row_style);
            for (index, cell) in row.cells.iter().enumerate().take(widths.len()) {
                let x = column_x(index);
                match cell {
                    CellOutput::Content(line) => {
                        put_clipped(buf, viewport, y, x, widths[index], line, row_style);
                    }
                    CellOutput::Fault(_) => {
                        let badge = Line::from(format!(" {} ", self.config.error_badge));
                        put_clipped(buf, viewport, y, x, widths[index], &badge, style::error_badge());
                    }
                }
            }
        };

        let range = scroll.window();
        match header_y {
            Some(header_y) => {
                draw_header(header_y, buf, &mut layout);
                for (line, position) in range.enumerate() {
                    draw_row(lines_top + line as u16, position, buf);
                }
            }
            None => {
                for (line, position) in range.enumerate() {
                    let y = lines_top + line as u16;
                    if position == 0 {
                        draw_header(y, buf, &mut layout);
                    } else {
                        draw_row(y, position - 1, buf);
                    }
                }
            }
        }

        let body = Rect::new(region.x, lines_top, region.width, visible);
        if scrollbar {
            render_scrollbar(Rect::new(body.right() - 1, body.y, 1, body.height), buf, &scroll);
        }
        layout.body = Some(body);
        drop(scroll);

        if footer_height > 0 {
            let y = (lines_top + visible).min(area.bottom() - 1);
            self.render_footer(Rect::new(area.x, y, area.width, 1), buf, pagination, pages, &mut layout);
        }
        layout
    }

    fn render_footer(
        &self,
        line: Rect,
        buf: &mut Buffer,
        pagination: &Pagination,
        pages: &[PageItem],
        layout: &mut TableLayout,
    ) {
        let tokens = footer_tokens(pagination, pages);
        let controls_width: usize =
            tokens.iter().map(|(text, _, _)| text.width()).sum::<usize>() + tokens.len() - 1;
        let controls_width = u16::try_from(controls_width).unwrap_or(u16::MAX);

        let summary = pagination.summary();
        let summary_width = width_u16(&summary);
        if summary_width + controls_width + 2 <= line.width {
            buf.set_string(line.x + 1, line.y, &summary, Style::default().fg(TEXT_DIM));
        }

        let mut x = line.right().saturating_sub(controls_width + 1).max(line.x);
        for (text, control, enabled) in tokens {
            let width = width_u16(&text);
            if x + width > line.right() {
                break;
            }
            let token_style = match (control, enabled) {
                (Some(PageControl::Page(n)), _) if n == pagination.current_page => style::highlighted(),
                (_, false) => style::disabled(),
                _ => Style::default().fg(TEXT),
            };
            buf.set_string(x, line.y, &text, token_style);
            if let Some(control) = control
                && enabled
            {
                layout.controls.push((Rect::new(x, line.y, width, 1), control));
            }
            x += width + 1;
        }
    }
}

/// Visible part of `[x, x + width)` within `viewport`, as screen columns.
fn clip_span(x: i32, width: u16, viewport: Rect) -> (u16, u16) {
    let from = x.max(i32::from(viewport.x));
    let to = (x + i32::from(width)).min(i32::from(viewport.right()));
    if to <= from {
        return (0, 0);
    }
    (from as u16, to as u16)
}
