//! Sortable, externally paginated data table.
//!
//! The table is a "dumb" view over what the host passes in: it renders exactly
//! the rows it is given, in the order given, and reports header clicks and page
//! requests through `on_sort` / `on_page_change` (and as [`TableEvent`]s from
//! the [`Component`] methods). Sorting and paging the dataset is the host's
//! job, whether it happens server-side or client-side.
//!
//! Each cell is rendered inside its own fault boundary (see [`render_cell`]),
//! so one malformed record or misbehaving renderer costs a single cell.

mod cell;
mod column;
mod pagination;
mod record;
mod render;
mod sort;

pub use cell::{CellFault, CellOutput, render_cell};
pub use column::{CellRenderer, Column, ColumnWidth};
pub use pagination::{MAX_PAGE_BUTTONS, PageControl, PageItem, Pagination, page_window};
pub use record::{CellValue, RowKey, TableRecord, row_keys};
pub use sort::{SortDirection, SortIndicator, SortState};

use std::cell::RefCell;
use std::collections::HashSet;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use lifeline_core::config::TableConfig;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::component::{Component, ComponentResult, FocusState};
use crate::scroll::{ScrollMove, ScrollState};
use crate::spinner::LoadingSpinner;

use render::TableLayout;

/// Cells scrolled per `<` / `>` press.
const H_SCROLL_STEP: u16 = 4;
/// Lines scrolled per wheel notch.
const WHEEL_STEP: usize = 3;

/// Outcome reported by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The user asked for this page. Not clamped.
    PageRequested(usize),
    /// The user asked for this ordering.
    SortRequested {
        column: String,
        direction: SortDirection,
    },
}

/// Header cell as computed by [`DataTable::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub indicator: SortIndicator,
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub key: RowKey,
    pub cells: Vec<CellOutput>,
}

/// What the table shows, in priority order: loading, empty, populated.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Loading,
    Empty,
    Populated {
        header: Vec<HeaderCell>,
        rows: Vec<RenderedRow>,
        pagination: Pagination,
        pages: Vec<PageItem>,
    },
}

type PageCallback = Box<dyn FnMut(usize)>;
type SortCallback = Box<dyn FnMut(&str, SortDirection)>;

/// A table over records of type `R`.
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    data: Vec<R>,
    pagination: Pagination,
    loading: bool,
    sort: SortState,
    sticky_header: bool,
    header_offset: u16,
    max_body_height: Option<u16>,
    config: TableConfig,
    scroll: RefCell<ScrollState>,
    h_offset: u16,
    focused_header: Option<usize>,
    focused: bool,
    spinner: LoadingSpinner,
    layout: RefCell<TableLayout>,
    // (row, column) faults already logged for the current data.
    reported_faults: RefCell<HashSet<(RowKey, String)>>,
    on_page_change: Option<PageCallback>,
    on_sort: Option<SortCallback>,
}

impl<R> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("pagination", &self.pagination)
            .field("loading", &self.loading)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl<R: TableRecord> DataTable<R> {
    /// Create a table with the given columns and default configuration.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self::with_config(columns, &TableConfig::default())
    }

    /// Create a table using `config`.
    pub fn with_config(columns: Vec<Column<R>>, config: &TableConfig) -> Self {
        Self {
            columns,
            data: Vec::new(),
            pagination: Pagination::default(),
            loading: false,
            sort: SortState::default(),
            sticky_header: config.sticky_header,
            header_offset: config.header_offset,
            max_body_height: config.max_body_height,
            scroll: RefCell::new(ScrollState::default()),
            h_offset: 0,
            focused_header: None,
            focused: false,
            spinner: LoadingSpinner::new(config.loading_message.clone()),
            config: config.clone(),
            layout: RefCell::new(TableLayout::default()),
            reported_faults: RefCell::new(HashSet::new()),
            on_page_change: None,
            on_sort: None,
        }
    }

    /// Set the rows.
    pub fn data(mut self, data: Vec<R>) -> Self {
        self.set_data(data);
        self
    }

    /// Set the pagination metadata.
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the loading flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Seed the sort indicator.
    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = SortState::by(column, direction);
        self
    }

    /// Pin the header above a scrolling body.
    pub fn sticky_header(mut self, sticky: bool) -> Self {
        self.sticky_header = sticky;
        self
    }

    /// Rows between the top of the table area and the pinned header.
    pub fn header_offset(mut self, offset: u16) -> Self {
        self.header_offset = offset;
        self
    }

    /// Upper bound on visible body rows.
    pub fn max_body_height(mut self, rows: u16) -> Self {
        self.max_body_height = Some(rows.max(1));
        self
    }

    /// Called with the requested page.
    pub fn on_page_change(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    /// Called with the column key and requested direction.
    pub fn on_sort(mut self, callback: impl FnMut(&str, SortDirection) + 'static) -> Self {
        self.on_sort = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------
    // Host-facing accessors and setters
    // ------------------------------------------------------------------

    /// Column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Rows as given.
    pub fn rows(&self) -> &[R] {
        &self.data
    }

    /// Pagination metadata.
    pub fn current_pagination(&self) -> Pagination {
        self.pagination
    }

    /// Sort indicator state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Whether the loading state is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Index of the header focused for keyboard sorting.
    pub fn focused_header(&self) -> Option<usize> {
        self.focused_header
    }

    /// First body line in view.
    pub fn scroll_offset(&self) -> usize {
        self.scroll.borrow().top()
    }

    /// Horizontal scroll in cells.
    pub fn horizontal_offset(&self) -> u16 {
        self.h_offset
    }

    /// Replace the rows. The body scrolls back to the top.
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
        self.reported_faults.get_mut().clear();
        let scroll = self.scroll.get_mut();
        scroll.set_len(self.data.len() + usize::from(!self.sticky_header));
        scroll.apply(ScrollMove::Top);
    }

    /// Replace the pagination metadata.
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }

    /// Show or hide the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Set the sort indicator from the host; `None` clears it.
    pub fn set_sort(&mut self, column: Option<&str>, direction: SortDirection) {
        self.sort = SortState {
            column: column.map(str::to_owned),
            direction,
        };
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Header cells with their sort indicators.
    pub fn header(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key().to_string(),
                label: column.label().to_string(),
                sortable: column.is_sortable(),
                indicator: if column.is_sortable() {
                    self.sort.indicator(column.key())
                } else {
                    SortIndicator::Unsorted
                },
            })
            .collect()
    }

    /// Render every row through the per-cell fault boundary.
    ///
    /// Each faulty cell is logged once per data set, not on every frame.
    pub fn rendered_rows(&self) -> Vec<RenderedRow> {
        row_keys(&self.data)
            .into_iter()
            .zip(&self.data)
            .map(|(key, record)| {
                let cells: Vec<CellOutput> = self
                    .columns
                    .iter()
                    .map(|column| render_cell(column, record, &key, &self.config.null_placeholder))
                    .collect();
                for cell in &cells {
                    if let CellOutput::Fault(fault) = cell {
                        self.report_fault(fault);
                    }
                }
                RenderedRow { key, cells }
            })
            .collect()
    }

    fn report_fault(&self, fault: &CellFault) {
        let first = self
            .reported_faults
            .borrow_mut()
            .insert((fault.row.clone(), fault.column.clone()));
        if first {
            warn!(
                column = %fault.column,
                row = %fault.row,
                error = %fault.error,
                "Cell render failed"
            );
        }
    }

    /// Compute what the table shows.
    pub fn view(&self) -> TableView {
        if self.loading {
            return TableView::Loading;
        }
        if self.data.is_empty() {
            return TableView::Empty;
        }
        TableView::Populated {
            header: self.header(),
            rows: self.rendered_rows(),
            pagination: self.pagination,
            pages: page_window(self.pagination.current_page, self.pagination.total_pages),
        }
    }

    fn is_populated(&self) -> bool {
        !self.loading && !self.data.is_empty()
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Handle a click on the header of `key`.
    ///
    /// Returns the new direction, or `None` when the column is unknown or not
    /// sortable.
    pub fn click_header(&mut self, key: &str) -> Option<SortDirection> {
        let column = self.columns.iter().find(|c| c.key() == key)?;
        if !column.is_sortable() {
            return None;
        }
        let direction = self.sort.toggle(key);
        debug!(column = key, direction = direction.as_str(), "Sort requested");
        if let Some(callback) = self.on_sort.as_mut() {
            callback(key, direction);
        }
        Some(direction)
    }

    /// Handle a pagination control. Returns the requested page, or `None` when
    /// the control is disabled.
    pub fn request_page(&mut self, control: PageControl) -> Option<usize> {
        let page = control.target(&self.pagination)?;
        debug!(page, "Page requested");
        if let Some(callback) = self.on_page_change.as_mut() {
            callback(page);
        }
        Some(page)
    }

    fn sort_event(&mut self, index: usize) -> ComponentResult<TableEvent> {
        let Some(key) = self.columns.get(index).map(|c| c.key().to_string()) else {
            return ComponentResult::NotHandled;
        };
        match self.click_header(&key) {
            Some(direction) => ComponentResult::Done(TableEvent::SortRequested {
                column: key,
                direction,
            }),
            None => ComponentResult::Handled,
        }
    }

    fn page_event(&mut self, control: PageControl) -> ComponentResult<TableEvent> {
        match self.request_page(control) {
            Some(page) => ComponentResult::Done(TableEvent::PageRequested(page)),
            None => ComponentResult::Handled,
        }
    }

    /// Move keyboard focus to the next (or previous) sortable header.
    /// Returns false when focus runs off either end.
    fn cycle_header(&mut self, forward: bool) -> bool {
        let sortable: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_sortable())
            .map(|(i, _)| i)
            .collect();

        let position = self
            .focused_header
            .and_then(|focused| sortable.iter().position(|&i| i == focused));
        let next = match (position, forward) {
            (None, true) => sortable.first().copied(),
            (None, false) => sortable.last().copied(),
            (Some(p), true) => sortable.get(p + 1).copied(),
            (Some(p), false) => p.checked_sub(1).and_then(|p| sortable.get(p).copied()),
        };
        self.focused_header = next;
        next.is_some()
    }

    fn scroll_horizontally(&mut self, right: bool) {
        let max = self.layout.borrow().max_h_offset();
        self.h_offset = if right {
            self.h_offset.saturating_add(H_SCROLL_STEP).min(max)
        } else {
            self.h_offset.saturating_sub(H_SCROLL_STEP)
        };
    }
}

impl<R: TableRecord> Component for DataTable<R> {
    type Output = TableEvent;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.render_table(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<TableEvent> {
        if key.kind == KeyEventKind::Release || !self.is_populated() {
            return ComponentResult::NotHandled;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return ComponentResult::NotHandled;
        }

        match key.code {
            KeyCode::Left => self.page_event(PageControl::Previous),
            KeyCode::Right => self.page_event(PageControl::Next),
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
            | KeyCode::End => {
                let step = match key.code {
                    KeyCode::Up => ScrollMove::Up(1),
                    KeyCode::Down => ScrollMove::Down(1),
                    KeyCode::PageUp => ScrollMove::PageUp,
                    KeyCode::PageDown => ScrollMove::PageDown,
                    KeyCode::Home => ScrollMove::Top,
                    _ => ScrollMove::Bottom,
                };
                self.scroll.get_mut().apply(step);
                ComponentResult::Handled
            }
            KeyCode::Tab => {
                if self.cycle_header(true) {
                    ComponentResult::Handled
                } else {
                    ComponentResult::NotHandled
                }
            }
            KeyCode::BackTab => {
                if self.cycle_header(false) {
                    ComponentResult::Handled
                } else {
                    ComponentResult::NotHandled
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => match self.focused_header {
                Some(index) => self.sort_event(index),
                None => ComponentResult::NotHandled,
            },
            KeyCode::Char('<') => {
                self.scroll_horizontally(false);
                ComponentResult::Handled
            }
            KeyCode::Char('>') => {
                self.scroll_horizontally(true);
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> ComponentResult<TableEvent> {
        if !self.is_populated() {
            return ComponentResult::NotHandled;
        }
        let (column, row) = (event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (header, control) = {
                    let layout = self.layout.borrow();
                    (layout.header_at(column, row), layout.control_at(column, row))
                };
                if let Some(index) = header {
                    self.focused_header = Some(index);
                    return self.sort_event(index);
                }
                if let Some(control) = control {
                    return self.page_event(control);
                }
                ComponentResult::NotHandled
            }
            MouseEventKind::ScrollDown if self.layout.borrow().in_body(column, row) => {
                self.scroll.get_mut().apply(ScrollMove::Down(WHEEL_STEP));
                ComponentResult::Handled
            }
            MouseEventKind::ScrollUp if self.layout.borrow().in_body(column, row) => {
                self.scroll.get_mut().apply(ScrollMove::Up(WHEEL_STEP));
                ComponentResult::Handled
            }
            MouseEventKind::ScrollRight if self.layout.borrow().in_body(column, row) => {
                self.scroll_horizontally(true);
                ComponentResult::Handled
            }
            MouseEventKind::ScrollLeft if self.layout.borrow().in_body(column, row) => {
                self.scroll_horizontally(false);
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        if self.focused {
            FocusState::Focused
        } else {
            FocusState::Unfocused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.focused_header = None;
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if !self.is_populated() {
            return Vec::new();
        }
        let mut hints = vec![("←→", "Page"), ("↑↓", "Scroll")];
        if self.columns.iter().any(|c| c.is_sortable()) {
            hints.push(("Tab", "Column"));
            hints.push(("Enter", "Sort"));
        }
        hints.push(("<>", "Pan"));
        hints
    }

    fn on_hide(&mut self) {
        self.focused_header = None;
    }

    fn desired_size(&self) -> (u16, u16, u16, u16) {
        // Header + footer, and one body line.
        (20, 3, u16::MAX, u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CellRenderError;
    use pretty_assertions::assert_eq;
    use ratatui::text::Line;
    use serde_json::{Value, json};
    use std::rc::Rc;

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::new("code", "Code").sortable(),
            Column::new("client", "Client"),
            Column::new("date", "Date").sortable(),
        ]
    }

    fn records(n: usize) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({"id": i, "code": format!("LL-{i:03}"), "client": "Acme", "date": "2024-05-01"}))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_loading_takes_precedence_over_empty() {
        let table = DataTable::new(columns()).loading(true);
        assert_eq!(table.view(), TableView::Loading);

        let table = DataTable::new(columns());
        assert_eq!(table.view(), TableView::Empty);

        let table = DataTable::new(columns()).data(records(2)).loading(true);
        assert_eq!(table.view(), TableView::Loading);
    }

    #[test]
    fn test_populated_keeps_given_order() {
        let mut data = records(3);
        data.reverse();
        let table = DataTable::new(columns())
            .data(data)
            .pagination(Pagination::new(1, 1, 3));
        let TableView::Populated { rows, pages, .. } = table.view() else {
            panic!("expected rows");
        };
        let codes: Vec<_> = rows.iter().map(|r| r.cells[0].text().unwrap()).collect();
        assert_eq!(codes, vec!["LL-003", "LL-002", "LL-001"]);
        assert_eq!(rows[0].key, RowKey::Key("3".into()));
        assert_eq!(pages, vec![PageItem::Page { number: 1, current: true }]);
    }

    #[test]
    fn test_sort_toggle_and_callback() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut table = DataTable::new(columns())
            .data(records(1))
            .on_sort(move |column, direction| sink.borrow_mut().push((column.to_string(), direction)));

        assert_eq!(table.click_header("code"), Some(SortDirection::Asc));
        assert_eq!(table.click_header("code"), Some(SortDirection::Desc));
        assert_eq!(table.click_header("date"), Some(SortDirection::Asc));
        assert_eq!(table.click_header("client"), None);
        assert_eq!(table.click_header("nope"), None);

        assert_eq!(
            *calls.borrow(),
            vec![
                ("code".to_string(), SortDirection::Asc),
                ("code".to_string(), SortDirection::Desc),
                ("date".to_string(), SortDirection::Asc),
            ]
        );

        let header = table.header();
        assert_eq!(header[0].indicator, SortIndicator::Unsorted);
        assert_eq!(header[2].indicator, SortIndicator::Ascending);
    }

    #[test]
    fn test_seeded_sort_flips_on_first_click() {
        let mut table = DataTable::new(columns())
            .data(records(1))
            .with_sort("date", SortDirection::Asc);
        assert_eq!(table.click_header("date"), Some(SortDirection::Desc));
    }

    #[test]
    fn test_sort_does_not_reorder_rows() {
        let mut table = DataTable::new(columns()).data(records(3));
        table.click_header("code");
        table.click_header("code");
        let codes: Vec<_> = table
            .rendered_rows()
            .iter()
            .map(|r| r.cells[0].text().unwrap())
            .collect();
        assert_eq!(codes, vec!["LL-001", "LL-002", "LL-003"]);
    }

    #[test]
    fn test_page_requests_are_not_clamped() {
        let pages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pages);
        let mut table = DataTable::new(columns())
            .data(records(1))
            .pagination(Pagination::new(1, 4, 40))
            .on_page_change(move |page| sink.borrow_mut().push(page));

        assert_eq!(table.request_page(PageControl::Previous), None);
        assert_eq!(table.request_page(PageControl::Next), Some(2));
        assert_eq!(table.request_page(PageControl::Page(9)), Some(9));
        // The host has not moved to page 2, so this is page 2 again.
        assert_eq!(
            table.handle_key(key(KeyCode::Right)),
            ComponentResult::Done(TableEvent::PageRequested(2))
        );
        assert_eq!(table.handle_key(key(KeyCode::Left)), ComponentResult::Handled);
        assert_eq!(*pages.borrow(), vec![2, 9, 2]);
    }

    #[test_log::test]
    fn test_fault_is_confined_to_one_cell() {
        let columns: Vec<Column<Value>> = vec![
            Column::new("code", "Code"),
            Column::new("date", "Date").render(|value, record: &Value| {
                if record["id"] == 2 {
                    panic!("malformed date");
                }
                value
                    .as_str()
                    .map(|s| Line::from(s.to_string()))
                    .ok_or_else(|| CellRenderError::MissingField("date".into()))
            }),
            Column::new("client", "Client"),
        ];
        let mut data = records(3);
        data[2] = json!({"id": 3, "code": "LL-003", "client": "Brick"});
        let table = DataTable::new(columns).data(data);

        let rows = table.rendered_rows();
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].cells.iter().any(CellOutput::is_fault));

        assert_eq!(rows[1].cells[0].text().as_deref(), Some("LL-002"));
        assert!(rows[1].cells[1].is_fault());
        assert_eq!(rows[1].cells[2].text().as_deref(), Some("Acme"));

        let CellOutput::Fault(fault) = &rows[2].cells[1] else {
            panic!("expected a fault");
        };
        assert_eq!(fault.error, CellRenderError::MissingField("date".into()));
        assert_eq!(rows[2].cells[2].text().as_deref(), Some("Brick"));
    }

    /// Counts WARN events seen while installed as the default subscriber.
    struct WarnCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_fault_logged_once_across_redraws() {
        use ratatui::buffer::Buffer;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tracing_subscriber::layer::SubscriberExt;

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));

        tracing::subscriber::with_default(subscriber, || {
            let columns: Vec<Column<Value>> = vec![
                Column::new("code", "Code"),
                Column::new("date", "Date").render(|_, _| Err(CellRenderError::msg("bad date"))),
            ];
            let mut table = DataTable::new(columns).data(records(2));
            let area = Rect::new(0, 0, 40, 6);
            for _ in 0..5 {
                let mut buf = Buffer::empty(area);
                table.render(area, &mut buf);
            }
            // One warning per faulty cell, however often the table is drawn.
            assert_eq!(warnings.load(Ordering::SeqCst), 2);

            // New data is diagnosed afresh.
            table.set_data(records(1));
            table.render(area, &mut Buffer::empty(area));
            table.render(area, &mut Buffer::empty(area));
            assert_eq!(warnings.load(Ordering::SeqCst), 3);
        });
    }

    #[test]
    fn test_tab_cycles_sortable_headers() {
        let mut table = DataTable::new(columns()).data(records(1));
        assert_eq!(table.handle_key(key(KeyCode::Tab)), ComponentResult::Handled);
        assert_eq!(table.focused_header(), Some(0));
        table.handle_key(key(KeyCode::Tab));
        assert_eq!(table.focused_header(), Some(2));
        assert_eq!(
            table.handle_key(key(KeyCode::Char('s'))),
            ComponentResult::Done(TableEvent::SortRequested {
                column: "date".into(),
                direction: SortDirection::Asc
            })
        );
        assert_eq!(table.handle_key(key(KeyCode::Tab)), ComponentResult::NotHandled);
        assert_eq!(table.focused_header(), None);

        table.handle_key(key(KeyCode::BackTab));
        assert_eq!(table.focused_header(), Some(2));
    }

    #[test]
    fn test_keys_ignored_unless_populated() {
        let mut table = DataTable::new(columns()).pagination(Pagination::new(1, 3, 0));
        assert_eq!(table.handle_key(key(KeyCode::Right)), ComponentResult::NotHandled);

        table.set_data(records(2));
        table.set_loading(true);
        assert_eq!(table.handle_key(key(KeyCode::Right)), ComponentResult::NotHandled);
    }

    #[test]
    fn test_set_sort_from_host() {
        let mut table = DataTable::new(columns()).data(records(1));
        table.set_sort(Some("code"), SortDirection::Desc);
        assert_eq!(table.header()[0].indicator, SortIndicator::Descending);
        table.set_sort(None, SortDirection::Asc);
        assert!(table.header().iter().all(|h| h.indicator == SortIndicator::Unsorted));
    }
}
