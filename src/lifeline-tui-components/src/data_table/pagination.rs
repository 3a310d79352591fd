//! External pagination: metadata from the host and the windowed page-button
//! row.
//!
//! The table never slices data and never assumes a page size; it only shows
//! controls for the pages the host reports and asks for a target page.

use std::fmt;

/// Most numbered buttons shown around the current page.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Pagination metadata owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// 1-based current page.
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize, total_items: usize) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
        }
    }

    /// Whether "previous" can be used.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether "next" can be used.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Footer summary, e.g. `Page 2 of 10 · 193 items`.
    pub fn summary(&self) -> String {
        let noun = if self.total_items == 1 { "item" } else { "items" };
        format!(
            "Page {} of {} · {} {noun}",
            self.current_page,
            self.total_pages.max(1),
            self.total_items
        )
    }
}

/// One slot of the page-button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Numbered button.
    Page { number: usize, current: bool },
    /// Skipped range.
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page { number, .. } => write!(f, "{number}"),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Page buttons for `current` of `total` pages.
///
/// At most [`MAX_PAGE_BUTTONS`] consecutive pages centred on `current`, plus
/// the first and last page when they fall outside the window, with an
/// ellipsis where pages are skipped. A `current` past `total` (the host has
/// not caught up with a shrunken result set) gets the last window.
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let span = MAX_PAGE_BUTTONS - 1;

    let mut start = current.saturating_sub(2).max(1);
    let end = start.saturating_add(span).min(total);
    if start.saturating_add(span) > end {
        start = end.saturating_sub(span).max(1);
    }

    let page = |number: usize| PageItem::Page {
        number,
        current: number == current,
    };

    let mut items = Vec::with_capacity(MAX_PAGE_BUTTONS + 4);
    if start > 1 {
        items.push(page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(page));
    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(page(total));
    }
    items
}

/// A clickable footer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous,
    Page(usize),
    Next,
}

impl PageControl {
    /// Target page, or `None` when the control is disabled.
    ///
    /// Numbered pages are passed through unchecked; the host clamps.
    pub fn target(self, pagination: &Pagination) -> Option<usize> {
        match self {
            PageControl::Previous => pagination
                .has_previous()
                .then(|| pagination.current_page - 1),
            PageControl::Next => pagination
                .has_next()
                .then(|| pagination.current_page + 1),
            PageControl::Page(number) => Some(number),
        }
    }
}
