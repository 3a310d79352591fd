//! Column descriptors.

use std::fmt;

use ratatui::text::Line;

use crate::error::CellRenderError;

use super::record::CellValue;

/// Caller-supplied cell renderer: `(value, record) -> line`.
pub type CellRenderer<R> = Box<dyn Fn(&CellValue, &R) -> Result<Line<'static>, CellRenderError>>;

/// Width hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Exactly this many cells.
    Fixed(u16),
    /// Percentage of the table width.
    Percent(u16),
    /// Share of whatever is left after fixed and percentage columns.
    Fill,
    /// Widest of the label and the visible cells, capped.
    #[default]
    Natural,
}

/// A column of a [`DataTable`](super::DataTable).
pub struct Column<R> {
    key: String,
    label: String,
    sortable: bool,
    width: ColumnWidth,
    renderer: Option<CellRenderer<R>>,
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("custom_render", &self.renderer.is_some())
            .finish()
    }
}

impl<R> Column<R> {
    /// A plain column showing the field `key` under `label`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            width: ColumnWidth::Natural,
            renderer: None,
        }
    }

    /// Make the header clickable for sorting.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Render cells with `renderer` instead of the raw field value.
    pub fn render<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&CellValue, &R) -> Result<Line<'static>, CellRenderError> + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Field key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Width hint.
    pub fn width_hint(&self) -> ColumnWidth {
        self.width
    }

    pub(crate) fn renderer(&self) -> Option<&CellRenderer<R>> {
        self.renderer.as_ref()
    }
}

/// Resolve column widths for a table `total` cells wide.
///
/// `natural` holds the natural width of each column. Fixed and percentage
/// columns are served first, natural columns next, and fill columns split
/// the rest evenly. The sum may exceed `total`; the table then scrolls
/// horizontally.
pub(crate) fn resolve_widths(hints: &[ColumnWidth], natural: &[u16], total: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = hints
        .iter()
        .zip(natural)
        .map(|(hint, &natural)| match hint {
            ColumnWidth::Fixed(width) => *width,
            ColumnWidth::Percent(pct) => {
                let pct = u32::from((*pct).min(100));
                u16::try_from(u32::from(total) * pct / 100).unwrap_or(u16::MAX)
            }
            ColumnWidth::Natural => natural,
            ColumnWidth::Fill => 0,
        })
        .collect();

    let fill = hints.iter().filter(|h| **h == ColumnWidth::Fill).count();
    if fill > 0 {
        // One separator cell between columns.
        let separators = u16::try_from(hints.len().saturating_sub(1)).unwrap_or(u16::MAX);
        let used: u16 = widths.iter().fold(separators, |acc, w| acc.saturating_add(*w));
        let left = total.saturating_sub(used);
        let count = u16::try_from(fill).unwrap_or(u16::MAX);
        let share = left / count;
        let mut extra = left % count;
        for (width, hint) in widths.iter_mut().zip(hints) {
            if *hint == ColumnWidth::Fill {
                *width = share.max(3) + u16::from(extra > 0);
                extra = extra.saturating_sub(1);
            }
        }
    }
    widths
}
