//! Per-cell fault boundary.
//!
//! Every cell goes through [`render_cell`]. A renderer that returns an error
//! or panics yields [`CellOutput::Fault`] for that cell only; the rest of the
//! row and table render normally. Faults are only traced here; the table
//! reports each one at `warn` once per data set.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use ratatui::text::Line;
use tracing::trace;

use crate::error::CellRenderError;

use super::column::Column;
use super::record::{RowKey, TableRecord};

/// A cell whose renderer failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFault {
    /// Column key.
    pub column: String,
    /// Row identity.
    pub row: RowKey,
    /// What went wrong.
    pub error: CellRenderError,
}

/// Result of rendering one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutput {
    /// Rendered content.
    Content(Line<'static>),
    /// The renderer failed; drawn as an error badge.
    Fault(CellFault),
}

impl CellOutput {
    /// Whether the cell faulted.
    pub fn is_fault(&self) -> bool {
        matches!(self, CellOutput::Fault(_))
    }

    /// Plain text of the cell; `None` for faults.
    pub fn text(&self) -> Option<String> {
        match self {
            CellOutput::Content(line) => Some(
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect(),
            ),
            CellOutput::Fault(_) => None,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Render the cell of `column` for `record`.
///
/// Without a custom renderer the raw value is shown, with `null_placeholder`
/// for nullish values.
pub fn render_cell<R: TableRecord>(
    column: &Column<R>,
    record: &R,
    row: &RowKey,
    null_placeholder: &str,
) -> CellOutput {
    let value = record.field(column.key());

    let Some(renderer) = column.renderer() else {
        let text = value
            .display()
            .unwrap_or_else(|| null_placeholder.to_string());
        return CellOutput::Content(Line::from(text));
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| renderer(&value, record)))
        .unwrap_or_else(|payload| Err(CellRenderError::Panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(line) => CellOutput::Content(line),
        Err(error) => {
            trace!(column = column.key(), row = %row, %error, "Cell render failed");
            CellOutput::Fault(CellFault {
                column: column.key().to_string(),
                row: row.clone(),
                error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_table::record::CellValue;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn row() -> RowKey {
        RowKey::Key("r1".into())
    }

    #[test]
    fn test_default_renderer_uses_placeholder() {
        let column: Column<Value> = Column::new("note", "Note");
        let record = json!({"note": null});
        let out = render_cell(&column, &record, &row(), "-");
        assert_eq!(out.text().as_deref(), Some("-"));

        let record = json!({"note": "ok"});
        assert_eq!(
            render_cell(&column, &record, &row(), "-").text().as_deref(),
            Some("ok")
        );
    }

    #[test]
    fn test_custom_renderer() {
        let column: Column<Value> = Column::new("qty", "Qty")
            .render(|value, _| Ok(Line::from(format!("{value} pcs"))));
        let out = render_cell(&column, &json!({"qty": 3}), &row(), "-");
        assert_eq!(out, CellOutput::Content(Line::from("3 pcs")));
    }

    #[test_log::test]
    fn test_renderer_error_becomes_fault() {
        let column: Column<Value> = Column::new("date", "Date").render(|value, _| {
            value
                .as_str()
                .map(|s| Line::from(s.to_string()))
                .ok_or_else(|| CellRenderError::MissingField("date".into()))
        });
        let out = render_cell(&column, &json!({}), &row(), "-");
        assert_eq!(
            out,
            CellOutput::Fault(CellFault {
                column: "date".into(),
                row: row(),
                error: CellRenderError::MissingField("date".into()),
            })
        );
    }

    #[test_log::test]
    fn test_renderer_panic_is_contained() {
        let column: Column<Value> = Column::new("n", "N").render(|value, _| match value {
            CellValue::Int(n) if *n < 0 => panic!("negative: {n}"),
            other => Ok(Line::from(other.to_string())),
        });

        let out = render_cell(&column, &json!({"n": -1}), &RowKey::Position(4), "-");
        let CellOutput::Fault(fault) = out else {
            panic!("expected a fault");
        };
        assert_eq!(fault.row, RowKey::Position(4));
        assert_eq!(fault.error, CellRenderError::Panicked("negative: -1".into()));

        let out = render_cell(&column, &json!({"n": 1}), &RowKey::Position(5), "-");
        assert_eq!(out.text().as_deref(), Some("1"));
    }
}
