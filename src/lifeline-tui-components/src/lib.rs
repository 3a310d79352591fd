//! # Lifeline TUI Components
//!
//! The two interactive widgets every screen of the Lifeline admin console is
//! built from:
//!
//! - [`SearchableSelect`](searchable_select::SearchableSelect) - a controlled
//!   single-value combobox with typed filtering, keyboard/mouse navigation and
//!   optional remote search.
//! - [`DataTable`](data_table::DataTable) - a sortable, externally paginated
//!   grid that renders exactly the rows it is given, with a fault boundary
//!   around every cell.
//!
//! Both implement [`Component`](component::Component). Pages own the data and
//! the selected value / sort / page; the widgets own only their transient
//! interaction state and talk back through callbacks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lifeline_tui_components::prelude::*;
//!
//! let hub = PointerHub::new();
//! let mut select = SearchableSelect::new(option_labels(&lifelines, &LabelFormat::default()))
//!     .label("Life-line")
//!     .pointer_hub(hub.clone())
//!     .on_change(|value| tracing::info!(%value, "selected"));
//!
//! let mut table = DataTable::new(vec![
//!     Column::new("code", "Code").sortable(),
//!     Column::new("client", "Client"),
//! ])
//! .data(records)
//! .pagination(Pagination::new(page, total_pages, total_items))
//! .on_page_change(|page| tracing::info!(page, "load page"));
//!
//! // In the event loop:
//! hub.dispatch(&mouse_event);
//! select.handle_mouse(mouse_event);
//! table.render(area, frame.buffer_mut());
//! ```

pub mod component;
pub mod data_table;
pub mod error;
pub mod pointer;
pub mod resolve;
pub mod scroll;
pub mod searchable_select;
pub mod spinner;
pub mod text;

/// Commonly used types and traits for quick imports.
///
/// ```rust,ignore
/// use lifeline_tui_components::prelude::*;
/// ```
pub mod prelude {
    pub use crate::component::{Component, ComponentResult, FocusState};
    pub use crate::data_table::{
        CellOutput, CellValue, Column, ColumnWidth, DataTable, PageControl, PageItem, Pagination,
        RowKey, SortDirection, SortIndicator, SortState, TableEvent, TableRecord, TableView,
    };
    pub use crate::error::{CellRenderError, ResolveError, SelectError};
    pub use crate::pointer::{ListenerGuard, PointerHub};
    pub use crate::resolve::{LabelFormat, Labeled, option_labels, resolve_selection};
    pub use crate::scroll::{ScrollMove, ScrollState};
    pub use crate::searchable_select::{
        SearchRequest, SearchTicket, SearchableSelect, SelectId, SelectionState,
    };
    pub use crate::spinner::LoadingSpinner;
}

// Re-export lifeline-core style for convenience
pub use lifeline_core::style;

/// Lifeline TUI Components version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
