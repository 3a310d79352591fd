//! Searchable single-select combobox.
//!
//! A controlled widget: the host owns `value` and the option list, the widget
//! owns only its interaction state (see [`SelectState`]). Committed selections
//! and clears are reported through `on_change` and through
//! [`ComponentResult::Done`]; the widget never changes `value` by itself, the
//! host feeds the new value back with [`SearchableSelect::set_value`].
//!
//! # Example
//!
//! ```ignore
//! let mut select = SearchableSelect::new(vec!["LL-001".into(), "LL-002".into()])
//!     .label("Life-line")
//!     .required()
//!     .pointer_hub(hub.clone())
//!     .on_change(|value| tracing::info!(%value, "picked"));
//! ```

mod events;
mod filter;
mod render;
mod state;

pub use filter::filter_options;
pub use state::{
    OpenState, SearchRequest, SearchTicket, SelectId, SelectState, SelectionState,
};

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::MouseEventKind;
use lifeline_core::config::SelectConfig;
use tracing::debug;

use crate::component::{ComponentResult, FocusState};
use crate::error::SelectError;
use crate::pointer::{ListenerGuard, PointerHub};
use crate::spinner::LoadingSpinner;

use state::{SelectCore, Step};

type ChangeCallback = Box<dyn FnMut(&str)>;
type SearchCallback = Box<dyn FnMut(SearchRequest)>;

/// A searchable dropdown picking one string out of a list of options.
pub struct SearchableSelect {
    id: SelectId,
    options: Vec<String>,
    value: String,
    label: Option<String>,
    placeholder: String,
    error: Option<String>,
    required: bool,
    disabled: bool,
    focused: bool,
    searching: bool,
    config: SelectConfig,
    spinner: LoadingSpinner,
    // Shared with the outside-click listener, which holds it weakly.
    core: Rc<RefCell<SelectCore>>,
    hub: Option<PointerHub>,
    on_change: Option<ChangeCallback>,
    on_search: Option<SearchCallback>,
}

impl std::fmt::Debug for SearchableSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchableSelect")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl SearchableSelect {
    /// Create a select over `options` with default configuration.
    pub fn new(options: Vec<String>) -> Self {
        Self::with_config(options, &SelectConfig::default())
    }

    /// Create a select over `options` using `config`.
    pub fn with_config(options: Vec<String>, config: &SelectConfig) -> Self {
        Self {
            id: SelectId::next(),
            options,
            value: String::new(),
            label: None,
            placeholder: config.placeholder.clone(),
            error: None,
            required: false,
            disabled: false,
            focused: false,
            searching: false,
            spinner: LoadingSpinner::new(config.searching_text.clone()),
            config: config.clone(),
            core: Rc::new(RefCell::new(SelectCore::default())),
            hub: None,
            on_change: None,
            on_search: None,
        }
    }

    /// Set the initial value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder shown when no value is selected.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the label drawn above the field.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set an error message drawn below the field.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disable the field.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Attach the hub used for outside-click detection.
    pub fn pointer_hub(mut self, hub: PointerHub) -> Self {
        self.hub = Some(hub);
        self
    }

    /// Called with the new value on every commit or clear.
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Called with the search text on every keystroke while open.
    pub fn on_search(mut self, callback: impl FnMut(SearchRequest) + 'static) -> Self {
        self.on_search = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------
    // Host-facing accessors and setters
    // ------------------------------------------------------------------

    /// Instance identifier.
    pub fn id(&self) -> SelectId {
        self.id
    }

    /// Currently selected value; empty when nothing is selected.
    pub fn current_value(&self) -> &str {
        &self.value
    }

    /// All options.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.core.borrow().is_open()
    }

    /// Whether the field is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Read-only copy of the interaction state.
    pub fn snapshot(&self) -> SelectionState {
        self.core.borrow().snapshot()
    }

    /// Options passing the current filter, in option order. Empty when closed.
    pub fn filtered_options(&self) -> Vec<&str> {
        let core = self.core.borrow();
        core.open_state()
            .map(|open| {
                open.filtered()
                    .iter()
                    .filter_map(|&index| self.options.get(index))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ticket of the live search, `None` when closed.
    pub fn search_ticket(&self) -> Option<SearchTicket> {
        self.core.borrow().generation().map(|generation| SearchTicket {
            select: self.id,
            generation,
        })
    }

    /// Update the value from the host.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Replace the options. While open the filter is re-applied and the
    /// highlight is kept inside the new list.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.core.borrow_mut().refilter(&self.options);
    }

    /// Set or clear the error message.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Enable or disable the field. Disabling an open field dismisses it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.dismiss();
        }
    }

    /// Show or hide the remote-search indicator.
    pub fn set_search_loading(&mut self, loading: bool) {
        self.searching = loading;
    }

    /// Whether a remote search is in flight.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Apply the results of a remote search.
    ///
    /// Results are rejected, leaving the widget untouched, when the ticket was
    /// issued by another instance or the search it answers is no longer live
    /// (the text changed, or the dropdown was closed since).
    pub fn apply_search_results(
        &mut self,
        ticket: SearchTicket,
        options: Vec<String>,
    ) -> Result<(), SelectError> {
        if ticket.select != self.id {
            return Err(SelectError::ForeignTicket {
                ticket: ticket.select.to_string(),
                select: self.id.to_string(),
            });
        }

        let current = self.core.borrow().generation();
        if current != Some(ticket.generation) {
            debug!(
                select = %self.id,
                issued = ticket.generation,
                ?current,
                "Dropping stale search results"
            );
            return Err(SelectError::StaleSearch {
                issued: ticket.generation,
                current,
            });
        }

        self.searching = false;
        self.set_options(options);
        Ok(())
    }

    /// Check the required constraint.
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.required && self.value.is_empty() {
            return Err(SelectError::Required {
                field: self.label.clone().unwrap_or_else(|| "value".to_string()),
            });
        }
        Ok(())
    }

    /// Advance the search spinner.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Closed -> Open.
    pub fn open(&mut self) {
        self.open_with(true);
    }

    fn open_with(&mut self, highlight_first: bool) {
        if self.disabled || self.is_open() {
            return;
        }
        let listener = self.subscribe_outside_click();
        self.core.borrow_mut().open(
            &self.options,
            highlight_first,
            listener,
            self.config.max_visible,
        );
        debug!(select = %self.id, "Opened");
    }

    fn subscribe_outside_click(&self) -> Option<ListenerGuard> {
        let hub = self.hub.as_ref()?;
        let core = Rc::downgrade(&self.core);
        let id = self.id;
        Some(hub.subscribe(move |event| {
            if !matches!(event.kind, MouseEventKind::Down(_)) {
                return;
            }
            let Some(strong) = core.upgrade() else {
                return;
            };
            // Busy means the widget itself is handling this event.
            let Ok(mut state) = strong.try_borrow_mut() else {
                return;
            };
            if state.is_open() && !state.hits.contains(event.column, event.row) {
                state.close();
                debug!(select = %id, "Dismissed by outside click");
            }
        }))
    }

    /// Open -> Closed without emitting. Returns whether it was open.
    pub fn dismiss(&mut self) -> bool {
        let was_open = self.core.borrow_mut().close();
        if was_open {
            debug!(select = %self.id, "Dismissed");
        }
        was_open
    }

    /// Move the highlight up, wrapping to the last option.
    pub fn move_up(&mut self) {
        self.core.borrow_mut().step(Step::Up);
    }

    /// Move the highlight down, wrapping to the first option.
    pub fn move_down(&mut self) {
        self.core.borrow_mut().step(Step::Down);
    }

    /// Append typed text to the search, opening the dropdown if needed.
    pub fn input(&mut self, text: &str) {
        if self.disabled {
            return;
        }
        self.open_with(false);
        let generation = self.core.borrow_mut().push_search(&self.options, text);
        if let Some(generation) = generation {
            self.fire_search(generation);
        }
    }

    /// Delete the last character of the search.
    pub fn backspace(&mut self) {
        let generation = self.core.borrow_mut().pop_search(&self.options);
        if let Some(generation) = generation {
            self.fire_search(generation);
        }
    }

    fn fire_search(&mut self, generation: u64) {
        let term = self.snapshot().search_text;
        if let Some(callback) = self.on_search.as_mut() {
            callback(SearchRequest {
                term,
                ticket: SearchTicket {
                    select: self.id,
                    generation,
                },
            });
        }
    }

    /// Commit the highlighted option, if any.
    pub fn commit_highlighted(&mut self) -> ComponentResult<String> {
        let highlighted = self.snapshot().highlighted;
        match highlighted {
            Some(position) => self.select_option(position),
            None => ComponentResult::Handled,
        }
    }

    /// Commit the option at `position` in the filtered list.
    pub fn select_option(&mut self, position: usize) -> ComponentResult<String> {
        let chosen = self
            .core
            .borrow()
            .filtered_option(&self.options, position)
            .map(str::to_owned);
        let Some(chosen) = chosen else {
            return ComponentResult::NotHandled;
        };

        self.core.borrow_mut().close();
        debug!(select = %self.id, value = %chosen, "Committed");
        self.emit_change(&chosen);
        ComponentResult::Done(chosen)
    }

    /// Clear the value. Does nothing when there is no value.
    pub fn clear(&mut self) -> ComponentResult<String> {
        if self.disabled || self.value.is_empty() {
            return ComponentResult::NotHandled;
        }
        self.core.borrow_mut().close();
        debug!(select = %self.id, "Cleared");
        self.emit_change("");
        ComponentResult::Done(String::new())
    }

    fn emit_change(&mut self, value: &str) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    fn focus(&self) -> FocusState {
        if self.is_open() {
            FocusState::Editing
        } else if self.focused {
            FocusState::Focused
        } else {
            FocusState::Unfocused
        }
    }
}
