//! Key and mouse handling for the searchable select.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::component::{Component, ComponentResult, FocusState};

use super::SearchableSelect;

impl SearchableSelect {
    fn handle_key_closed(&mut self, key: KeyEvent) -> ComponentResult<String> {
        match key.code {
            KeyCode::Down | KeyCode::Enter => {
                self.open_with(true);
                ComponentResult::Handled
            }
            KeyCode::Delete if !self.value.is_empty() => self.clear(),
            KeyCode::Char(c) => {
                self.input(c.encode_utf8(&mut [0; 4]));
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn handle_key_open(&mut self, key: KeyEvent) -> ComponentResult<String> {
        match key.code {
            KeyCode::Up => {
                self.move_up();
                ComponentResult::Handled
            }
            KeyCode::Down => {
                self.move_down();
                ComponentResult::Handled
            }
            KeyCode::Enter => self.commit_highlighted(),
            KeyCode::Esc => {
                self.dismiss();
                ComponentResult::Cancelled
            }
            // Let focus move on.
            KeyCode::Tab | KeyCode::BackTab => {
                self.dismiss();
                ComponentResult::NotHandled
            }
            KeyCode::Backspace => {
                self.backspace();
                ComponentResult::Handled
            }
            KeyCode::Char(c) => {
                self.input(c.encode_utf8(&mut [0; 4]));
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }
}

impl Component for SearchableSelect {
    type Output = String;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.render_select(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<String> {
        if key.kind == KeyEventKind::Release || self.disabled {
            return ComponentResult::NotHandled;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return ComponentResult::NotHandled;
        }

        if self.is_open() {
            self.handle_key_open(key)
        } else {
            self.handle_key_closed(key)
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> ComponentResult<String> {
        if self.disabled {
            return ComponentResult::NotHandled;
        }
        let (column, row) = (event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (on_clear, option, on_field, inside) = {
                    let core = self.core.borrow();
                    (
                        core.hits.on_clear(column, row),
                        core.hits.option_at(column, row),
                        core.hits.on_field(column, row),
                        core.hits.contains(column, row),
                    )
                };

                if on_clear && !self.value.is_empty() && !self.is_open() {
                    return self.clear();
                }
                if let Some(position) = option {
                    return self.select_option(position);
                }
                if on_field {
                    self.focused = true;
                    self.open_with(false);
                    return ComponentResult::Handled;
                }
                if !inside && self.dismiss() {
                    // The click still belongs to whatever was under it.
                    return ComponentResult::NotHandled;
                }
                if inside {
                    ComponentResult::Handled
                } else {
                    ComponentResult::NotHandled
                }
            }
            MouseEventKind::Down(_) => {
                if !self.core.borrow().hits.contains(column, row) {
                    self.dismiss();
                }
                ComponentResult::NotHandled
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
                if self.is_open() && self.core.borrow().hits.on_dropdown(column, row) =>
            {
                if event.kind == MouseEventKind::ScrollDown {
                    self.move_down();
                } else {
                    self.move_up();
                }
                ComponentResult::Handled
            }
            MouseEventKind::Moved if self.is_open() => {
                let option = self.core.borrow().hits.option_at(column, row);
                match option {
                    Some(position) => {
                        self.core.borrow_mut().highlight(position);
                        ComponentResult::Handled
                    }
                    None => ComponentResult::NotHandled,
                }
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        self.focus()
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.dismiss();
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.disabled {
            return Vec::new();
        }
        if self.is_open() {
            vec![
                ("↑↓", "Navigate"),
                ("Enter", "Select"),
                ("Esc", "Cancel"),
                ("Type", "Search"),
            ]
        } else if self.value.is_empty() {
            vec![("Enter", "Open"), ("Type", "Search")]
        } else {
            vec![("Enter", "Open"), ("Del", "Clear")]
        }
    }

    fn on_hide(&mut self) {
        self.dismiss();
    }

    fn desired_size(&self) -> (u16, u16, u16, u16) {
        let height = self.desired_height();
        (12, height, u16::MAX, height)
    }
}
