//! Busy indicator: a braille glyph cycling in front of a status text.
//!
//! The table shows it instead of its body while data loads; the select shows
//! it in the dropdown while a remote search is in flight.

use lifeline_core::style::{ACCENT, TEXT_DIM};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone)]
pub struct LoadingSpinner {
    frame: usize,
    text: String,
}

impl LoadingSpinner {
    /// A spinner showing `text`, e.g. the configured loading message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            frame: 0,
            text: text.into(),
        }
    }

    /// Next frame. Widgets forward their host's tick here.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

impl Widget for &LoadingSpinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_string(area.x, area.y, self.glyph(), Style::default().fg(ACCENT));
        if area.width > 2 {
            let room = usize::from(area.width - 2);
            buf.set_stringn(area.x + 2, area.y, &self.text, room, Style::default().fg(TEXT_DIM));
        }
    }
}
