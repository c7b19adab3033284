//! # TitleBar Component
//!
//! Top status line: source name and the current status message, with a
//! spinner while a fetch is in flight.
//!
//! 1. **Loading**: `"Prompt Commons (bundled) | ⠋ Loading..."`
//! 2. **Status message**: `"Prompt Commons (bundled) | Popular · tagged music"`
//! 3. **Default**: `"Prompt Commons (bundled)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stateless title bar. All fields are props.
pub struct TitleBar {
    pub source_name: String,
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(source_name: String, status_message: String, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            source_name,
            status_message,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Prompt Commons", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({})", self.source_name)),
        ];

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::raw(format!(" | {} {}", spinner, self.status_message)));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
