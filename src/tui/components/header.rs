//! # Header Component
//!
//! The line above the tag row:
//!
//! ```text
//! 205 Prompts  tagged [ research × ]                  Popular  New
//! ```
//!
//! The filter chip only appears while a tag is selected, and clicking it
//! clears the filter. The mode labels on the right are clickable too.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::core::layout::{ChipIcons, TerminalChipMetrics};
use crate::core::selection::FeedMode;
use crate::tui::component::Component;
use crate::tui::hit_map::{ChipTarget, HitMap};

const MODES: [FeedMode; 2] = [FeedMode::Popular, FeedMode::New];

pub struct Header<'a> {
    pub total: usize,
    pub selected: Option<&'a str>,
    pub mode: FeedMode,
    pub metrics: &'a TerminalChipMetrics,
    pub icons: &'a ChipIcons,
    pub hits: &'a mut HitMap,
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

impl<'a> Header<'a> {
    /// Draw `text` at column `x` of `area`. Returns the column after it.
    fn put(frame: &mut Frame, area: Rect, x: u16, text: String, style: Style) -> (Rect, u16) {
        let width = text_width(&text).min(area.right().saturating_sub(x));
        let rect = Rect::new(x, area.y, width, 1);
        if width > 0 {
            frame.render_widget(Span::styled(text, style), rect);
        }
        (rect, x.saturating_add(width))
    }
}

impl<'a> Component for Header<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let area = Rect { height: 1, ..area };

        // Mode toggle, right-aligned
        let mode_labels: Vec<String> = MODES.iter().map(|m| format!(" {} ", m.label())).collect();
        let toggle_width: u16 = mode_labels.iter().map(|l| text_width(l)).sum();
        let mut x = area.right().saturating_sub(toggle_width).max(area.x);
        let toggle_start = x;
        for (mode, label) in MODES.iter().zip(mode_labels) {
            let style = if *mode == self.mode {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let (rect, next) = Self::put(frame, area, x, label, style);
            self.hits.push(rect, ChipTarget::Mode(*mode));
            x = next;
        }

        // Prompt count and filter chip share the space left of the toggle
        let left = Rect {
            width: toggle_start.saturating_sub(area.x),
            ..area
        };
        let (_, mut x) = Self::put(
            frame,
            left,
            left.x,
            format!("{} Prompts", self.total),
            Style::default().add_modifier(Modifier::BOLD),
        );

        if let Some(tag) = self.selected {
            let (_, next) = Self::put(
                frame,
                left,
                x,
                "  tagged ".to_string(),
                Style::default().fg(Color::Gray),
            );
            x = next;
            let chip = self.metrics.chip_text(&format!("{} {}", tag, self.icons.clear));
            let (rect, _) = Self::put(
                frame,
                left,
                x,
                chip,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            self.hits.push(rect, ChipTarget::ClearFilter);
        }
    }
}
