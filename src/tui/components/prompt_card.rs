//! # PromptCard Component
//!
//! Renders one prompt record as a bordered card. The card list knows nothing
//! about what is inside a card; it only asks a [`CardRenderer`] how tall a
//! card is and where to draw it, so the card can be swapped out.
//!
//! ```text
//! ┌ ✍ Improve writing flow ─────────────────────────┐
//! │ Smooths out awkward sentences and tightens      │
//! │ wording while keeping the author's voice.       │
//! │ › Improve the flow of the following text...     │
//! │ #writing #editing                               │
//! │ Maya Chen · 1843 runs · 2023-11-02              │
//! └─────────────────────────────────────────────────┘
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::feed::PromptRecord;

/// Border (2) + padding (2) consumed horizontally by the card block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
const VERTICAL_OVERHEAD: u16 = 2;
const MAX_DESCRIPTION_LINES: usize = 3;
const MAX_PROMPT_LINES: usize = 1;

/// Draws a single prompt record.
pub trait CardRenderer {
    /// Rows the card for `record` needs at `width`.
    fn height(&self, record: &PromptRecord, width: u16) -> u16;

    fn render(&self, record: &PromptRecord, area: Rect, buf: &mut Buffer);
}

/// Adapter so any `CardRenderer` can be handed to APIs that take a `Widget`.
pub struct CardWidget<'a> {
    pub renderer: &'a dyn CardRenderer,
    pub record: &'a PromptRecord,
}

impl Widget for CardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.renderer.render(self.record, area, buf);
    }
}

/// The default card.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptCard;

impl PromptCard {
    fn body(record: &PromptRecord, inner_width: u16) -> Vec<Line<'static>> {
        let width = usize::from(inner_width.max(1));
        let mut lines = Vec::new();

        for text in wrap_capped(&record.description, width, MAX_DESCRIPTION_LINES) {
            lines.push(Line::from(text));
        }

        let prompt_prefix = "› ";
        for text in wrap_capped(
            &record.prompt_text,
            width.saturating_sub(prompt_prefix.len()).max(1),
            MAX_PROMPT_LINES,
        ) {
            lines.push(Line::from(vec![
                Span::styled(prompt_prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(text, Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
            ]));
        }

        if !record.tags.is_empty() {
            let tags = record
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                truncate_to_width(&tags, width),
                Style::default().fg(Color::Cyan),
            )));
        }

        let mut meta = format!(
            "{} · {} runs · {}",
            record.author_name,
            record.run_count,
            record.created_at.format("%Y-%m-%d")
        );
        if record.is_fork() {
            meta.push_str(" · fork");
        }
        lines.push(Line::from(Span::styled(
            truncate_to_width(&meta, width),
            Style::default().fg(Color::DarkGray),
        )));

        lines
    }

    fn title(record: &PromptRecord) -> String {
        if record.icon_ref.is_empty() {
            format!(" {} ", record.title)
        } else {
            format!(" {} {} ", record.icon_ref, record.title)
        }
    }
}

impl CardRenderer for PromptCard {
    fn height(&self, record: &PromptRecord, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        let body = u16::try_from(Self::body(record, inner).len()).unwrap_or(u16::MAX);
        body.saturating_add(VERTICAL_OVERHEAD)
    }

    fn render(&self, record: &PromptRecord, area: Rect, buf: &mut Buffer) {
        let inner = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let block = Block::bordered()
            .title(Self::title(record))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        Paragraph::new(Self::body(record, inner))
            .block(block)
            .render(area, buf);
    }
}

/// Wrap `text` to `width` columns, keeping at most `max_lines` lines. A cut
/// is marked with a trailing ellipsis.
fn wrap_capped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || max_lines == 0 {
        return Vec::new();
    }

    let wrapped = textwrap::wrap(text, textwrap::Options::new(width).break_words(true));
    let truncated = wrapped.len() > max_lines;
    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(max_lines)
        .map(|l| l.into_owned())
        .collect();

    if truncated {
        if let Some(last) = lines.last_mut() {
            let kept = truncate_to_width(last, width.saturating_sub(1));
            *last = format!("{}…", kept.trim_end());
        }
    }
    lines
}

/// Longest prefix of `text` that is at most `width` columns wide.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
