//! # TagRow Component
//!
//! The row of tag chips under "Popular tags", followed by the expand/collapse
//! control.
//!
//! Chips are positioned with the same `FlowRow` and `ChipMetrics` the core
//! measurement uses, so a collapsed row holding `max_tags_one_line` tags is
//! guaranteed to stay on one line. Expanded rows flow onto as many lines as
//! they need.
//!
//! Focus indices run over the visible tags first, then the control.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::layout::{ChipIcons, TerminalChipMetrics, flow_layout};
use crate::tui::component::Component;
use crate::tui::hit_map::{ChipTarget, HitMap};

pub struct TagRow<'a> {
    /// Tags to draw, already cut to the collapsed/expanded count.
    pub tags: &'a [String],
    pub is_expanded: bool,
    /// False when the catalog is empty; the row is then blank.
    pub show_control: bool,
    pub selected: Option<&'a str>,
    pub focused: Option<usize>,
    pub metrics: &'a TerminalChipMetrics,
    pub icons: &'a ChipIcons,
    pub hits: &'a mut HitMap,
}

impl<'a> TagRow<'a> {
    /// Chip labels in draw order.
    fn labels(tags: &[String], icons: &ChipIcons, is_expanded: bool, show_control: bool) -> Vec<String> {
        let mut labels: Vec<String> = tags.to_vec();
        if show_control {
            labels.push(icons.control_label(is_expanded));
        }
        labels
    }

    /// Lines the row needs at `width`. Never less than one.
    pub fn required_height(
        tags: &[String],
        metrics: &TerminalChipMetrics,
        icons: &ChipIcons,
        is_expanded: bool,
        show_control: bool,
        width: u16,
    ) -> u16 {
        if width == 0 {
            return 1;
        }
        let labels = Self::labels(tags, icons, is_expanded, show_control);
        let (_, height) = flow_layout(metrics, width, &labels);
        height.max(1)
    }

    /// Number of focusable chips (tags plus the control).
    pub fn focusable_count(tag_count: usize, show_control: bool) -> usize {
        tag_count + usize::from(show_control)
    }

    fn chip_style(&self, index: usize, is_control: bool) -> Style {
        let mut style = if is_control {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)
        } else if self.selected == Some(self.tags[index].as_str()) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        if self.focused == Some(index) {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        style
    }
}

impl<'a> Component for TagRow<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let labels = Self::labels(self.tags, self.icons, self.is_expanded, self.show_control);
        let (placements, _) = flow_layout(self.metrics, area.width, &labels);

        for (index, (label, placement)) in labels.iter().zip(placements).enumerate() {
            if placement.line >= area.height {
                break;
            }
            let chip_area = Rect::new(
                area.x + placement.x,
                area.y + placement.line,
                placement.width,
                1,
            );
            let is_control = self.show_control && index == labels.len() - 1;
            let style = self.chip_style(index, is_control);
            frame.render_widget(Span::styled(self.metrics.chip_text(label), style), chip_area);

            let target = if is_control {
                ChipTarget::ExpandControl
            } else {
                ChipTarget::Tag(label.clone())
            };
            self.hits.push(chip_area, target);
        }
    }
}
