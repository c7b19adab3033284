//! # CardList Component
//!
//! Scrollable column of prompt cards below the tag row.
//!
//! `CardList` is transient (built each frame) and wraps a persistent
//! `&'a mut CardListState`, the same split used by the other stateful
//! components. Card heights are recomputed each frame; the feed never holds
//! more than `card_limit` prompts.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::feed::PromptRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::prompt_card::{CardRenderer, CardWidget};
use crate::tui::event::TuiEvent;

/// Blank rows between cards
const CARD_SPACING: u16 = 1;

/// Scroll state for the card list. Lives in `TuiState`.
#[derive(Default)]
pub struct CardListState {
    pub scroll_state: ScrollViewState,
    /// Heights of the cards drawn last frame.
    pub heights: Vec<u16>,
    /// Last known viewport height (for clamping between frames)
    pub viewport_height: u16,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    fn content_height(&self) -> u16 {
        let cards: u16 = self.heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h));
        let gaps = u16::try_from(self.heights.len().saturating_sub(1))
            .unwrap_or(u16::MAX)
            .saturating_mul(CARD_SPACING);
        cards.saturating_add(gaps)
    }

    /// Keep the offset inside the content.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    /// Back to the top, used whenever a new feed is requested.
    pub fn reset(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }
}

impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub prompts: &'a [PromptRecord],
    pub renderer: &'a dyn CardRenderer,
    pub is_loading: bool,
    pub error: Option<&'a str>,
}

impl<'a> CardList<'a> {
    fn render_notice(frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let line_area = Rect { height: area.height.min(1), ..area };
        frame.render_widget(
            Paragraph::new(text.to_string())
                .style(style)
                .alignment(Alignment::Center),
            line_area,
        );
    }
}

impl<'a> Component for CardList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.state.viewport_height = area.height;

        if let Some(error) = self.error {
            self.state.heights.clear();
            Self::render_notice(
                frame,
                area,
                &format!("Could not load prompts: {error}"),
                Style::default().fg(Color::Red),
            );
            return;
        }

        if self.prompts.is_empty() {
            self.state.heights.clear();
            let text = if self.is_loading {
                "Loading prompts..."
            } else {
                "No prompts match this filter."
            };
            Self::render_notice(
                frame,
                area,
                text,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            );
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar column
        let renderer = self.renderer;
        self.state.heights = self
            .prompts
            .iter()
            .map(|p| renderer.height(p, content_width))
            .collect();
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.content_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (record, height) in self.prompts.iter().zip(&self.state.heights) {
            let card_area = Rect::new(0, y, content_width, *height);
            scroll_view.render_widget(
                CardWidget { renderer, record },
                card_area,
            );
            y = y.saturating_add(*height).saturating_add(CARD_SPACING);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
