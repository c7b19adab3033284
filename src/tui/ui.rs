use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CardList, Header, TagRow, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const HELP_TEXT: &str =
    "←/→ focus  ⏎ select  e more/less  x clear  tab mode  ↑/↓ scroll  r refresh  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    tui.hits.clear();

    let area = frame.area().inner(Margin {
        horizontal: 1,
        vertical: 0,
    });
    let tags = app.visible_tags();
    let show_control = !app.catalog.is_empty();
    let tag_height = TagRow::required_height(
        tags,
        &app.metrics,
        &app.icons,
        app.layout.is_expanded,
        show_control,
        area.width,
    );

    let layout = Layout::vertical([
        Length(1),          // title
        Length(1),          // header
        Length(1),          // "Popular tags"
        Length(tag_height), // tag row
        Length(1),          // spacer
        Min(0),             // cards
        Length(1),          // footer
    ]);
    let [title_area, header_area, label_area, tags_area, _, cards_area, footer_area] =
        layout.areas(area);

    TitleBar::new(
        app.source.name().to_string(),
        app.status_message.clone(),
        app.is_loading,
        spinner_frame,
    )
    .render(frame, title_area);

    Header {
        total: app.total_prompts,
        selected: app.selection.selected(),
        mode: app.mode,
        metrics: &app.metrics,
        icons: &app.icons,
        hits: &mut tui.hits,
    }
    .render(frame, header_area);

    frame.render_widget(
        Span::styled("Popular tags", Style::default().fg(Color::Gray)),
        label_area,
    );

    TagRow {
        tags,
        is_expanded: app.layout.is_expanded,
        show_control,
        selected: app.selection.selected(),
        focused: tui.tag_focus,
        metrics: &app.metrics,
        icons: &app.icons,
        hits: &mut tui.hits,
    }
    .render(frame, tags_area);
    tui.tag_row_width = Some(tags_area.width);

    let shown = app.prompts.len().min(app.card_limit);
    CardList {
        state: &mut tui.card_list,
        prompts: &app.prompts[..shown],
        renderer: tui.card_renderer.as_ref(),
        is_loading: app.is_loading,
        error: app.error.as_deref(),
    }
    .render(frame, cards_area);

    draw_footer(frame, footer_area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Line::from(Span::styled(
            HELP_TEXT,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{record, test_app};
    use crate::tui::hit_map::ChipTarget;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        screen(&terminal)
    }

    #[test]
    fn test_layout_top_to_bottom() {
        let mut app = test_app();
        // 41 columns, minus the 1-column margins, gives the 39-cell tag row
        app.measure_tag_row(Some(39)).unwrap();
        let mut tui = TuiState::new();

        let lines = draw(&app, &mut tui, 41, 12);
        assert!(lines[0].contains("Prompt Commons (noop)"));
        assert!(lines[1].contains("0 Prompts"));
        assert!(lines[2].contains("Popular tags"));
        assert_eq!(lines[3], "  writing   research   science   + more  ");
        assert!(lines[11].contains("q quit") || lines[11].contains("←/→"));
        assert_eq!(tui.tag_row_width, Some(39));
    }

    #[test]
    fn test_hits_cover_header_and_tag_row() {
        let mut app = test_app();
        app.measure_tag_row(Some(39)).unwrap();
        update(&mut app, Action::SelectTag("research".to_string()));
        let mut tui = TuiState::new();

        draw(&app, &mut tui, 41, 12);
        let targets: Vec<&ChipTarget> = tui.hits.hits().iter().map(|h| &h.target).collect();
        assert!(targets.contains(&&ChipTarget::ClearFilter));
        assert!(targets.contains(&&ChipTarget::ExpandControl));
        assert!(targets.contains(&&ChipTarget::Tag("science".to_string())));
    }

    #[test]
    fn test_expanded_row_grows_and_cards_follow() {
        let mut app = test_app();
        app.measure_tag_row(Some(39)).unwrap();
        update(&mut app, Action::ToggleTagList);
        app.prompts = vec![record("Haiku maker", &["poetry"], 5, "2024-01-01T00:00:00Z")];
        app.is_loading = false;
        let mut tui = TuiState::new();

        let lines = draw(&app, &mut tui, 41, 40);
        let joined = lines.join("\n");
        assert!(joined.contains("- less"));
        assert!(joined.contains("language"));
        assert!(joined.contains("Haiku maker"));
    }

    #[test]
    fn test_cards_are_bounded_by_card_limit() {
        let mut app = test_app();
        app.card_limit = 1;
        app.prompts = vec![
            record("First card", &[], 5, "2024-01-01T00:00:00Z"),
            record("Second card", &[], 4, "2024-01-01T00:00:00Z"),
        ];
        let mut tui = TuiState::new();

        let joined = draw(&app, &mut tui, 60, 30).join("\n");
        assert!(joined.contains("First card"));
        assert!(!joined.contains("Second card"));
    }
}
