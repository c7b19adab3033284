//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the panel,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! All pending events are drained before the next draw, and a burst that
//! changes the query several times starts one fetch for the final query.
//!
//! ## Tag Row Measurement
//!
//! How many tags fit on the collapsed row depends on the width the row was
//! actually given. After each draw the loop compares that width with the
//! last measured one and re-measures when it changed, so the first measurement
//! happens once the row exists and later ones follow terminal resizes. A
//! changed count triggers an immediate redraw.

mod component;
mod components;
mod event;
mod hit_map;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::selection::FeedMode;
use crate::core::state::App;
use crate::feed::PromptSource;
use crate::tui::component::EventHandler;
use crate::tui::components::{CardListState, CardRenderer, PromptCard, TagRow};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::hit_map::{ChipTarget, HitMap};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub card_list: CardListState,
    /// Clickable chips drawn in the last frame
    pub hits: HitMap,
    /// Keyboard focus in the tag row: visible tags first, then the control
    pub tag_focus: Option<usize>,
    /// Width the tag row got in the last frame
    pub tag_row_width: Option<u16>,
    /// Width the last successful measurement used
    pub measured_width: Option<u16>,
    pub card_renderer: Box<dyn CardRenderer>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            card_list: CardListState::new(),
            hits: HitMap::default(),
            tag_focus: None,
            tag_row_width: None,
            measured_width: None,
            card_renderer: Box::new(PromptCard),
        }
    }

    /// Whether the tag row needs measuring for the width it was last drawn at.
    fn needs_measure(&self) -> Option<u16> {
        match self.tag_row_width {
            Some(width) if width > 0 && self.measured_width != Some(width) => Some(width),
            _ => None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(config: &ResolvedConfig, source: Arc<dyn PromptSource>) -> std::io::Result<()> {
    let mut app = App::from_config(source, config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &mut app, &mut tui),
        Err(e) => Err(e),
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut active_fetch: Option<tokio::task::AbortHandle> = None;

    if update(app, Action::Refresh) == Effect::FetchFeed {
        active_fetch = Some(spawn_fetch(app, tx.clone(), active_fetch.take()));
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;

            // At most one measurement per iteration, and only once the row exists
            if let Some(width) = tui.needs_measure() {
                let changed = app
                    .measure_tag_row(Some(width))
                    .map_err(std::io::Error::other)?;
                tui.measured_width = Some(width);
                if changed {
                    debug!(
                        "Tag row at width {} now fits {} tags",
                        width, app.layout.max_tags_one_line
                    );
                    clamp_focus(app, tui);
                    needs_redraw = true;
                    continue;
                }
            }
        }

        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let burst = apply_events(
            first_event
                .into_iter()
                .chain(std::iter::from_fn(poll_event_immediate)),
            app,
            tui,
        );
        needs_redraw |= burst.redraw;
        if burst.quit {
            info!("Quit requested");
            break;
        }
        if burst.fetch {
            active_fetch = Some(spawn_fetch(app, tx.clone(), active_fetch.take()));
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            match update(app, action) {
                Effect::Quit => return Ok(()),
                Effect::FetchFeed => {
                    active_fetch = Some(spawn_fetch(app, tx.clone(), active_fetch.take()));
                }
                Effect::None => {}
            }
        }
    }

    if let Some(handle) = active_fetch {
        handle.abort();
    }
    Ok(())
}

/// What a burst of terminal events asks of the loop.
#[derive(Debug, Default, PartialEq, Eq)]
struct Burst {
    redraw: bool,
    /// Fetch the final query once, however many actions changed it.
    fetch: bool,
    quit: bool,
}

/// Apply every event in order, then report what the loop must do once.
fn apply_events(
    events: impl IntoIterator<Item = TuiEvent>,
    app: &mut App,
    tui: &mut TuiState,
) -> Burst {
    let mut burst = Burst::default();
    for event in events {
        burst.redraw = true;
        let Some(action) = route_event(event, app, tui) else {
            continue;
        };
        match update(app, action) {
            Effect::Quit => burst.quit = true,
            Effect::FetchFeed => {
                tui.card_list.reset();
                burst.fetch = true;
            }
            Effect::None => {}
        }
        clamp_focus(app, tui);
    }
    burst
}

/// Translate a terminal event into an action, handling TUI-local events
/// (focus, scrolling) directly.
fn route_event(event: TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::ToggleTags => {
            if tui.tag_focus.is_some() {
                tui.tag_focus = Some(control_index_after_toggle(app));
            }
            Some(Action::ToggleTagList)
        }
        TuiEvent::ClearFilter => Some(Action::ClearTag),
        TuiEvent::CycleMode => Some(Action::CycleMode),
        TuiEvent::ModePopular => Some(Action::SetMode(FeedMode::Popular)),
        TuiEvent::ModeNew => Some(Action::SetMode(FeedMode::New)),
        TuiEvent::Refresh => Some(Action::Refresh),
        // Redraw is already flagged; the width check after it re-measures
        TuiEvent::Resize => None,
        TuiEvent::FocusPrev | TuiEvent::FocusNext => {
            let count = focusable_count(app);
            if count == 0 {
                tui.tag_focus = None;
                return None;
            }
            tui.tag_focus = Some(match (tui.tag_focus, event) {
                (None, TuiEvent::FocusNext) => 0,
                (None, _) => count - 1,
                (Some(i), TuiEvent::FocusNext) => (i + 1) % count,
                (Some(i), _) => (i + count - 1) % count,
            });
            None
        }
        TuiEvent::Activate => {
            let index = tui.tag_focus?;
            let tags = app.visible_tags();
            if let Some(tag) = tags.get(index) {
                Some(Action::SelectTag(tag.clone()))
            } else if index == tags.len() && !app.catalog.is_empty() {
                tui.tag_focus = Some(control_index_after_toggle(app));
                Some(Action::ToggleTagList)
            } else {
                None
            }
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.card_list.handle_event(&event);
            None
        }
        TuiEvent::MouseClick(column, row) => {
            let target = tui.hits.hit(column, row)?.clone();
            debug!("Click at ({}, {}) on {:?}", column, row, target);
            match target {
                ChipTarget::Tag(tag) => Some(Action::SelectTag(tag)),
                ChipTarget::ExpandControl => {
                    if tui.tag_focus.is_some() {
                        tui.tag_focus = Some(control_index_after_toggle(app));
                    }
                    Some(Action::ToggleTagList)
                }
                ChipTarget::ClearFilter => Some(Action::ClearTag),
                ChipTarget::Mode(mode) => Some(Action::SetMode(mode)),
            }
        }
    }
}

fn focusable_count(app: &App) -> usize {
    TagRow::focusable_count(app.visible_tags().len(), !app.catalog.is_empty())
}

/// Where the control will sit once the row flips, so focus stays on it.
fn control_index_after_toggle(app: &App) -> usize {
    let mut flipped = app.layout;
    flipped.toggle_expanded();
    flipped.visible_count(app.catalog.len())
}

fn clamp_focus(app: &App, tui: &mut TuiState) {
    let count = focusable_count(app);
    tui.tag_focus = match tui.tag_focus {
        Some(_) if count == 0 => None,
        Some(i) => Some(i.min(count - 1)),
        None => None,
    };
}

/// Start fetching the current query on a background task, cancelling the
/// previous fetch if it is still running.
fn spawn_fetch(
    app: &App,
    tx: mpsc::Sender<Action>,
    previous: Option<tokio::task::AbortHandle>,
) -> tokio::task::AbortHandle {
    if let Some(handle) = previous {
        handle.abort();
    }

    let source = app.source.clone();
    let query = app.feed_query();
    let generation = app.fetch_generation;
    info!(
        "Spawning fetch #{} from {} ({:?}, tag {:?}, limit {})",
        generation,
        source.name(),
        query.mode,
        query.tag,
        query.limit
    );

    let handle = tokio::spawn(async move {
        let action = match source.fetch(&query).await {
            Ok(page) => Action::FeedLoaded { generation, page },
            Err(e) => Action::FeedFailed {
                generation,
                message: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send fetch #{} result: receiver dropped", generation);
        }
    });
    handle.abort_handle()
}
