//! # Actions
//!
//! Everything that can happen in the panel becomes an `Action`.
//! User clicks a tag? That's `Action::SelectTag(tag)`.
//! Source responds? That's `Action::FeedLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns the `Effect` the caller should perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply actions, assert on state.
//! And debuggable: log every action, replay the exact session.

use log::{debug, info, warn};

use crate::core::selection::{FeedMode, SelectOutcome, set_mode};
use crate::core::state::App;
use crate::feed::FeedPage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Expand or collapse the tag row.
    ToggleTagList,
    /// Select a tag, or deselect it if it is the active filter.
    SelectTag(String),
    /// Remove the tag filter.
    ClearTag,
    SetMode(FeedMode),
    CycleMode,
    Refresh,
    FeedLoaded { generation: u64, page: FeedPage },
    FeedFailed { generation: u64, message: String },
    Quit,
}

/// Work the caller must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a fetch for `App::feed_query()` tagged with `App::fetch_generation`.
    FetchFeed,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action_name(&action));
    match action {
        Action::ToggleTagList => {
            app.layout.toggle_expanded();
            Effect::None
        }
        Action::SelectTag(tag) => match app.selection.select_tag(&app.catalog, &tag) {
            SelectOutcome::Ignored => Effect::None,
            SelectOutcome::Selected | SelectOutcome::Cleared => begin_fetch(app),
        },
        Action::ClearTag => {
            if app.selection.clear() {
                begin_fetch(app)
            } else {
                Effect::None
            }
        }
        Action::SetMode(mode) => {
            if set_mode(&mut app.mode, mode) {
                begin_fetch(app)
            } else {
                Effect::None
            }
        }
        Action::CycleMode => {
            let next = app.mode.next();
            update(app, Action::SetMode(next))
        }
        Action::Refresh => begin_fetch(app),
        Action::FeedLoaded { generation, page } => {
            if generation != app.fetch_generation {
                debug!(
                    "Dropping stale feed page (generation {}, current {})",
                    generation, app.fetch_generation
                );
                return Effect::None;
            }
            info!("Feed loaded: {} of {} prompts", page.prompts.len(), page.total);
            app.is_loading = false;
            app.error = None;
            app.total_prompts = page.total;
            app.prompts = page.prompts;
            app.tag_counts = page.tag_counts;
            app.status_message = status_for(app);
            Effect::None
        }
        Action::FeedFailed {
            generation,
            message,
        } => {
            if generation != app.fetch_generation {
                debug!("Dropping stale feed error (generation {})", generation);
                return Effect::None;
            }
            warn!("Feed failed: {}", message);
            app.is_loading = false;
            app.status_message = "Could not load prompts".to_string();
            app.error = Some(message);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn begin_fetch(app: &mut App) -> Effect {
    app.fetch_generation += 1;
    app.is_loading = true;
    app.status_message = "Loading...".to_string();
    Effect::FetchFeed
}

fn status_for(app: &App) -> String {
    match app.selection.selected() {
        Some(tag) => match app.tag_count(tag) {
            Some(count) => format!("{} · tagged {} ({})", app.mode.label(), tag, count),
            None => format!("{} · tagged {}", app.mode.label(), tag),
        },
        None => app.mode.label().to_string(),
    }
}

/// Variant name only; pages are too large to log on every update.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::ToggleTagList => "ToggleTagList",
        Action::SelectTag(_) => "SelectTag",
        Action::ClearTag => "ClearTag",
        Action::SetMode(_) => "SetMode",
        Action::CycleMode => "CycleMode",
        Action::Refresh => "Refresh",
        Action::FeedLoaded { .. } => "FeedLoaded",
        Action::FeedFailed { .. } => "FeedFailed",
        Action::Quit => "Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, test_app};

    fn page(titles: &[&str], total: usize) -> FeedPage {
        FeedPage {
            prompts: titles
                .iter()
                .map(|t| record(t, &["writing"], 1, "2024-01-01T00:00:00Z"))
                .collect(),
            total,
            tag_counts: Vec::new(),
        }
    }

    #[test]
    fn test_toggle_tag_list_flips_and_needs_no_fetch() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ToggleTagList), Effect::None);
        assert!(app.layout.is_expanded);
        assert_eq!(update(&mut app, Action::ToggleTagList), Effect::None);
        assert!(!app.layout.is_expanded);
    }

    #[test]
    fn test_select_and_deselect_request_fetches() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::SelectTag("research".to_string())),
            Effect::FetchFeed
        );
        assert_eq!(app.selection.selected(), Some("research"));
        assert_eq!(app.fetch_generation, 1);
        assert!(app.is_loading);

        assert_eq!(
            update(&mut app, Action::SelectTag("research".to_string())),
            Effect::FetchFeed
        );
        assert_eq!(app.selection.selected(), None);
        assert_eq!(app.fetch_generation, 2);
    }

    #[test]
    fn test_unknown_tag_does_nothing() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::SelectTag("cooking".to_string())),
            Effect::None
        );
        assert_eq!(app.fetch_generation, 0);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_clear_tag_only_fetches_when_something_was_selected() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ClearTag), Effect::None);

        update(&mut app, Action::SelectTag("art".to_string()));
        assert_eq!(update(&mut app, Action::ClearTag), Effect::FetchFeed);
        assert_eq!(app.selection.selected(), None);
    }

    #[test]
    fn test_set_mode_fetches_only_on_change() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SetMode(FeedMode::Popular)), Effect::None);
        assert_eq!(update(&mut app, Action::SetMode(FeedMode::New)), Effect::FetchFeed);
        assert_eq!(app.mode, FeedMode::New);
        assert_eq!(update(&mut app, Action::SetMode(FeedMode::New)), Effect::None);
    }

    #[test]
    fn test_cycle_mode() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::CycleMode), Effect::FetchFeed);
        assert_eq!(app.mode, FeedMode::New);
        update(&mut app, Action::CycleMode);
        assert_eq!(app.mode, FeedMode::Popular);
    }

    #[test]
    fn test_feed_loaded_stores_current_page() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        let generation = app.fetch_generation;

        update(
            &mut app,
            Action::FeedLoaded {
                generation,
                page: page(&["a", "b"], 205),
            },
        );
        assert!(!app.is_loading);
        assert_eq!(app.prompts.len(), 2);
        assert_eq!(app.total_prompts, 205);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_stale_page_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        let stale = app.fetch_generation;
        update(&mut app, Action::SetMode(FeedMode::New));

        update(
            &mut app,
            Action::FeedLoaded {
                generation: stale,
                page: page(&["old"], 1),
            },
        );
        assert!(app.prompts.is_empty());
        assert!(app.is_loading);
    }

    #[test]
    fn test_feed_failed_records_error_until_next_success() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        let generation = app.fetch_generation;
        update(
            &mut app,
            Action::FeedFailed {
                generation,
                message: "network error: refused".to_string(),
            },
        );
        assert_eq!(app.error.as_deref(), Some("network error: refused"));
        assert!(!app.is_loading);

        update(&mut app, Action::Refresh);
        let generation = app.fetch_generation;
        update(
            &mut app,
            Action::FeedLoaded {
                generation,
                page: page(&["a"], 1),
            },
        );
        assert!(app.error.is_none());
    }

    #[test]
    fn test_status_mentions_filter() {
        let mut app = test_app();
        update(&mut app, Action::SelectTag("music".to_string()));
        let generation = app.fetch_generation;
        update(
            &mut app,
            Action::FeedLoaded {
                generation,
                page: page(&[], 0),
            },
        );
        assert_eq!(app.status_message, "Popular · tagged music");
    }

    #[test]
    fn test_status_shows_reported_tag_count() {
        let mut app = test_app();
        update(&mut app, Action::SelectTag("music".to_string()));
        let generation = app.fetch_generation;
        let mut loaded = page(&["a"], 1);
        loaded.tag_counts = vec![crate::feed::TagCount {
            tag: "music".to_string(),
            prompt_count: 12,
        }];
        update(&mut app, Action::FeedLoaded { generation, page: loaded });
        assert_eq!(app.tag_count("music"), Some(12));
        assert_eq!(app.tag_count("art"), None);
        assert_eq!(app.status_message, "Popular · tagged music (12)");
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
