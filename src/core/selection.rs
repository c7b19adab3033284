//! # Selection and Feed Mode
//!
//! Which tag filters the feed (at most one) and which ordering the feed is
//! requested in. Both are small total state machines: nothing here can fail.

use clap::ValueEnum;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::catalog::TagCatalog;

/// Ordering requested from the feed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    #[default]
    Popular,
    New,
}

impl FeedMode {
    /// The other mode (Popular ↔ New).
    pub fn next(self) -> FeedMode {
        match self {
            FeedMode::Popular => FeedMode::New,
            FeedMode::New => FeedMode::Popular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedMode::Popular => "Popular",
            FeedMode::New => "New",
        }
    }

    /// Value sent to remote sources.
    pub fn as_query(self) -> &'static str {
        match self {
            FeedMode::Popular => "popular",
            FeedMode::New => "new",
        }
    }
}

/// What a call to [`SelectionState::select_tag`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Cleared,
    /// The tag is not in the catalog; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_tag: Option<String>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected() == Some(tag)
    }

    /// Select `tag`, or clear the selection if `tag` is already selected.
    pub fn select_tag(&mut self, catalog: &TagCatalog, tag: &str) -> SelectOutcome {
        if self.is_selected(tag) {
            debug!("Deselecting tag '{}'", tag);
            self.selected_tag = None;
            return SelectOutcome::Cleared;
        }
        if !catalog.contains(tag) {
            warn!("Ignoring selection of unknown tag '{}'", tag);
            return SelectOutcome::Ignored;
        }
        debug!("Selecting tag '{}'", tag);
        self.selected_tag = Some(tag.to_string());
        SelectOutcome::Selected
    }

    /// Drop the selection. Returns true if a tag was selected.
    pub fn clear(&mut self) -> bool {
        self.selected_tag.take().is_some()
    }
}

/// Replace `current` with `mode`. Returns true if it changed.
pub fn set_mode(current: &mut FeedMode, mode: FeedMode) -> bool {
    if *current == mode {
        return false;
    }
    debug!("Feed mode {:?} -> {:?}", current, mode);
    *current = mode;
    true
}
