//! # Application State
//!
//! Core state for the prompt panel. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn PromptSource>   // where prompts come from
//! ├── catalog: TagCatalog             // filter tags, fixed at construction
//! ├── layout: LayoutState             // one-line capacity + expanded flag
//! ├── selection: SelectionState       // active tag filter
//! ├── mode: FeedMode                  // Popular / New
//! ├── metrics, icons                  // how chips are sized and labelled
//! ├── prompts, total_prompts          // last page received
//! ├── is_loading, error, status       // fetch progress
//! └── fetch_generation: u64           // id of the newest fetch
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! apart from the tag row measurement, which needs a width only the
//! renderer knows.

use std::sync::Arc;

use crate::core::catalog::TagCatalog;
use crate::core::config::{DEFAULT_CARD_LIMIT, ResolvedConfig};
use crate::core::layout::{ChipIcons, LayoutError, LayoutState, TerminalChipMetrics};
use crate::core::selection::{FeedMode, SelectionState};
use crate::feed::{FeedQuery, PromptRecord, PromptSource, TagCount};

pub struct App {
    pub source: Arc<dyn PromptSource>,
    pub catalog: TagCatalog,
    pub layout: LayoutState,
    pub selection: SelectionState,
    pub mode: FeedMode,
    pub metrics: TerminalChipMetrics,
    pub icons: ChipIcons,
    /// Most cards requested from the source and shown.
    pub card_limit: usize,
    pub prompts: Vec<PromptRecord>,
    /// Prompts matching the current filter, including those not fetched.
    pub total_prompts: usize,
    /// From the latest page; empty when the source reports none.
    pub tag_counts: Vec<TagCount>,
    pub status_message: String,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped for every fetch; responses carrying an older value are stale.
    pub fetch_generation: u64,
}

impl App {
    pub fn new(source: Arc<dyn PromptSource>, catalog: TagCatalog) -> Self {
        Self {
            source,
            catalog,
            layout: LayoutState::default(),
            selection: SelectionState::default(),
            mode: FeedMode::default(),
            metrics: TerminalChipMetrics::default(),
            icons: ChipIcons::default(),
            card_limit: DEFAULT_CARD_LIMIT,
            prompts: Vec::new(),
            total_prompts: 0,
            tag_counts: Vec::new(),
            status_message: String::from("Welcome to the prompt commons!"),
            is_loading: false,
            error: None,
            fetch_generation: 0,
        }
    }

    pub fn from_config(source: Arc<dyn PromptSource>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(source, config.catalog.clone());
        app.mode = config.mode;
        app.metrics = config.metrics;
        app.icons = config.icons.clone();
        app.card_limit = config.card_limit;
        app
    }

    /// The request matching the current mode and filter.
    pub fn feed_query(&self) -> FeedQuery {
        FeedQuery {
            mode: self.mode,
            tag: self.selection.selected().map(str::to_string),
            limit: self.card_limit,
        }
    }

    /// Recompute how many tags fit on one line of a tag row `width` cells wide.
    ///
    /// Returns `Ok(true)` if the collapsed row changed.
    pub fn measure_tag_row(&mut self, width: Option<u16>) -> Result<bool, LayoutError> {
        self.layout
            .remeasure(&self.metrics, &self.icons, width, &self.catalog)
    }

    pub fn tag_count(&self, tag: &str) -> Option<u64> {
        self.tag_counts
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.prompt_count)
    }

    /// The catalog tags currently shown in the tag row.
    pub fn visible_tags(&self) -> &[String] {
        self.catalog
            .prefix(self.layout.visible_count(self.catalog.len()))
    }
}
