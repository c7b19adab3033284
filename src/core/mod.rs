//! # Core Application Logic
//!
//! This module contains the panel's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • tag row measurement  │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │    Feed    │
//!         │  Adapter   │                  │  sources   │
//!         │ (ratatui)  │                  │ file/http  │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`catalog`]: The ordered tag list
//! - [`layout`]: How many tags fit on one line, expand/collapse
//! - [`selection`]: Active tag filter and feed mode
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod catalog;
pub mod config;
pub mod layout;
pub mod selection;
pub mod state;
