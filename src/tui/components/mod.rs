//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status line
//! - `Header`: Prompt count, active filter chip and mode toggle
//! - `TagRow`: Tag chips with the expand/collapse control
//! - `PromptCard`: One prompt record
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `CardList`: Scrollable column of cards over a persistent `CardListState`
//!
//! Components that draw clickable chips record them in the frame's
//! `HitMap` while rendering, so mouse handling sees exactly what was drawn.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (Top status line)
//! ├── header.rs       (Count, filter chip, mode toggle)
//! ├── tag_row.rs      (Tag chips)
//! ├── prompt_card.rs  (Single card renderer)
//! └── card_list.rs    (Scrollable card container)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod card_list;
pub mod header;
pub mod prompt_card;
pub mod tag_row;
pub use card_list::{CardList, CardListState};
pub use header::Header;
pub use prompt_card::{CardRenderer, PromptCard};
pub use tag_row::TagRow;
