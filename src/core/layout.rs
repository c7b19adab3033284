//! # Tag Row Layout
//!
//! Decides how many catalog tags fit on a single line of the tag row, ahead
//! of an expand control, and tracks whether the row is expanded.
//!
//! ```text
//!  width W
//! ├──────────────────────────────────────────┤
//!  [ writing ] [ research ] [ science ] [ + more ]     collapsed, k = 3
//!
//!  [ writing ] [ research ] [ science ] [ technology ]
//!  [ art ] [ music ] ...                 [ - less ]    expanded
//! ```
//!
//! Measurement works like dropping chips into an invisible row: the control
//! goes in first to get the single-line height, then tags are added one at a
//! time until the row grows a second line. The row is a [`FlowRow`] borrowed
//! from the measuring call and gone when it returns.
//!
//! Chip sizes come from a [`ChipMetrics`] implementation. The tag row
//! component renders with the same metrics and the same [`FlowRow`], so what
//! was measured is what gets drawn.

use std::fmt;

use log::debug;
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::TagCatalog;

/// Tags shown collapsed before the first measurement has run.
pub const DEFAULT_MAX_TAGS_ONE_LINE: usize = 3;

pub const MORE_LABEL: &str = "more";
pub const LESS_LABEL: &str = "less";

// ============================================================================
// Chip Measurement
// ============================================================================

/// Sizes chips in terminal cells.
pub trait ChipMetrics {
    /// Width of the chip that renders `label`.
    fn chip_width(&self, label: &str) -> u16;

    /// Blank cells between two chips on the same line.
    fn gap(&self) -> u16;
}

/// Chips are the label's display width plus `padding` cells on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalChipMetrics {
    pub padding: u16,
    pub gap: u16,
}

impl Default for TerminalChipMetrics {
    fn default() -> Self {
        Self { padding: 1, gap: 1 }
    }
}

impl TerminalChipMetrics {
    /// The exact text drawn for a chip, padding included.
    pub fn chip_text(&self, label: &str) -> String {
        let pad = " ".repeat(self.padding as usize);
        format!("{pad}{label}{pad}")
    }
}

impl ChipMetrics for TerminalChipMetrics {
    fn chip_width(&self, label: &str) -> u16 {
        let text = u16::try_from(label.width()).unwrap_or(u16::MAX);
        text.saturating_add(self.padding.saturating_mul(2))
    }

    fn gap(&self) -> u16 {
        self.gap
    }
}

/// Glyphs drawn inside the expand control and the filter chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipIcons {
    pub expand: String,
    pub shrink: String,
    pub clear: String,
}

impl Default for ChipIcons {
    fn default() -> Self {
        Self {
            expand: "+".to_string(),
            shrink: "-".to_string(),
            clear: "×".to_string(),
        }
    }
}

impl ChipIcons {
    /// Label of the expand/collapse control for the given state.
    pub fn control_label(&self, is_expanded: bool) -> String {
        if is_expanded {
            format!("{} {}", self.shrink, LESS_LABEL)
        } else {
            format!("{} {}", self.expand, MORE_LABEL)
        }
    }
}

// ============================================================================
// Flow Row
// ============================================================================

/// Where a chip landed inside a flow row, relative to the row's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipPlacement {
    pub line: u16,
    pub x: u16,
    pub width: u16,
}

/// A row of fixed width that places chips left to right and starts a new
/// line when the next chip would overflow.
///
/// A chip wider than the whole row is clamped to the row width.
pub struct FlowRow<'m, M: ChipMetrics + ?Sized> {
    metrics: &'m M,
    width: u16,
    cursor: u16,
    lines: u16,
}

impl<'m, M: ChipMetrics + ?Sized> FlowRow<'m, M> {
    pub fn new(metrics: &'m M, width: u16) -> Self {
        Self {
            metrics,
            width,
            cursor: 0,
            lines: 0,
        }
    }

    pub fn push(&mut self, label: &str) -> ChipPlacement {
        let chip = self.metrics.chip_width(label).min(self.width);

        if self.lines == 0 {
            self.lines = 1;
            self.cursor = chip;
            return ChipPlacement {
                line: 0,
                x: 0,
                width: chip,
            };
        }

        let start = self.cursor.saturating_add(self.metrics.gap());
        if start.saturating_add(chip) > self.width {
            self.lines += 1;
            self.cursor = chip;
            ChipPlacement {
                line: self.lines - 1,
                x: 0,
                width: chip,
            }
        } else {
            self.cursor = start + chip;
            ChipPlacement {
                line: self.lines - 1,
                x: start,
                width: chip,
            }
        }
    }

    /// Number of lines the row currently occupies.
    pub fn height(&self) -> u16 {
        self.lines
    }
}

/// Place every label into a flow row of `width`, returning the placements in
/// label order and the resulting height.
pub fn flow_layout<M, S>(metrics: &M, width: u16, labels: &[S]) -> (Vec<ChipPlacement>, u16)
where
    M: ChipMetrics + ?Sized,
    S: AsRef<str>,
{
    let mut row = FlowRow::new(metrics, width);
    let placements = labels.iter().map(|l| row.push(l.as_ref())).collect();
    (placements, row.height())
}

// ============================================================================
// Measurement
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The tag row has not been laid out yet, so there is no width to measure.
    ContainerMissing,
    /// The tag row exists but is zero cells wide.
    ZeroWidth,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ContainerMissing => {
                write!(f, "tag row measured before it was laid out")
            }
            LayoutError::ZeroWidth => write!(f, "tag row measured with zero width"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Largest `k` such that `tags[..k]` plus the control fit on one line of
/// `width` cells.
///
/// Returns `tags.len()` when everything fits.
pub fn max_tags_one_line<M, S>(
    metrics: &M,
    width: Option<u16>,
    tags: &[S],
    control_label: &str,
) -> Result<usize, LayoutError>
where
    M: ChipMetrics + ?Sized,
    S: AsRef<str>,
{
    let width = width.ok_or(LayoutError::ContainerMissing)?;
    if width == 0 {
        return Err(LayoutError::ZeroWidth);
    }

    let mut trial = FlowRow::new(metrics, width);
    trial.push(control_label);
    let baseline = trial.height();

    for (i, tag) in tags.iter().enumerate() {
        trial.push(tag.as_ref());
        if trial.height() > baseline {
            return Ok(i);
        }
    }

    Ok(tags.len())
}

// ============================================================================
// Layout State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    pub max_tags_one_line: usize,
    pub is_expanded: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            max_tags_one_line: DEFAULT_MAX_TAGS_ONE_LINE,
            is_expanded: false,
        }
    }
}

impl LayoutState {
    pub fn toggle_expanded(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    /// How many catalog tags the row shows right now.
    pub fn visible_count(&self, catalog_len: usize) -> usize {
        if self.is_expanded {
            catalog_len
        } else {
            self.max_tags_one_line.min(catalog_len)
        }
    }

    /// Re-run the one-line measurement for `width`.
    ///
    /// Returns `Ok(true)` when `max_tags_one_line` changed. On error the
    /// state is untouched.
    pub fn remeasure<M: ChipMetrics + ?Sized>(
        &mut self,
        metrics: &M,
        icons: &ChipIcons,
        width: Option<u16>,
        catalog: &TagCatalog,
    ) -> Result<bool, LayoutError> {
        let control = icons.control_label(false);
        let k = max_tags_one_line(metrics, width, catalog.tags(), &control)?;
        if k == self.max_tags_one_line {
            return Ok(false);
        }
        debug!(
            "Tag row at width {:?} fits {} tags (was {})",
            width, k, self.max_tags_one_line
        );
        self.max_tags_one_line = k;
        Ok(true)
    }
}
