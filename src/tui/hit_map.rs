//! Screen regions of clickable chips, rebuilt every frame by the components
//! that draw them and queried by the event loop on mouse clicks.

use ratatui::layout::{Position, Rect};

use crate::core::selection::FeedMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipTarget {
    Tag(String),
    ExpandControl,
    ClearFilter,
    Mode(FeedMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipHit {
    pub area: Rect,
    pub target: ChipTarget,
}

#[derive(Debug, Default)]
pub struct HitMap {
    hits: Vec<ChipHit>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn push(&mut self, area: Rect, target: ChipTarget) {
        if area.width > 0 && area.height > 0 {
            self.hits.push(ChipHit { area, target });
        }
    }

    /// The chip under a screen cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<&ChipTarget> {
        let position = Position::new(column, row);
        self.hits
            .iter()
            .find(|h| h.area.contains(position))
            .map(|h| &h.target)
    }

    pub fn hits(&self) -> &[ChipHit] {
        &self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_finds_containing_chip() {
        let mut map = HitMap::default();
        map.push(Rect::new(2, 5, 6, 1), ChipTarget::Tag("art".to_string()));
        map.push(Rect::new(9, 5, 8, 1), ChipTarget::ExpandControl);

        assert_eq!(map.hit(2, 5), Some(&ChipTarget::Tag("art".to_string())));
        assert_eq!(map.hit(7, 5), Some(&ChipTarget::Tag("art".to_string())));
        assert_eq!(map.hit(8, 5), None); // the gap
        assert_eq!(map.hit(9, 5), Some(&ChipTarget::ExpandControl));
        assert_eq!(map.hit(9, 6), None);
    }

    #[test]
    fn test_empty_areas_are_not_recorded() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 0, 1), ChipTarget::ClearFilter);
        assert!(map.hits().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 3, 1), ChipTarget::Mode(FeedMode::New));
        map.clear();
        assert_eq!(map.hit(1, 0), None);
    }
}
