use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    ForceQuit, // Ctrl+C
    ToggleTags,
    ClearFilter,
    CycleMode,
    ModePopular,
    ModeNew,
    Refresh,

    // TUI-local events (handled directly in TUI)
    Resize,
    FocusPrev,
    FocusNext,
    Activate, // Select the focused chip
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    MouseClick(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }

    let event = match event::read() {
        Ok(event) => event,
        Err(e) => {
            warn!("Event read failed: {}", e);
            return None;
        }
    };

    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.code, key_event.modifiers)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(TuiEvent::FocusPrev),
        (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(TuiEvent::FocusNext),
        (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => Some(TuiEvent::Activate),
        (_, KeyCode::Char('e')) => Some(TuiEvent::ToggleTags),
        (_, KeyCode::Char('x')) | (_, KeyCode::Backspace) => Some(TuiEvent::ClearFilter),
        (_, KeyCode::Tab) => Some(TuiEvent::CycleMode),
        (_, KeyCode::Char('p')) => Some(TuiEvent::ModePopular),
        (_, KeyCode::Char('n')) => Some(TuiEvent::ModeNew),
        (_, KeyCode::Char('r')) => Some(TuiEvent::Refresh),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_force_quits() {
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(TuiEvent::ForceQuit)
        );
        // Plain 'c' is unbound
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_tag_row_keys() {
        assert_eq!(map_key(KeyCode::Right, KeyModifiers::NONE), Some(TuiEvent::FocusNext));
        assert_eq!(map_key(KeyCode::Char('h'), KeyModifiers::NONE), Some(TuiEvent::FocusPrev));
        assert_eq!(map_key(KeyCode::Enter, KeyModifiers::NONE), Some(TuiEvent::Activate));
        assert_eq!(map_key(KeyCode::Char(' '), KeyModifiers::NONE), Some(TuiEvent::Activate));
        assert_eq!(map_key(KeyCode::Char('e'), KeyModifiers::NONE), Some(TuiEvent::ToggleTags));
        assert_eq!(map_key(KeyCode::Backspace, KeyModifiers::NONE), Some(TuiEvent::ClearFilter));
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(map_key(KeyCode::Tab, KeyModifiers::NONE), Some(TuiEvent::CycleMode));
        assert_eq!(map_key(KeyCode::Char('p'), KeyModifiers::NONE), Some(TuiEvent::ModePopular));
        assert_eq!(map_key(KeyCode::Char('n'), KeyModifiers::NONE), Some(TuiEvent::ModeNew));
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(map_key(KeyCode::Char('j'), KeyModifiers::NONE), Some(TuiEvent::ScrollDown));
        assert_eq!(map_key(KeyCode::Up, KeyModifiers::NONE), Some(TuiEvent::ScrollUp));
        assert_eq!(map_key(KeyCode::PageDown, KeyModifiers::NONE), Some(TuiEvent::ScrollPageDown));
    }
}
