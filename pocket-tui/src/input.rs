use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use pocket_core::event::InputEvent;
use pocket_core::input::InputSource;

/// Keyboard stand-in for the joystick and buttons.
///
/// Arrows are the stick, Enter/Space the start button, Esc the back gesture,
/// `q` or Ctrl+C quits. Repeat events pass through so a held arrow keeps
/// scrolling, like a held stick would.
pub struct TerminalInput {
    poll_timeout: Duration,
}

impl TerminalInput {
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }
}

impl InputSource for TerminalInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let ready = event::poll(self.poll_timeout).unwrap_or(false);
        if !ready {
            return None;
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => resolve_key(key),
            Ok(_) => None,
            Err(e) => {
                log::warn!("input read failed: {e}");
                None
            }
        }
    }
}

fn resolve_key(key: KeyEvent) -> Option<InputEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Right => Some(InputEvent::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(InputEvent::Back),
        KeyCode::Char('q') => Some(InputEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_map_to_directions() {
        assert_eq!(resolve_key(key(KeyCode::Up)), Some(InputEvent::Up));
        assert_eq!(resolve_key(key(KeyCode::Down)), Some(InputEvent::Down));
        assert_eq!(resolve_key(key(KeyCode::Left)), Some(InputEvent::Left));
        assert_eq!(resolve_key(key(KeyCode::Right)), Some(InputEvent::Right));
    }

    #[test]
    fn test_start_and_back_buttons() {
        assert_eq!(resolve_key(key(KeyCode::Enter)), Some(InputEvent::Select));
        assert_eq!(
            resolve_key(key(KeyCode::Char(' '))),
            Some(InputEvent::Select)
        );
        assert_eq!(resolve_key(key(KeyCode::Esc)), Some(InputEvent::Back));
        assert_eq!(resolve_key(key(KeyCode::Backspace)), Some(InputEvent::Back));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(resolve_key(key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(
            resolve_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(resolve_key(key(KeyCode::Char('x'))), None);
        assert_eq!(resolve_key(key(KeyCode::Tab)), None);
    }
}
