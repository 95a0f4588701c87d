use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use quickread_core::input::{InputEvent, InputProvider};

use crate::HostError;

/// What a key press means.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAction {
    Reader(InputEvent),
    Quit,
    Ignored,
}

/// Key bindings:
///
/// | key            | action          |
/// |----------------|-----------------|
/// | `s`, Enter     | start           |
/// | `p`            | pause           |
/// | space          | start / pause   |
/// | `r`            | reset           |
/// | `+`, `=`, Up   | faster          |
/// | `-`, Down      | slower          |
/// | `c`            | toggle chunking |
/// | `q`, Esc, ^C   | quit            |
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignored;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => KeyAction::Quit,
            _ => KeyAction::Ignored,
        };
    }

    let event = match key.code {
        KeyCode::Char('s') | KeyCode::Enter => InputEvent::Start,
        KeyCode::Char('p') => InputEvent::Pause,
        KeyCode::Char(' ') => InputEvent::TogglePlayback,
        KeyCode::Char('r') => InputEvent::Reset,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => InputEvent::IncreaseWpm,
        KeyCode::Char('-') | KeyCode::Down => InputEvent::DecreaseWpm,
        KeyCode::Char('c') => InputEvent::ToggleChunking,
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => return KeyAction::Ignored,
    };
    KeyAction::Reader(event)
}

/// Non-blocking terminal keyboard reader. Also notices terminal resizes.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    quit_requested: bool,
    resized: Option<u16>,
}

impl KeyboardInput {
    pub const fn new() -> Self {
        Self {
            quit_requested: false,
            resized: None,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// The newest terminal width seen since the last call.
    pub fn take_resize(&mut self) -> Option<u16> {
        self.resized.take()
    }

    fn handle_event(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => match map_key(key) {
                KeyAction::Reader(event) => Some(event),
                KeyAction::Quit => {
                    self.quit_requested = true;
                    None
                }
                KeyAction::Ignored => None,
            },
            Event::Resize(columns, _rows) => {
                self.resized = Some(columns);
                None
            }
            _ => None,
        }
    }
}

impl InputProvider for KeyboardInput {
    type Error = HostError;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        while event::poll(Duration::ZERO)? {
            if let Some(event) = self.handle_event(event::read()?) {
                return Ok(Some(event));
            }
            if self.quit_requested {
                return Ok(None);
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn playback_keys() {
        assert_eq!(map_key(press(KeyCode::Char('s'))), KeyAction::Reader(InputEvent::Start));
        assert_eq!(map_key(press(KeyCode::Char('p'))), KeyAction::Reader(InputEvent::Pause));
        assert_eq!(
            map_key(press(KeyCode::Char(' '))),
            KeyAction::Reader(InputEvent::TogglePlayback)
        );
        assert_eq!(map_key(press(KeyCode::Char('r'))), KeyAction::Reader(InputEvent::Reset));
    }

    #[test]
    fn setting_keys() {
        assert_eq!(map_key(press(KeyCode::Up)), KeyAction::Reader(InputEvent::IncreaseWpm));
        assert_eq!(
            map_key(press(KeyCode::Char('-'))),
            KeyAction::Reader(InputEvent::DecreaseWpm)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'))),
            KeyAction::Reader(InputEvent::ToggleChunking)
        );
    }

    #[test]
    fn ctrl_c_quits_instead_of_toggling_chunking() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), KeyAction::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), KeyAction::Quit);
    }

    #[test]
    fn resize_is_remembered_until_taken() {
        let mut input = KeyboardInput::new();
        assert_eq!(input.handle_event(Event::Resize(100, 30)), None);
        assert_eq!(input.handle_event(Event::Resize(64, 30)), None);

        assert_eq!(input.take_resize(), Some(64));
        assert_eq!(input.take_resize(), None);
        assert!(!input.quit_requested());
    }

    #[test]
    fn key_events_reach_the_reader() {
        let mut input = KeyboardInput::new();
        assert_eq!(
            input.handle_event(Event::Key(press(KeyCode::Char('s')))),
            Some(InputEvent::Start)
        );
        assert_eq!(input.handle_event(Event::FocusLost), None);
        assert_eq!(input.handle_event(Event::Key(press(KeyCode::Char('q')))), None);
        assert!(input.quit_requested());
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char('s'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), KeyAction::Ignored);
        assert_eq!(map_key(press(KeyCode::F(5))), KeyAction::Ignored);
    }
}
