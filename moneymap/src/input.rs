use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Terminal-independent key, so tests can drive the app without crossterm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Anything the app has no binding for
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    pub fn with_alt(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                alt: true,
                ..Default::default()
            },
        }
    }

    /// The character of a Ctrl+<char> chord, lower-cased
    pub fn ctrl_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if self.modifiers.ctrl => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// Zero-based menu index for Alt+1 through Alt+9
    pub fn alt_digit(&self) -> Option<usize> {
        match self.key {
            Key::Char(c) if self.modifiers.alt => menu_index(c),
            _ => None,
        }
    }
}

/// Zero-based menu index for the digits 1 through 9
pub fn menu_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if d >= 1 => Some(d as usize - 1),
        _ => None,
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => Key::Unsupported,
        }
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(event: CrosstermKeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers {
                ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
                alt: event.modifiers.contains(KeyModifiers::ALT),
                shift: event.modifiers.contains(KeyModifiers::SHIFT),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chords() {
        assert_eq!(KeyEvent::with_ctrl(Key::Char('G')).ctrl_char(), Some('g'));
        assert_eq!(KeyEvent::new(Key::Char('g')).ctrl_char(), None);
        assert_eq!(KeyEvent::with_alt(Key::Char('2')).alt_digit(), Some(1));
        assert_eq!(KeyEvent::with_alt(Key::Char('0')).alt_digit(), None);
        assert_eq!(KeyEvent::new(Key::Char('2')).alt_digit(), None);
    }

    #[test]
    fn crossterm_conversion() {
        let event = CrosstermKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyEvent::from(event), KeyEvent::with_ctrl(Key::Char('c')));
        assert_eq!(Key::from(KeyCode::F(5)), Key::Unsupported);
    }
}
