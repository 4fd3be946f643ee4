use bitflags::bitflags;
use std::{fmt, str::FromStr};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct KeyModifiers: u8 {
        const CONTROL = 0b0001;
        const ALT = 0b0010;
        const SHIFT = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Terminal-independent key code. Variant order drives the display preference in
/// reverse lookups, so plain characters come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// A single key press. Modifiers are compared first so unmodified keys sort ahead
/// of chorded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyEvent {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { modifiers, code }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// A character that should be typed into a text surface rather than
    /// interpreted as a chord.
    pub fn printable_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

fn parse_code(s: &str) -> Result<KeyCode, String> {
    let code = match s.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("unknown key '{s}'")),
            }
        }
    };
    Ok(code)
}

impl FromStr for KeyEvent {
    type Err = String;

    /// Parses `C-s`, `A-g`, `S-tab`, `M-s` (super), `enter`, `q` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty key".to_string());
        }

        let mut modifiers = KeyModifiers::empty();
        let mut rest = s;
        while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
            let flag = match &rest[..1] {
                "C" => KeyModifiers::CONTROL,
                "A" => KeyModifiers::ALT,
                "S" => KeyModifiers::SHIFT,
                "M" => KeyModifiers::SUPER,
                other => return Err(format!("unknown modifier '{other}'")),
            };
            modifiers |= flag;
            rest = &rest[2..];
        }

        Ok(Self::new(parse_code(rest)?, modifiers))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("C-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        if self.modifiers.contains(KeyModifiers::SUPER) {
            f.write_str("M-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
        }
    }
}

impl KeyEvent {
    /// Convert a crossterm event. Returns `None` for keys we never bind
    /// (function keys, media keys, ...).
    pub fn from_crossterm(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode as CtCode, KeyModifiers as CtMods};

        let mut modifiers = KeyModifiers::empty();
        if event.modifiers.contains(CtMods::CONTROL) {
            modifiers |= KeyModifiers::CONTROL;
        }
        if event.modifiers.contains(CtMods::ALT) {
            modifiers |= KeyModifiers::ALT;
        }
        if event.modifiers.contains(CtMods::SHIFT) {
            modifiers |= KeyModifiers::SHIFT;
        }
        if event.modifiers.contains(CtMods::SUPER) {
            modifiers |= KeyModifiers::SUPER;
        }

        let code = match event.code {
            CtCode::Char(c) => {
                // Shift is already folded into the character itself
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::Char(c)
            }
            CtCode::Enter => KeyCode::Enter,
            CtCode::Esc => KeyCode::Esc,
            CtCode::Backspace => KeyCode::Backspace,
            CtCode::Delete => KeyCode::Delete,
            CtCode::Tab => KeyCode::Tab,
            CtCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Tab
            }
            CtCode::Up => KeyCode::Up,
            CtCode::Down => KeyCode::Down,
            CtCode::Left => KeyCode::Left,
            CtCode::Right => KeyCode::Right,
            CtCode::Home => KeyCode::Home,
            CtCode::End => KeyCode::End,
            CtCode::PageUp => KeyCode::PageUp,
            CtCode::PageDown => KeyCode::PageDown,
            _ => return None,
        };

        Some(Self::new(code, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        assert_eq!(KeyEvent::from_str("C-s").unwrap(), KeyEvent::ctrl('s'));
        assert_eq!(
            KeyEvent::from_str("C-A-x").unwrap(),
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );
        assert_eq!(
            KeyEvent::from_str("enter").unwrap(),
            KeyEvent::plain(KeyCode::Enter)
        );
        assert_eq!(
            KeyEvent::from_str("q").unwrap(),
            KeyEvent::plain(KeyCode::Char('q'))
        );
        assert_eq!(
            KeyEvent::from_str("-").unwrap(),
            KeyEvent::plain(KeyCode::Char('-'))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(KeyEvent::from_str("").is_err());
        assert!(KeyEvent::from_str("X-s").is_err());
        assert!(KeyEvent::from_str("notakey").is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for raw in ["C-s", "esc", "up", "A-g", "space", "pagedown", "y"] {
            let key = KeyEvent::from_str(raw).unwrap();
            assert_eq!(key.to_string(), raw);
        }
    }

    #[test]
    fn test_unmodified_keys_sort_first() {
        let mut keys = vec![KeyEvent::ctrl('p'), KeyEvent::plain(KeyCode::Up)];
        keys.sort();
        assert_eq!(keys[0], KeyEvent::plain(KeyCode::Up));
    }

    #[test]
    fn test_printable_char() {
        assert_eq!(
            KeyEvent::plain(KeyCode::Char('a')).printable_char(),
            Some('a')
        );
        assert_eq!(KeyEvent::ctrl('a').printable_char(), None);
        assert_eq!(KeyEvent::plain(KeyCode::Enter).printable_char(), None);
    }

    #[test]
    fn test_from_crossterm_folds_shift_into_char() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('Q'),
            crossterm::event::KeyModifiers::SHIFT,
        );
        assert_eq!(
            KeyEvent::from_crossterm(ct),
            Some(KeyEvent::plain(KeyCode::Char('Q')))
        );
    }

    #[test]
    fn test_from_crossterm_ctrl() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('s'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        assert_eq!(KeyEvent::from_crossterm(ct), Some(KeyEvent::ctrl('s')));
    }

    #[test]
    fn test_from_crossterm_ignores_function_keys() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::F(5),
            crossterm::event::KeyModifiers::NONE,
        );
        assert_eq!(KeyEvent::from_crossterm(ct), None);
    }
}
