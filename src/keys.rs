// keys.rs

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Char(char),
    /// Control chord, stored as the lowercase letter (`Ctrl('r')`).
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// The terminal changed size; not a keypress, but it needs a redraw.
    Resize,
    Unknown,
}

impl From<KeyEvent> for Key {
    fn from(ev: KeyEvent) -> Self {
        let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
        let alt = ev.modifiers.contains(KeyModifiers::ALT);
        match ev.code {
            // Alt chords are not bound to anything.
            KeyCode::Char(_) if alt => Key::Unknown,
            KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Unknown,
        }
    }
}

/// What a key does while a search session is open.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Binding {
    Older,
    Newer,
    Accept,
    Cancel,
    Redraw,
    Edit(Key),
}

impl Binding {
    pub fn of(key: Key) -> Self {
        match key {
            Key::Ctrl('r') | Key::Up => Binding::Older,
            Key::Ctrl('s') | Key::Down => Binding::Newer,
            Key::Enter => Binding::Accept,
            Key::Escape | Key::Ctrl('g') | Key::Ctrl('c') => Binding::Cancel,
            Key::Resize => Binding::Redraw,
            other => Binding::Edit(other),
        }
    }
}

pub const HELP: [(&str, &str); 4] = [
    ("ctrl+r/↑", "older"),
    ("ctrl+s/↓", "newer"),
    ("enter", "accept"),
    ("esc", "cancel"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Key {
        Key::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_plain_and_control_keys() {
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), Key::Char('a'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Key::Char('A'));
        assert_eq!(key(KeyCode::Char('r'), KeyModifiers::CONTROL), Key::Ctrl('r'));
        assert_eq!(key(KeyCode::Char('R'), KeyModifiers::CONTROL), Key::Ctrl('r'));
        assert_eq!(key(KeyCode::Char('☃'), KeyModifiers::NONE), Key::Char('☃'));
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Key::Enter);
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Key::Escape);
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(key(KeyCode::Up, KeyModifiers::NONE), Key::Up);
        assert_eq!(key(KeyCode::Down, KeyModifiers::NONE), Key::Down);
        assert_eq!(key(KeyCode::Delete, KeyModifiers::NONE), Key::Delete);
        assert_eq!(key(KeyCode::Home, KeyModifiers::NONE), Key::Home);
        assert_eq!(key(KeyCode::End, KeyModifiers::NONE), Key::End);
        assert_eq!(key(KeyCode::F(5), KeyModifiers::NONE), Key::Unknown);
    }

    #[test]
    fn alt_chords_are_unknown() {
        assert_eq!(key(KeyCode::Char('f'), KeyModifiers::ALT), Key::Unknown);
    }

    #[test]
    fn bindings_follow_readline() {
        assert_eq!(Binding::of(Key::Ctrl('r')), Binding::Older);
        assert_eq!(Binding::of(Key::Up), Binding::Older);
        assert_eq!(Binding::of(Key::Ctrl('s')), Binding::Newer);
        assert_eq!(Binding::of(Key::Down), Binding::Newer);
        assert_eq!(Binding::of(Key::Enter), Binding::Accept);
        assert_eq!(Binding::of(Key::Escape), Binding::Cancel);
        assert_eq!(Binding::of(Key::Ctrl('g')), Binding::Cancel);
        assert_eq!(Binding::of(Key::Resize), Binding::Redraw);
        assert_eq!(Binding::of(Key::Char('x')), Binding::Edit(Key::Char('x')));
    }
}
