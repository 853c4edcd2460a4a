// line.rs

use crate::keys::Key;

/// Single-line edit buffer backing the search query.
///
/// `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the buffer; control chars (a pasted newline) become spaces.
    pub fn with_text(text: impl AsRef<str>) -> Self {
        let text: String = text
            .as_ref()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_at(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Applies an editing key. Returns false when the key means nothing here.
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Char(c) if !c.is_control() => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
            }
            Key::Backspace | Key::Ctrl('h') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_at(self.cursor);
                    self.text.remove(at);
                }
            }
            Key::Delete | Key::Ctrl('d') => {
                if self.cursor < self.len() {
                    let at = self.byte_at(self.cursor);
                    self.text.remove(at);
                }
            }
            Key::Left | Key::Ctrl('b') => self.cursor = self.cursor.saturating_sub(1),
            Key::Right | Key::Ctrl('f') => self.cursor = (self.cursor + 1).min(self.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.len(),
            Key::Ctrl('u') => {
                let at = self.byte_at(self.cursor);
                self.text.replace_range(..at, "");
                self.cursor = 0;
            }
            Key::Ctrl('k') => {
                let at = self.byte_at(self.cursor);
                self.text.truncate(at);
            }
            Key::Ctrl('w') => {
                let chars: Vec<char> = self.text.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                while start > 0 && !chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                let from = self.byte_at(start);
                let to = self.byte_at(self.cursor);
                self.text.replace_range(from..to, "");
                self.cursor = start;
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> LineBuffer {
        let mut line = LineBuffer::new();
        for c in s.chars() {
            line.apply(Key::Char(c));
        }
        line
    }

    #[test]
    fn inserts_at_cursor() {
        let mut line = typed("gt");
        line.apply(Key::Left);
        line.apply(Key::Char('i'));
        assert_eq!(line.text(), "git");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut line = typed("héllo");
        line.apply(Key::Backspace);
        assert_eq!(line.text(), "héll");
        line.apply(Key::Home);
        line.apply(Key::Delete);
        assert_eq!(line.text(), "éll");
        line.apply(Key::Backspace);
        assert_eq!(line.text(), "éll");
    }

    #[test]
    fn kill_commands() {
        let mut line = typed("git commit -m");
        line.apply(Key::Ctrl('w'));
        assert_eq!(line.text(), "git commit ");
        line.apply(Key::Ctrl('w'));
        assert_eq!(line.text(), "git ");

        let mut line = typed("cargo test");
        for _ in 0..5 {
            line.apply(Key::Left);
        }
        let mut tail = line.clone();
        line.apply(Key::Ctrl('u'));
        assert_eq!(line.text(), " test");
        assert_eq!(line.cursor(), 0);
        tail.apply(Key::Ctrl('k'));
        assert_eq!(tail.text(), "cargo");
    }

    #[test]
    fn cursor_moves_are_bounded() {
        let mut line = typed("ab");
        line.apply(Key::Right);
        assert_eq!(line.cursor(), 2);
        line.apply(Key::Home);
        line.apply(Key::Left);
        assert_eq!(line.cursor(), 0);
        line.apply(Key::End);
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn seeded_text_has_no_control_chars() {
        let line = LineBuffer::with_text("git\ncommit\t-m");
        assert_eq!(line.text(), "git commit -m");
        assert_eq!(line.cursor(), 13);
    }

    #[test]
    fn unbound_keys_are_reported() {
        let mut line = typed("x");
        assert!(!line.apply(Key::Tab));
        assert!(!line.apply(Key::Unknown));
        assert_eq!(line.text(), "x");
    }
}
