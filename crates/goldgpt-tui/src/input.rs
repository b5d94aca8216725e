//! Single-line input buffer.
//!
//! The cursor is a char index, never a byte index, so multi-byte input
//! (Arabic, emoji) edits cleanly.

use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default, Clone)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.byte_index(self.cursor)].width()
    }

    /// Replaces the whole buffer and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    /// Returns the buffer contents and clears it.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut input = InputState::default();
        input.insert_str("gld");
        input.move_left();
        input.move_left();
        input.insert_char('o');
        assert_eq!(input.text(), "gold");
        assert_eq!(input.cursor(), 2);

        input.move_end();
        input.backspace();
        assert_eq!(input.text(), "gol");

        input.move_home();
        input.delete();
        assert_eq!(input.text(), "ol");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = InputState::default();
        input.insert_str("ذهب");
        input.backspace();
        assert_eq!(input.text(), "ذه");
        input.insert_char('🪙');
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.cursor_column(), "ذه🪙".width());
    }

    #[test]
    fn take_clears_buffer() {
        let mut input = InputState::default();
        input.set_text("hello");
        assert_eq!(input.take(), "hello");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
