/// Single-line editable text used by the edit modals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
}

/// Glyph shown in place of each character of a hidden field.
pub const MASK_CHAR: char = '\u{2022}';

impl TextBuffer {
    /// Pre-filled buffer with the cursor at the end.
    pub fn from(s: &str) -> Self {
        Self {
            text: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Char-based cursor index (for rendering).
    pub fn cursor_char_index(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Same length as the text, every char replaced by [`MASK_CHAR`].
    pub fn masked(&self) -> String {
        self.text.chars().map(|_| MASK_CHAR).collect()
    }

    /// Control characters (including newlines) are ignored.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Ctrl+W: drop trailing whitespace, then the word before the cursor.
    pub fn delete_word_back(&mut self) {
        let head = self.text[..self.cursor].trim_end();
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_cursor() {
        let mut buf = TextBuffer::default();
        for c in "lift".chars() {
            buf.insert_char(c);
        }
        assert_eq!(buf.text(), "lift");
        assert_eq!(buf.cursor_char_index(), 4);
    }

    #[test]
    fn test_insert_ignores_control_chars() {
        let mut buf = TextBuffer::from("ab");
        buf.insert_char('\n');
        buf.insert_char('\t');
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = TextBuffer::from("jne");
        buf.move_home();
        buf.move_right();
        buf.insert_char('a');
        assert_eq!(buf.text(), "jane");
        assert_eq!(buf.cursor_char_index(), 2);
    }

    #[test]
    fn test_delete_back_until_empty() {
        let mut buf = TextBuffer::from("ab");
        buf.delete_back();
        buf.delete_back();
        buf.delete_back();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor_char_index(), 0);
    }

    #[test]
    fn test_delete_word_back() {
        let mut buf = TextBuffer::from("jane  doe  ");
        buf.delete_word_back();
        assert_eq!(buf.text(), "jane  ");
        buf.delete_word_back();
        assert_eq!(buf.text(), "");
        buf.delete_word_back();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = TextBuffer::from("zoë");
        buf.move_left();
        assert_eq!(buf.cursor_char_index(), 2);
        buf.move_right();
        buf.delete_back();
        assert_eq!(buf.text(), "zo");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.text(), "zoé");
    }

    #[test]
    fn test_masked_matches_char_count() {
        let buf = TextBuffer::from("pässwörd");
        assert_eq!(buf.masked().chars().count(), 8);
        assert!(buf.masked().chars().all(|c| c == MASK_CHAR));
    }
}
