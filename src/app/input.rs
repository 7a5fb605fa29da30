/// Editable text with a cursor, used by the form fields.
///
/// The cursor is a char index so multi-byte input never splits a code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Input holding `value` with the cursor at the end
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Inserts at the cursor and leaves the cursor after the inserted text
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    /// Start of the current line
    pub fn home(&mut self) {
        let (line_start, _) = self.current_line_bounds();
        self.cursor = line_start;
    }

    /// End of the current line
    pub fn end(&mut self) {
        let (_, line_end) = self.current_line_bounds();
        self.cursor = line_end;
    }

    /// Char range `[start, end)` of the line holding the cursor
    fn current_line_bounds(&self) -> (usize, usize) {
        let chars: Vec<char> = self.value.chars().collect();
        let start = chars[..self.cursor]
            .iter()
            .rposition(|c| *c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = chars[self.cursor..]
            .iter()
            .position(|c| *c == '\n')
            .map(|i| self.cursor + i)
            .unwrap_or(chars.len());
        (start, end)
    }

    /// (line, column) of the cursor, both zero based
    pub fn cursor_position(&self) -> (usize, usize) {
        let before: String = self.value.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let column = before
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count())
            .unwrap_or(0);
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_at_cursor_moves_cursor_past_text() {
        let mut input = TextInput::new("Hello world");
        for _ in 0..5 {
            input.move_left();
        }
        input.insert_str("{{date}} ");
        assert_eq!(input.value(), "Hello {{date}} world");
        assert_eq!(input.cursor(), "Hello {{date}} ".chars().count());
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut input = TextInput::new("héllo");
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "hélo");
        input.insert_char('ł');
        assert_eq!(input.value(), "héllo".replace("ll", "łl"));
        input.delete();
        assert_eq!(input.value(), "hé\u{142}o");
    }

    #[test]
    fn home_and_end_stay_on_the_current_line() {
        let mut input = TextInput::new("first\nsecond line\nthird");
        input.move_left();
        input.move_left();
        input.move_left();
        input.move_left();
        input.move_left();
        input.move_left();
        // cursor sits at the end of "second line"
        assert_eq!(input.cursor_position(), (1, 11));
        input.home();
        assert_eq!(input.cursor_position(), (1, 0));
        input.end();
        assert_eq!(input.cursor_position(), (1, 11));
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut input = TextInput::default();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
