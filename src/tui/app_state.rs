use unicode_width::UnicodeWidthStr;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    Normal,
    /// Editing the name of the selected row.
    Renaming,
    /// Typing a directory to scan.
    PickingRoot,
    /// A blocking message is shown until acknowledged.
    Alert,
}

/// Single-line text field with a character-based cursor.
#[derive(Debug, Default, Clone)]
pub(super) struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub(super) fn with_text(text: &str) -> Self {
        LineInput {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub(super) fn text(&self) -> &str {
        &self.text
    }

    /// Display columns left of the cursor.
    pub(super) fn cursor_width(&self) -> usize {
        self.text[..self.byte_offset(self.cursor)].width()
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub(super) fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    pub(super) fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }

    pub(super) fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub(super) fn home(&mut self) {
        self.cursor = 0;
    }

    pub(super) fn end(&mut self) {
        self.cursor = self.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_multibyte_characters() {
        let mut input = LineInput::with_text("日本.txt");
        input.home();
        input.right();
        input.insert(' ');
        input.insert(' ');
        assert_eq!(input.text(), "日  本.txt");
        assert_eq!(input.cursor_width(), 4);
        input.backspace();
        input.delete();
        assert_eq!(input.text(), "日 .txt");
        input.end();
        input.right();
        input.delete();
        assert_eq!(input.text(), "日 .txt");
    }
}
