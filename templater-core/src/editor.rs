use crate::action::EditAction;
use unicode_segmentation::UnicodeSegmentation;

/// Line-oriented text buffer with a single cursor.
///
/// Columns count grapheme clusters, so a cursor never lands inside a
/// multi-codepoint character. There is always at least one line and the cursor
/// always addresses a valid position: `row < lines.len()` and
/// `col <= graphemes(lines[row])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl EditBuffer {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
            row: 0,
            col: 0,
        }
    }

    /// Replace the whole content and move the cursor back to the origin.
    pub fn reseed(&mut self, content: &str) {
        *self = Self::new(content);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `(row, col)` with `col` in graphemes.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::Insert(c) => self.insert_char(c),
            EditAction::SplitLine => self.split_line(),
            EditAction::Backspace => self.backspace(),
            EditAction::MoveUp => self.move_up(),
            EditAction::MoveDown => self.move_down(),
            EditAction::MoveLeft => self.move_left(),
            EditAction::MoveRight => self.move_right(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.split_line();
            return;
        }
        let at = byte_offset(&self.lines[self.row], self.col);
        self.lines[self.row].insert(at, c);
        // A combining mark joins the previous grapheme instead of adding one
        self.col = (self.col + 1).min(self.line_len(self.row));
    }

    pub fn split_line(&mut self) {
        let at = byte_offset(&self.lines[self.row], self.col);
        let tail = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, tail);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let start = byte_offset(line, self.col - 1);
            let end = byte_offset(line, self.col);
            line.replace_range(start..end, "");
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].graphemes(true).count()
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.line_len(self.row));
    }
}

/// Byte offset of the grapheme at `col`, or the line length past the end.
fn byte_offset(line: &str, col: usize) -> usize {
    line.grapheme_indices(true)
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}
