use crate::model::BlockPoint;

/// Cursor over the lowest blocks of a document, one block per row.
/// Columns are char offsets into the block text.
#[derive(Debug, Clone)]
pub struct CursorState {
    pub row: usize,
    pub col: usize,
    lines: Vec<String>,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            lines: Vec::new(),
        }
    }

    /// Load block texts and reset to the top
    pub fn set_content(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.row = 0;
        self.col = 0;
    }

    /// Replace block texts, keeping the cursor where it is when possible
    pub fn sync_content(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.row = self.row.min(self.lines.len().saturating_sub(1));
        self.col = self.col.min(self.line_len(self.row));
    }

    /// Get current cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn point(&self) -> BlockPoint {
        BlockPoint::new(self.row, self.col)
    }

    pub fn set_point(&mut self, point: BlockPoint) {
        self.row = point.block.min(self.lines.len().saturating_sub(1));
        self.col = point.offset.min(self.line_len(self.row));
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // Move to end of previous line
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            // Move to start of next line
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        if !self.lines.is_empty() {
            self.row = self.lines.len() - 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_word_forward(&mut self) {
        let Some(line) = self.lines.get(self.row) else {
            return;
        };
        let chars: Vec<char> = line.chars().collect();
        let mut col = self.col;

        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }

        if col >= chars.len() && self.col == chars.len() && self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            self.col = col;
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            return;
        }

        if let Some(line) = self.lines.get(self.row) {
            let chars: Vec<char> = line.chars().collect();
            let mut col = self.col.min(chars.len());

            while col > 0 && chars[col - 1].is_whitespace() {
                col -= 1;
            }
            while col > 0 && !chars[col - 1].is_whitespace() {
                col -= 1;
            }

            self.col = col;
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(lines: &[&str]) -> CursorState {
        let mut cursor = CursorState::new();
        cursor.set_content(lines.iter().map(|s| s.to_string()).collect());
        cursor
    }

    #[test]
    fn test_cursor_movement() {
        let mut cursor = cursor(&["Hello", "World", "Test"]);
        assert_eq!(cursor.cursor(), (0, 0));

        cursor.move_down();
        assert_eq!(cursor.cursor(), (1, 0));

        cursor.move_right();
        cursor.move_right();
        assert_eq!(cursor.cursor(), (1, 2));

        cursor.move_up();
        assert_eq!(cursor.cursor(), (0, 2));

        cursor.move_to_end();
        cursor.move_right();
        assert_eq!(cursor.point(), BlockPoint::new(1, 0));
    }

    #[test]
    fn test_word_motion_reaches_line_end_before_wrapping() {
        let mut cursor = cursor(&["one two", "three"]);
        cursor.move_word_forward();
        assert_eq!(cursor.cursor(), (0, 4));
        cursor.move_word_forward();
        assert_eq!(cursor.cursor(), (0, 7));
        cursor.move_word_forward();
        assert_eq!(cursor.cursor(), (1, 0));
        cursor.move_word_back();
        assert_eq!(cursor.cursor(), (0, 7));
        cursor.move_word_back();
        assert_eq!(cursor.cursor(), (0, 4));
    }

    #[test]
    fn test_sync_content_clamps() {
        let mut cursor = cursor(&["abcdef", "xy"]);
        cursor.set_point(BlockPoint::new(0, 5));
        cursor.sync_content(vec!["abc".to_string()]);
        assert_eq!(cursor.cursor(), (0, 3));
    }
}
