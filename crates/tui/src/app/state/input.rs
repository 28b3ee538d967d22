/// Editable text buffer for a single form field.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub buffer: Vec<char>,
    pub cursor: usize,
    preferred_column: Option<usize>,
}

impl InputState {
    pub fn current(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|ch| ch.is_whitespace())
    }

    pub fn set_from(&mut self, value: &str) {
        self.buffer = value.chars().collect();
        self.cursor = self.buffer.len();
        self.preferred_column = None;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.preferred_column = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        self.preferred_column = None;
    }

    pub fn insert_str(&mut self, value: &str) {
        for ch in value.chars() {
            self.buffer.insert(self.cursor, ch);
            self.cursor += 1;
        }
        self.preferred_column = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        self.preferred_column = None;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        self.buffer.remove(self.cursor);
        self.preferred_column = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.preferred_column = None;
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
        self.preferred_column = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.preferred_column = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
        self.preferred_column = None;
    }

    pub fn move_up(&mut self) -> bool {
        let cursor = self.cursor.min(self.buffer.len());
        let current_start = self.line_start(cursor);
        if current_start == 0 {
            self.preferred_column = None;
            return false;
        }

        let column = self
            .preferred_column
            .unwrap_or(cursor.saturating_sub(current_start));
        let prev_end = current_start - 1;
        let prev_start = self.line_start(prev_end);
        let prev_len = prev_end.saturating_sub(prev_start);
        self.cursor = prev_start + column.min(prev_len);
        self.preferred_column = Some(column);
        true
    }

    pub fn move_down(&mut self) -> bool {
        let len = self.buffer.len();
        let cursor = self.cursor.min(len);
        let current_start = self.line_start(cursor);
        let Some(current_end) = self.find_next_newline(current_start) else {
            self.preferred_column = None;
            return false;
        };

        let column = self
            .preferred_column
            .unwrap_or(cursor.saturating_sub(current_start));
        let next_start = current_end + 1;
        let next_end = self.find_next_newline(next_start).unwrap_or(len);
        let next_len = next_end.saturating_sub(next_start);
        self.cursor = next_start + column.min(next_len);
        self.preferred_column = Some(column);
        true
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        while self.cursor > 0 && self.buffer[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
        while self.cursor > 0 && !self.buffer[self.cursor - 1].is_whitespace() {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
        self.preferred_column = None;
    }

    pub fn kill_line(&mut self) {
        self.clear();
    }

    fn line_start(&self, pos: usize) -> usize {
        self.buffer[..pos]
            .iter()
            .rposition(|ch| *ch == '\n')
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    fn find_next_newline(&self, start: usize) -> Option<usize> {
        self.buffer[start..]
            .iter()
            .position(|ch| *ch == '\n')
            .map(|offset| start + offset)
    }
}
