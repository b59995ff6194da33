//! Input widget.

use crate::core::component::{Component, Focusable};
use crate::core::cursor::CursorPos;
use crate::core::input_event::InputEvent;
use crate::core::text::{grapheme_segments, is_punctuation_char, is_whitespace_char, visible_width};

/// Single-line input component with horizontal scrolling.
///
/// Submission and history keys are left to the owner: `enter`, `up` and `down`
/// are ignored here.
pub struct Input {
    value: String,
    cursor: usize,
    focused: bool,
    last_cursor_pos: Option<CursorPos>,
    prompt: String,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            last_cursor_pos: None,
            prompt: "> ".to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and park the cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.value.len() {
            self.cursor = self.value.len();
        }
        while self.cursor > 0 && !self.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn handle_paste(&mut self, pasted_text: &str) {
        let cleaned = pasted_text.replace(['\r', '\n'], "");
        self.insert_text(&cleaned);
    }

    fn is_whitespace_segment(segment: &str) -> bool {
        segment.chars().any(is_whitespace_char)
    }

    fn is_punctuation_segment(segment: &str) -> bool {
        segment.chars().any(is_punctuation_char)
    }

    fn previous_grapheme_len(&self) -> usize {
        grapheme_segments(&self.value[..self.cursor])
            .next_back()
            .map(str::len)
            .unwrap_or(0)
    }

    fn next_grapheme_len(&self) -> usize {
        grapheme_segments(&self.value[self.cursor..])
            .next()
            .map(str::len)
            .unwrap_or(0)
    }

    fn delete_word_backwards(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let old_cursor = self.cursor;
        self.move_word_backwards();
        self.value.replace_range(self.cursor..old_cursor, "");
    }

    fn move_word_backwards(&mut self) {
        let mut graphemes: Vec<&str> = grapheme_segments(&self.value[..self.cursor]).collect();
        let mut cursor = self.cursor;

        while let Some(last) = graphemes.last() {
            if !Self::is_whitespace_segment(last) {
                break;
            }
            cursor -= last.len();
            graphemes.pop();
        }

        let punctuation_run = graphemes
            .last()
            .is_some_and(|last| Self::is_punctuation_segment(last));
        while let Some(last) = graphemes.last() {
            let same_class = if punctuation_run {
                Self::is_punctuation_segment(last)
            } else {
                !Self::is_whitespace_segment(last) && !Self::is_punctuation_segment(last)
            };
            if !same_class {
                break;
            }
            cursor -= last.len();
            graphemes.pop();
        }

        self.cursor = cursor;
    }

    fn move_word_forwards(&mut self) {
        let mut cursor = self.cursor;
        let mut segments = grapheme_segments(&self.value[self.cursor..]).peekable();

        while let Some(seg) = segments.peek() {
            if !Self::is_whitespace_segment(seg) {
                break;
            }
            cursor += seg.len();
            segments.next();
        }

        let punctuation_run = segments
            .peek()
            .is_some_and(|seg| Self::is_punctuation_segment(seg));
        while let Some(seg) = segments.peek() {
            let same_class = if punctuation_run {
                Self::is_punctuation_segment(seg)
            } else {
                !Self::is_whitespace_segment(seg) && !Self::is_punctuation_segment(seg)
            };
            if !same_class {
                break;
            }
            cursor += seg.len();
            segments.next();
        }

        self.cursor = cursor;
    }

    fn handle_key(&mut self, key_id: &str) {
        match key_id {
            "backspace" => {
                let len = self.previous_grapheme_len();
                let start = self.cursor - len;
                self.value.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            "delete" | "ctrl+d" => {
                let len = self.next_grapheme_len();
                self.value.replace_range(self.cursor..self.cursor + len, "");
            }
            "ctrl+w" | "alt+backspace" => self.delete_word_backwards(),
            "ctrl+u" => {
                self.value.replace_range(..self.cursor, "");
                self.cursor = 0;
            }
            "ctrl+k" => self.value.truncate(self.cursor),
            "left" | "ctrl+b" => self.cursor -= self.previous_grapheme_len(),
            "right" | "ctrl+f" => self.cursor += self.next_grapheme_len(),
            "home" | "ctrl+a" => self.cursor = 0,
            "end" | "ctrl+e" => self.cursor = self.value.len(),
            "ctrl+left" | "alt+b" => self.move_word_backwards(),
            "ctrl+right" | "alt+f" => self.move_word_forwards(),
            _ => {}
        }
    }
}

impl Component for Input {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.clamp_cursor();
        self.last_cursor_pos = None;

        let prompt_width = visible_width(&self.prompt);
        let available_width = width.saturating_sub(prompt_width);
        if available_width == 0 {
            return vec![self.prompt.clone()];
        }

        // Scroll so the cursor stays inside the visible window.
        let mut start = 0;
        while visible_width(&self.value[start..self.cursor]) >= available_width {
            let Some(segment) = grapheme_segments(&self.value[start..self.cursor]).next() else {
                break;
            };
            start += segment.len();
        }

        let mut visible = String::new();
        let mut used = 0;
        for segment in grapheme_segments(&self.value[start..]) {
            let cols = visible_width(segment);
            if used + cols > available_width {
                break;
            }
            visible.push_str(segment);
            used += cols;
        }

        if self.focused {
            let col = prompt_width + visible_width(&self.value[start..self.cursor]);
            self.last_cursor_pos = Some(CursorPos { row: 0, col });
        }

        vec![format!("{}{visible}", self.prompt)]
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn handle_event(&mut self, event: &InputEvent) {
        self.clamp_cursor();

        match event {
            InputEvent::Text { text, .. } => self.insert_text(text),
            InputEvent::Paste { text, .. } => self.handle_paste(text),
            InputEvent::Key { key_id, .. } => self.handle_key(key_id),
            _ => {}
        }
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for Input {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
