use std::collections::VecDeque;

/// Submitted command lines, newest first, with a browsing cursor.
///
/// `cursor == None` means the user is composing a fresh line; `Some(i)` means
/// the input buffer currently shows `entries[i]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryRing {
    entries: VecDeque<String>,
    cursor: Option<usize>,
}

impl HistoryRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.cursor = None;
    }

    pub fn reset_navigation(&mut self) {
        self.cursor = None;
    }

    fn sanitize_cursor(&mut self) {
        if self.cursor.is_some_and(|index| index >= self.entries.len()) {
            self.cursor = None;
        }
    }

    /// Step toward older entries, stopping at the oldest one.
    ///
    /// Returns the text the input buffer should show, or `None` when there is
    /// nothing to recall.
    pub fn recall_older(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        self.sanitize_cursor();

        let next = match self.cursor {
            Some(index) => (index + 1).min(self.entries.len() - 1),
            None => 0,
        };
        self.cursor = Some(next);
        self.entries.get(next).cloned()
    }

    /// Step toward newer entries. Leaving the newest entry returns to
    /// composing with an empty buffer (`Some("")`); `None` when not browsing.
    pub fn recall_newer(&mut self) -> Option<String> {
        self.sanitize_cursor();
        let current = self.cursor?;

        if current == 0 {
            self.cursor = None;
            return Some(String::new());
        }

        let next = current - 1;
        self.cursor = Some(next);
        self.entries.get(next).cloned()
    }
}
