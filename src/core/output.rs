//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.

use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Raw bytes/control sequences (UTF-8 string) to be written to the terminal.
    Bytes(String),

    /// Cursor visibility.
    HideCursor,
    ShowCursor,
    /// Move the cursor to a zero-based row/column.
    MoveTo { row: usize, col: usize },
    /// Clear from the cursor to the end of the line.
    ClearLineRight,
    ClearScreen,

    /// Protocol toggles.
    BracketedPasteEnable,
    BracketedPasteDisable,
    AltScreenEnter,
    AltScreenLeave,
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Flush buffered commands to the terminal as one write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) {
        if self.cmds.is_empty() {
            return;
        }

        let mut data = String::new();
        for cmd in self.cmds.drain(..) {
            match cmd {
                TerminalCmd::Bytes(bytes) => data.push_str(&bytes),
                TerminalCmd::HideCursor => data.push_str("\x1b[?25l"),
                TerminalCmd::ShowCursor => data.push_str("\x1b[?25h"),
                TerminalCmd::MoveTo { row, col } => {
                    data.push_str(&format!("\x1b[{};{}H", row + 1, col + 1));
                }
                TerminalCmd::ClearLineRight => data.push_str("\x1b[K"),
                TerminalCmd::ClearScreen => data.push_str("\x1b[2J"),
                TerminalCmd::BracketedPasteEnable => data.push_str("\x1b[?2004h"),
                TerminalCmd::BracketedPasteDisable => data.push_str("\x1b[?2004l"),
                TerminalCmd::AltScreenEnter => data.push_str("\x1b[?1049h"),
                TerminalCmd::AltScreenLeave => data.push_str("\x1b[?1049l"),
            }
        }
        term.write(&data);
    }
}
