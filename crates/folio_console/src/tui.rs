use std::sync::{Arc, Mutex, MutexGuard};

use folio_tui::core::component::Focusable;
use folio_tui::core::cursor::CursorPos;
use folio_tui::core::text::{pad_to_width, truncate_to_width};
use folio_tui::{visible_width, wrap_preformatted, Component, Input, InputEvent, RuntimeHandle};

use crate::app::{Console, HostOps, Role};
use crate::profile::Profile;
use crate::trigger::{decode_trigger, TriggerChannel, TriggerListener, TriggerSender};

const NAV_LINKS: [(&str, &str, &str); 3] = [
    ("f1", "F1", "about"),
    ("f2", "F2", "work"),
    ("f3", "F3", "contact"),
];

/// Header, footer and input rows around the transcript viewport.
const CHROME_ROWS: usize = 3;
const DEFAULT_TERMINAL_ROWS: usize = 24;

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

fn cyan(text: &str) -> String {
    ansi_wrap(text, "\x1b[36m", "\x1b[39m")
}

/// [`HostOps`] backed by the runtime handle. Focus requests are collected and
/// applied to the input widget after the console call returns.
struct ViewHost<'a> {
    runtime: &'a RuntimeHandle,
    focus_requested: bool,
}

impl<'a> ViewHost<'a> {
    fn new(runtime: &'a RuntimeHandle) -> Self {
        Self {
            runtime,
            focus_requested: false,
        }
    }
}

impl HostOps for ViewHost<'_> {
    fn request_render(&mut self) {
        self.runtime.request_render();
    }

    fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    fn request_stop(&mut self) {
        self.runtime.request_stop();
    }
}

/// Transcript viewport plus the live input line.
pub struct ConsoleView {
    console: Arc<Mutex<Console>>,
    runtime: RuntimeHandle,
    input: Input,
    _listener: TriggerListener,
    /// Rows scrolled up from the bottom of the transcript.
    scroll_offset: usize,
    last_transcript_len: usize,
    /// Transcript rows visible above the input line.
    viewport_rows: usize,
    cursor_pos: Option<CursorPos>,
}

impl ConsoleView {
    pub fn new(
        console: Arc<Mutex<Console>>,
        runtime: RuntimeHandle,
        channel: &TriggerChannel,
    ) -> Self {
        let last_transcript_len = lock_unpoisoned(&console).transcript().len();
        Self {
            console,
            runtime,
            input: Input::new(),
            _listener: channel.listen(),
            scroll_offset: 0,
            last_transcript_len,
            viewport_rows: DEFAULT_TERMINAL_ROWS - CHROME_ROWS,
            cursor_pos: None,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    fn with_console(&mut self, f: impl FnOnce(&mut Console, &mut dyn HostOps)) {
        let mut host = ViewHost::new(&self.runtime);
        let next_input = {
            let mut console = lock_unpoisoned(&self.console);
            f(&mut *console, &mut host);
            console.input.clone()
        };
        let focus_requested = host.focus_requested;

        if self.input.value() != next_input {
            self.input.set_value(next_input);
        }
        if focus_requested {
            self.input.set_focused(true);
        }
    }

    fn page_rows(&self) -> usize {
        self.viewport_rows.saturating_sub(1).max(1)
    }

    fn scroll_up(&mut self) {
        self.scroll_offset += self.page_rows();
        self.runtime.request_render();
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.page_rows());
        self.runtime.request_render();
    }

    fn transcript_rows(&self, width: usize) -> Vec<String> {
        let console = lock_unpoisoned(&self.console);
        let mut rows = Vec::new();
        for message in console.transcript() {
            match message.role {
                Role::User => {
                    let text = format!("> {}", message.text);
                    rows.extend(wrap_preformatted(&text, width).iter().map(|row| cyan(row)));
                }
                Role::System => rows.extend(wrap_preformatted(&message.text, width)),
            }
        }
        rows
    }

    /// Transcript rows that fit the viewport followed by the input row.
    fn render_body(&mut self, width: usize) -> Vec<String> {
        let transcript_len = lock_unpoisoned(&self.console).transcript().len();
        if transcript_len != self.last_transcript_len {
            self.last_transcript_len = transcript_len;
            self.scroll_offset = 0;
        }

        let rows = self.transcript_rows(width);
        let visible = self.viewport_rows;
        let max_offset = rows.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_offset);

        let end = rows.len() - self.scroll_offset;
        let start = end.saturating_sub(visible);
        let mut body: Vec<String> = rows[start..end].to_vec();

        let input_row = body.len();
        body.extend(self.input.render(width));
        self.cursor_pos = self.input.cursor_pos().map(|pos| CursorPos {
            row: input_row + pos.row,
            col: pos.col,
        });
        body
    }
}

impl Component for ConsoleView {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.render_body(width)
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key { key_id, .. } => match key_id.as_str() {
                "enter" => {
                    let typed = self.input.value().to_string();
                    self.with_console(|console, host| {
                        console.on_input_replace(typed);
                        console.on_submit(host);
                    });
                }
                "up" => self.with_console(|console, host| {
                    console.on_input_history_previous();
                    host.request_render();
                }),
                "down" => self.with_console(|console, host| {
                    console.on_input_history_next();
                    host.request_render();
                }),
                "ctrl+c" => self.with_console(|console, host| console.on_control_c(host)),
                "ctrl+d" if self.input.value().is_empty() => {
                    self.with_console(|console, host| console.on_quit(host));
                }
                "pageUp" => self.scroll_up(),
                "pageDown" => self.scroll_down(),
                _ => self.forward_to_input(event),
            },
            InputEvent::Notice { name, payload } => {
                if let Some(cmd) = decode_trigger(name, payload) {
                    self.with_console(|console, host| console.on_trigger(&cmd, host));
                }
            }
            InputEvent::Resize { .. } => self.runtime.request_render(),
            _ => self.forward_to_input(event),
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.cursor_pos
    }

    fn set_terminal_rows(&mut self, rows: usize) {
        self.set_viewport_rows(rows.saturating_sub(CHROME_ROWS));
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(&mut self.input)
    }
}

impl ConsoleView {
    fn forward_to_input(&mut self, event: &InputEvent) {
        let before = self.input.value().to_string();
        self.input.handle_event(event);
        if self.input.value() != before {
            let value = self.input.value().to_string();
            lock_unpoisoned(&self.console).on_input_replace(value);
        }
    }
}

/// Full-screen page: name and navigation, the console, and a tagline.
pub struct PortfolioScreen {
    name: String,
    tagline: String,
    nav: TriggerSender,
    view: ConsoleView,
    terminal_rows: usize,
    cursor_pos: Option<CursorPos>,
}

impl PortfolioScreen {
    pub fn new(
        console: Arc<Mutex<Console>>,
        runtime: RuntimeHandle,
        channel: &TriggerChannel,
        profile: &Profile,
    ) -> Self {
        Self {
            name: profile.name.clone(),
            tagline: profile.tagline.clone(),
            nav: channel.sender(),
            view: ConsoleView::new(console, runtime, channel),
            terminal_rows: DEFAULT_TERMINAL_ROWS,
            cursor_pos: None,
        }
    }

    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    fn header(&self, width: usize) -> String {
        let nav = NAV_LINKS
            .iter()
            .map(|(_, label, cmd)| format!("{} {cmd}", dim(label)))
            .collect::<Vec<_>>()
            .join("  ");
        let used = visible_width(&self.name) + visible_width(&nav);
        if used + 1 > width {
            return bold(&truncate_to_width(&self.name, width));
        }
        let name = bold(&self.name);
        format!("{}{nav}", pad_to_width(&name, width - visible_width(&nav)))
    }

    fn navigate(&self, key_id: &str) -> bool {
        let Some((_, _, cmd)) = NAV_LINKS.iter().find(|(key, _, _)| *key == key_id) else {
            return false;
        };
        if let Err(error) = self.nav.run(*cmd) {
            tracing::warn!(%error, cmd, "navigation trigger dropped");
        }
        true
    }
}

impl Component for PortfolioScreen {
    fn render(&mut self, width: usize) -> Vec<String> {
        let height = self.terminal_rows.max(CHROME_ROWS);
        let mut lines = Vec::with_capacity(height);
        lines.push(self.header(width));

        let body = self.view.render(width);
        self.cursor_pos = self.view.cursor_pos().map(|pos| CursorPos {
            row: pos.row + 1,
            col: pos.col,
        });
        lines.extend(body);

        let footer_row = height - 1;
        lines.truncate(footer_row);
        lines.resize(footer_row, String::new());
        lines.push(dim(&self.tagline));
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Key { key_id, .. } = event {
            if self.navigate(key_id) {
                return;
            }
        }
        self.view.handle_event(event);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.cursor_pos
    }

    fn set_terminal_rows(&mut self, rows: usize) {
        self.terminal_rows = rows;
        self.view.set_terminal_rows(rows);
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        self.view.as_focusable()
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
