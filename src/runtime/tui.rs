//! TUI runtime: event queue, input dispatch and line-diff rendering.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::core::component::Component;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::Terminal;

const STOP_DRAIN_MAX_MS: u64 = 1000;
const STOP_DRAIN_IDLE_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingEvent {
    Input(String),
    Notice { name: String, payload: String },
}

#[derive(Default)]
struct RuntimeWakeState {
    pending: VecDeque<PendingEvent>,
    pending_resize: bool,
    render_requested: bool,
    stop_requested: bool,
}

#[derive(Default)]
struct RuntimeWake {
    state: Mutex<RuntimeWakeState>,
    cvar: Condvar,
}

impl RuntimeWake {
    fn lock(&self) -> MutexGuard<'_, RuntimeWakeState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait_for_event(&self) -> bool {
        let mut state = self.lock();
        while !state.stop_requested
            && state.pending.is_empty()
            && !state.pending_resize
            && !state.render_requested
        {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }

        !state.stop_requested
    }

    fn push(&self, event: PendingEvent) {
        let mut state = self.lock();
        state.pending.push_back(event);
        self.cvar.notify_one();
    }

    fn signal_resize(&self) {
        let mut state = self.lock();
        state.pending_resize = true;
        self.cvar.notify_one();
    }

    fn request_render(&self) {
        let mut state = self.lock();
        state.render_requested = true;
        self.cvar.notify_one();
    }

    fn request_stop(&self) {
        let mut state = self.lock();
        state.stop_requested = true;
        self.cvar.notify_all();
    }

    fn stop_requested(&self) -> bool {
        self.lock().stop_requested
    }

    fn reset_for_start(&self) {
        let mut state = self.lock();
        state.stop_requested = false;
        state.pending.clear();
        state.pending_resize = false;
        state.render_requested = false;
    }

    fn take_pending_resize(&self) -> bool {
        std::mem::take(&mut self.lock().pending_resize)
    }

    fn drain_pending(&self) -> Vec<PendingEvent> {
        self.lock().pending.drain(..).collect()
    }

    fn take_render_requested(&self) -> bool {
        std::mem::take(&mut self.lock().render_requested)
    }
}

/// Cloneable, thread-safe handle into a runtime's event queue.
#[derive(Clone)]
pub struct RuntimeHandle {
    wake: Arc<RuntimeWake>,
}

impl RuntimeHandle {
    pub fn request_render(&self) {
        self.wake.request_render();
    }

    /// Queue a named notice for the root component.
    ///
    /// Notices share one FIFO with terminal input, so they are handled in the
    /// order the event loop receives them and never while another event runs.
    pub fn notify(&self, name: impl Into<String>, payload: impl Into<String>) {
        self.wake.push(PendingEvent::Notice {
            name: name.into(),
            payload: payload.into(),
        });
    }

    /// Ask the owning loop to stop; `run_blocking_once` returns without work afterwards.
    pub fn request_stop(&self) {
        self.wake.request_stop();
    }
}

struct EmptyRoot;

impl Component for EmptyRoot {
    fn render(&mut self, _width: usize) -> Vec<String> {
        Vec::new()
    }
}

pub struct TuiRuntime<T: Terminal> {
    terminal: T,
    output: OutputGate,
    root: Box<dyn Component>,
    previous_frame: Vec<String>,
    previous_size: Option<(u16, u16)>,
    stopped: bool,
    wake: Arc<RuntimeWake>,
}

impl<T: Terminal> TuiRuntime<T> {
    /// Create a stopped runtime with an empty root; install one with [`Self::set_root`].
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            output: OutputGate::new(),
            root: Box::new(EmptyRoot),
            previous_frame: Vec::new(),
            previous_size: None,
            stopped: true,
            wake: Arc::new(RuntimeWake::default()),
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    /// Replace the root component. The next render redraws the whole screen.
    pub fn set_root(&mut self, root: Box<dyn Component>) {
        self.root = root;
        if !self.stopped {
            if let Some(focusable) = self.root.as_focusable() {
                focusable.set_focused(true);
            }
        }
        self.previous_size = None;
        self.request_render();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether a stop was requested through a [`RuntimeHandle`].
    pub fn stop_requested(&self) -> bool {
        self.wake.stop_requested()
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.output.clear();
        self.wake.reset_for_start();
        self.previous_frame.clear();
        self.previous_size = None;

        let wake_input = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        self.terminal.start(
            Box::new(move |data| {
                wake_input.push(PendingEvent::Input(data));
            }),
            Box::new(move || {
                wake_resize.signal_resize();
            }),
        )?;
        self.stopped = false;

        if let Some(focusable) = self.root.as_focusable() {
            focusable.set_focused(true);
        }

        self.output.push(TerminalCmd::AltScreenEnter);
        self.output.push(TerminalCmd::BracketedPasteEnable);
        self.output.push(TerminalCmd::HideCursor);
        self.output.flush(&mut self.terminal);
        self.request_render();

        tracing::debug!(
            columns = self.terminal.columns(),
            rows = self.terminal.rows(),
            "runtime started"
        );
        Ok(())
    }

    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.wake.request_stop();
        self.output.push(TerminalCmd::ShowCursor);
        self.output.push(TerminalCmd::BracketedPasteDisable);
        self.output.push(TerminalCmd::AltScreenLeave);
        self.output.flush(&mut self.terminal);
        self.terminal
            .drain_input(STOP_DRAIN_MAX_MS, STOP_DRAIN_IDLE_MS);
        let result = self.terminal.stop();
        self.stopped = true;
        tracing::debug!("runtime stopped");
        result
    }

    /// Block until at least one input/resize/notice/render event is available,
    /// then process everything queued and render once.
    ///
    /// Note: this does **not** run an event loop until stopped; callers typically
    /// call this in a loop.
    pub fn run_blocking_once(&mut self) {
        if self.stopped {
            return;
        }

        if !self.wake.wait_for_event() {
            return;
        }

        self.run_once();
    }

    /// Process queued work without blocking, then render if anything changed.
    pub fn run_once(&mut self) {
        if self.stopped {
            return;
        }

        if self.wake.take_pending_resize() {
            let event = InputEvent::Resize {
                columns: self.terminal.columns(),
                rows: self.terminal.rows(),
            };
            self.root.handle_event(&event);
            self.request_render();
        }

        for pending in self.wake.drain_pending() {
            match pending {
                PendingEvent::Input(data) => self.handle_input(&data),
                PendingEvent::Notice { name, payload } => {
                    self.root
                        .handle_event(&InputEvent::Notice { name, payload });
                    self.request_render();
                }
            }
        }

        self.render_if_needed();
    }

    pub fn handle_input(&mut self, data: &str) {
        let events = parse_input_events(data);
        if events.is_empty() {
            return;
        }

        for event in &events {
            self.root.handle_event(event);
        }
        self.request_render();
    }

    pub fn request_render(&mut self) {
        self.wake.request_render();
    }

    pub fn render_if_needed(&mut self) {
        if self.wake.take_render_requested() {
            self.do_render();
        }
        self.output.flush(&mut self.terminal);
    }

    fn do_render(&mut self) {
        let columns = self.terminal.columns();
        let rows = self.terminal.rows();
        let width = columns as usize;
        let height = rows as usize;

        self.root.set_terminal_rows(height);
        let mut lines = self.root.render(width);
        let mut cursor = self.root.cursor_pos();

        // Keep the bottom of an over-tall frame visible.
        if lines.len() > height {
            let overflow = lines.len() - height;
            lines.drain(..overflow);
            cursor = cursor.and_then(|pos| {
                pos.row.checked_sub(overflow).map(|row| crate::CursorPos {
                    row,
                    col: pos.col,
                })
            });
        }

        let full_redraw = self.previous_size != Some((columns, rows));
        if full_redraw {
            self.output.push(TerminalCmd::ClearScreen);
        }

        self.output.push(TerminalCmd::HideCursor);
        for row in 0..height {
            let line = lines.get(row).map(String::as_str).unwrap_or("");
            let previous = self.previous_frame.get(row).map(String::as_str);
            if !full_redraw && previous == Some(line) {
                continue;
            }
            if !full_redraw && previous.is_none() && line.is_empty() {
                continue;
            }
            self.output.push(TerminalCmd::MoveTo { row, col: 0 });
            self.output.push(TerminalCmd::Bytes(format!("{line}\x1b[0m")));
            self.output.push(TerminalCmd::ClearLineRight);
        }

        if let Some(pos) = cursor {
            self.output.push(TerminalCmd::MoveTo {
                row: pos.row,
                col: pos.col.min(width.saturating_sub(1)),
            });
            self.output.push(TerminalCmd::ShowCursor);
        }

        self.previous_frame = lines;
        self.previous_size = Some((columns, rows));
    }
}

impl<T: Terminal> Drop for TuiRuntime<T> {
    fn drop(&mut self) {
        if !self.stopped {
            let _ = self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TuiRuntime;
    use crate::core::component::Component;
    use crate::core::cursor::CursorPos;
    use crate::core::input_event::InputEvent;
    use crate::core::terminal::Terminal;
    use std::sync::{Arc, Mutex};

    type Handler = Box<dyn FnMut(String) + Send>;

    #[derive(Default)]
    struct Trace {
        writes: Vec<String>,
        on_input: Option<Handler>,
        stops: usize,
    }

    struct FakeTerminal {
        trace: Arc<Mutex<Trace>>,
        columns: u16,
        rows: u16,
    }

    impl Terminal for FakeTerminal {
        fn start(
            &mut self,
            on_input: Box<dyn FnMut(String) + Send>,
            _on_resize: Box<dyn FnMut() + Send>,
        ) -> std::io::Result<()> {
            self.trace.lock().expect("trace lock").on_input = Some(on_input);
            Ok(())
        }

        fn stop(&mut self) -> std::io::Result<()> {
            self.trace.lock().expect("trace lock").stops += 1;
            Ok(())
        }

        fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

        fn write(&mut self, data: &str) {
            self.trace
                .lock()
                .expect("trace lock")
                .writes
                .push(data.to_string());
        }

        fn columns(&self) -> u16 {
            self.columns
        }

        fn rows(&self) -> u16 {
            self.rows
        }
    }

    struct Recorder {
        events: Arc<Mutex<Vec<InputEvent>>>,
        lines: Vec<String>,
    }

    impl Component for Recorder {
        fn render(&mut self, _width: usize) -> Vec<String> {
            self.lines.clone()
        }

        fn handle_event(&mut self, event: &InputEvent) {
            self.events.lock().expect("events lock").push(event.clone());
        }

        fn cursor_pos(&self) -> Option<CursorPos> {
            Some(CursorPos { row: 1, col: 2 })
        }
    }

    fn runtime(
        lines: Vec<&str>,
        rows: u16,
    ) -> (
        TuiRuntime<FakeTerminal>,
        Arc<Mutex<Trace>>,
        Arc<Mutex<Vec<InputEvent>>>,
    ) {
        let trace = Arc::new(Mutex::new(Trace::default()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let terminal = FakeTerminal {
            trace: Arc::clone(&trace),
            columns: 20,
            rows,
        };
        let root = Recorder {
            events: Arc::clone(&events),
            lines: lines.into_iter().map(str::to_string).collect(),
        };
        let mut tui = TuiRuntime::new(terminal);
        tui.set_root(Box::new(root));
        (tui, trace, events)
    }

    fn inject(trace: &Arc<Mutex<Trace>>, data: &str) {
        let mut trace = trace.lock().expect("trace lock");
        let handler = trace.on_input.as_mut().expect("input handler registered");
        handler(data.to_string());
    }

    fn output(trace: &Arc<Mutex<Trace>>) -> String {
        trace.lock().expect("trace lock").writes.join("")
    }

    #[test]
    fn first_render_clears_and_draws_every_row() {
        let (mut tui, trace, _) = runtime(vec!["one", "two"], 3);
        tui.start().expect("start");
        tui.run_once();

        let out = output(&trace);
        assert!(out.contains("\x1b[?1049h"));
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[1;1Hone"));
        assert!(out.contains("\x1b[2;1Htwo"));
        assert!(out.contains("\x1b[2;3H\x1b[?25h"));
    }

    #[test]
    fn unchanged_frame_is_not_rewritten() {
        let (mut tui, trace, _) = runtime(vec!["same"], 2);
        tui.start().expect("start");
        tui.run_once();
        trace.lock().expect("trace lock").writes.clear();

        tui.request_render();
        tui.run_once();
        assert!(!output(&trace).contains("same"));
    }

    #[test]
    fn input_and_notices_are_delivered_in_queue_order() {
        let (mut tui, trace, events) = runtime(vec![], 2);
        tui.start().expect("start");
        let handle = tui.runtime_handle();

        inject(&trace, "a");
        handle.notify("terminal:run", "{\"cmd\":\"about\"}");
        inject(&trace, "\r");
        tui.run_once();

        let events = events.lock().expect("events lock");
        assert_eq!(
            *events,
            vec![
                InputEvent::Text {
                    raw: "a".to_string(),
                    text: "a".to_string(),
                },
                InputEvent::Notice {
                    name: "terminal:run".to_string(),
                    payload: "{\"cmd\":\"about\"}".to_string(),
                },
                InputEvent::Key {
                    raw: "\r".to_string(),
                    key_id: "enter".to_string(),
                },
            ]
        );
    }

    #[test]
    fn over_tall_frame_keeps_bottom_rows() {
        let (mut tui, trace, _) = runtime(vec!["a", "b", "c"], 2);
        tui.start().expect("start");
        tui.run_once();

        let out = output(&trace);
        assert!(!out.contains("\x1b[1;1Ha"));
        assert!(out.contains("\x1b[1;1Hb"));
        assert!(out.contains("\x1b[2;1Hc"));
    }

    #[test]
    fn stop_request_short_circuits_blocking_run_and_stop_restores_terminal() {
        let (mut tui, trace, _) = runtime(vec![], 2);
        tui.start().expect("start");
        tui.runtime_handle().request_stop();
        assert!(tui.stop_requested());
        tui.run_blocking_once();

        tui.stop().expect("stop");
        assert!(tui.is_stopped());
        assert!(output(&trace).ends_with("\x1b[?25h\x1b[?2004l\x1b[?1049l"));
        assert_eq!(trace.lock().expect("trace lock").stops, 1);
    }
}
