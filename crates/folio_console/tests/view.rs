mod support;

use std::sync::{Arc, Mutex};

use folio_console::app::Console;
use folio_console::profile::Profile;
use folio_console::trigger::{TriggerChannel, TRIGGER_EVENT};
use folio_console::tui::PortfolioScreen;
use folio_tui::core::text::strip_ansi;
use folio_tui::{parse_input_events, visible_width, Component, InputEvent, TUI};

use support::{
    console, inject_input, lock_unpoisoned, rendered_output, SharedTerminal, TerminalTrace,
};

struct Fixture {
    _tui: TUI<SharedTerminal>,
    screen: PortfolioScreen,
    console: Arc<Mutex<Console>>,
}

fn fixture(rows: usize) -> Fixture {
    let (terminal, _) = SharedTerminal::new(40, rows as u16);
    let tui = TUI::new(terminal);
    let console = Arc::new(Mutex::new(console()));
    let channel = TriggerChannel::new(tui.runtime_handle());
    let mut screen = PortfolioScreen::new(
        Arc::clone(&console),
        tui.runtime_handle(),
        &channel,
        &Profile::default(),
    );
    screen.set_terminal_rows(rows);
    Fixture {
        _tui: tui,
        screen,
        console,
    }
}

fn plain(lines: Vec<String>) -> Vec<String> {
    lines.iter().map(|line| strip_ansi(line)).collect()
}

fn focused(screen: &mut PortfolioScreen) -> bool {
    screen
        .as_focusable()
        .is_some_and(|focusable| focusable.is_focused())
}

fn send(screen: &mut PortfolioScreen, data: &str) {
    for event in parse_input_events(data) {
        screen.handle_event(&event);
    }
}

#[test]
fn page_has_header_console_and_footer() {
    let mut fixture = fixture(8);
    let lines = plain(fixture.screen.render(40));

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "laura chen F1 about  F2 work  F3 contact");
    assert_eq!(lines[1], "type `help` to see available commands");
    assert_eq!(lines[2], "> ");
    assert_eq!(lines[6], "");
    assert_eq!(lines[7], "programmer");
}

#[test]
fn user_and_system_lines_render_preformatted() {
    let mut fixture = fixture(16);
    lock_unpoisoned(&fixture.console).submit("help");
    let lines = plain(fixture.screen.render(40));

    assert_eq!(lines[2], "> help");
    assert_eq!(lines[3], "available commands:");
    assert_eq!(lines[4], "  help            show this help");
    assert_eq!(lines[8], "  echo <text>     print text");
}

#[test]
fn long_rows_hard_wrap_at_width() {
    let mut fixture = fixture(10);
    lock_unpoisoned(&fixture.console).submit("echo 0123456789012345678901234567890123456789abc");
    let lines = plain(fixture.screen.render(40));

    assert!(lines.contains(&"0123456789012345678901234567890123456789".to_string()));
    assert!(lines.contains(&"abc".to_string()));
}

#[test]
fn new_output_pins_viewport_to_bottom() {
    let mut fixture = fixture(8);
    for index in 0..10 {
        lock_unpoisoned(&fixture.console).submit(&format!("echo line{index}"));
    }
    let lines = plain(fixture.screen.render(40));
    assert_eq!(lines[5], "line9");
    assert_eq!(lines[6], "> ");

    send(&mut fixture.screen, "\x1b[5~");
    let lines = plain(fixture.screen.render(40));
    assert_eq!(fixture.screen.view().scroll_offset(), 4);
    assert!(!lines.contains(&"line9".to_string()));

    lock_unpoisoned(&fixture.console).submit("echo fresh");
    let lines = plain(fixture.screen.render(40));
    assert_eq!(fixture.screen.view().scroll_offset(), 0);
    assert_eq!(lines[5], "fresh");
}

#[test]
fn page_down_returns_to_bottom() {
    let mut fixture = fixture(8);
    for index in 0..10 {
        lock_unpoisoned(&fixture.console).submit(&format!("echo line{index}"));
    }
    fixture.screen.render(40);

    send(&mut fixture.screen, "\x1b[5~\x1b[5~\x1b[6~\x1b[6~\x1b[6~");
    fixture.screen.render(40);
    assert_eq!(fixture.screen.view().scroll_offset(), 0);
}

#[test]
fn history_keys_fill_the_input_row() {
    let mut fixture = fixture(8);
    send(&mut fixture.screen, "echo hi\r");
    send(&mut fixture.screen, "\x1b[A");

    let lines = plain(fixture.screen.render(40));
    assert_eq!(lock_unpoisoned(&fixture.console).input, "echo hi");
    assert_eq!(lines[2], "> echo hi");
    assert_eq!(lines[3], "hi");
    assert_eq!(lines[4], "> echo hi");

    send(&mut fixture.screen, "\x1b[B");
    assert_eq!(lock_unpoisoned(&fixture.console).input, "");
}

fn mounted(rows: u16) -> (TUI<SharedTerminal>, Arc<Mutex<TerminalTrace>>, Arc<Mutex<Console>>) {
    let (terminal, trace) = SharedTerminal::new(50, rows);
    let console = Arc::new(Mutex::new(console()));
    let mut tui = TUI::new(terminal);
    let channel = TriggerChannel::new(tui.runtime_handle());
    tui.set_root(Box::new(PortfolioScreen::new(
        Arc::clone(&console),
        tui.runtime_handle(),
        &channel,
        &Profile::default(),
    )));
    tui.start().expect("start");
    tui.run_once();
    (tui, trace, console)
}

#[test]
fn navigation_keys_run_commands_through_the_trigger_channel() {
    let (mut tui, trace, console) = mounted(20);

    inject_input(&trace, "\x1bOQ");
    tui.run_once();
    tui.run_once();

    let console = lock_unpoisoned(&console);
    assert_eq!(
        console.history().entries().collect::<Vec<_>>(),
        vec!["work"]
    );
    assert!(rendered_output(&trace).contains("figma"));
}

#[test]
fn trigger_focuses_the_input_line() {
    let mut fixture = fixture(10);
    assert!(!focused(&mut fixture.screen));

    fixture.screen.handle_event(&InputEvent::Notice {
        name: TRIGGER_EVENT.to_string(),
        payload: serde_json::json!({ "cmd": "about" }).to_string(),
    });

    assert!(focused(&mut fixture.screen));
    assert_eq!(lock_unpoisoned(&fixture.console).input, "");
}

#[test]
fn long_name_is_cut_to_the_header_row() {
    let (terminal, _) = SharedTerminal::new(12, 8);
    let tui = TUI::new(terminal);
    let channel = TriggerChannel::new(tui.runtime_handle());
    let profile = Profile {
        name: "a very long portfolio owner name".to_string(),
        ..Profile::default()
    };
    let mut screen = PortfolioScreen::new(
        Arc::new(Mutex::new(console())),
        tui.runtime_handle(),
        &channel,
        &profile,
    );
    screen.set_terminal_rows(8);

    let lines = screen.render(12);
    assert_eq!(strip_ansi(&lines[0]), "a very long ");
    assert!(lines.iter().all(|line| visible_width(line) <= 12));
}

#[test]
fn control_c_twice_requests_stop() {
    let (mut tui, trace, console) = mounted(10);

    inject_input(&trace, "abc");
    inject_input(&trace, "\x03");
    tui.run_once();
    assert_eq!(lock_unpoisoned(&console).input, "");
    assert!(!tui.stop_requested());

    inject_input(&trace, "\x03");
    tui.run_once();
    assert!(lock_unpoisoned(&console).should_exit);
    assert!(tui.stop_requested());

    tui.stop().expect("stop");
    assert!(rendered_output(&trace).ends_with("\x1b[?25h\x1b[?2004l\x1b[?1049l"));
}
