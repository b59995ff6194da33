use std::io;
use std::panic;
use std::sync::{Arc, Mutex, MutexGuard};

use folio_console::app::Console;
use folio_console::clock::SystemClock;
use folio_console::commands::CommandRegistry;
use folio_console::config::ConsoleConfig;
use folio_console::profile::Profile;
use folio_console::trigger::TriggerChannel;
use folio_console::tui::PortfolioScreen;
use folio_tui::config::EnvConfig;
use folio_tui::{logging, ProcessTerminal, TUI};

fn main() -> io::Result<()> {
    let env_config = EnvConfig::from_env();
    logging::init(&env_config)?;
    // stderr is hidden behind the alternate screen.
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));

    let console_config = ConsoleConfig::from_env();
    let profile = Profile::load_or_default(console_config.profile_path.as_deref())
        .map_err(io::Error::other)?;
    let registry =
        CommandRegistry::builtin(&profile, Box::new(SystemClock)).map_err(io::Error::other)?;
    let console = Arc::new(Mutex::new(Console::new(&profile, registry)));

    let terminal = ProcessTerminal::with_config(&env_config);
    let mut tui = TUI::new(terminal);
    let channel = TriggerChannel::new(tui.runtime_handle());
    tui.set_root(Box::new(PortfolioScreen::new(
        Arc::clone(&console),
        tui.runtime_handle(),
        &channel,
        &profile,
    )));

    tui.start()?;
    tracing::info!(profile = %profile.name, "console started");

    if let Some(command) = console_config.startup_command {
        if let Err(error) = channel.sender().run(command) {
            tracing::warn!(%error, "startup command dropped");
        }
    }

    while !lock_unpoisoned(&console).should_exit && !tui.stop_requested() {
        tui.run_blocking_once();
    }

    tui.stop()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
