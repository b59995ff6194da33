use std::panic::{self, AssertUnwindSafe};

use crate::commands::{CommandOutput, CommandRegistry};
use crate::history::HistoryRing;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }
}

pub trait HostOps {
    fn request_render(&mut self);
    /// Return keyboard focus to the input line.
    fn request_focus(&mut self);
    fn request_stop(&mut self);
}

/// Casual openers answered with the profile greeting before any command lookup.
const GREETINGS: [&str; 7] = ["hi", "hey", "hello", "yo", "sup", "hiya", "heya"];

fn is_greeting(name: &str) -> bool {
    let lowered = name.to_lowercase();
    GREETINGS.contains(&lowered.as_str())
}

/// Command console state: transcript, input line, history and command table.
#[derive(Debug)]
pub struct Console {
    pub input: String,
    pub should_exit: bool,
    transcript: Vec<Message>,
    history: HistoryRing,
    registry: CommandRegistry,
    greeting: String,
}

impl Console {
    /// A console whose transcript starts with the profile banner.
    pub fn new(profile: &Profile, registry: CommandRegistry) -> Self {
        Self {
            input: String::new(),
            should_exit: false,
            transcript: vec![Message::system(profile.banner.clone())],
            history: HistoryRing::new(),
            registry,
            greeting: profile.greeting.clone(),
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Record and execute one command line.
    ///
    /// Blank lines are ignored. Everything else lands in history and in the
    /// transcript as a user message, followed by at most one system message.
    pub fn submit(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        self.history.record(line);
        self.transcript.push(Message::user(line));

        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return;
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        if is_greeting(name) {
            tracing::debug!(name, "greeting");
            self.push_system(self.greeting.clone());
            return;
        }

        let Some(handler) = self.registry.get(name) else {
            tracing::debug!(name, "unknown command");
            self.push_system(format!("unknown command: {name}"));
            return;
        };

        tracing::debug!(name, args = args.len(), "dispatch");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&args)));
        match outcome {
            Ok(Ok(CommandOutput::Text(text))) => self.push_system(text),
            Ok(Ok(CommandOutput::Clear)) => self.transcript.clear(),
            Ok(Ok(CommandOutput::Help)) => {
                let listing = self.registry.help_text();
                self.push_system(listing);
            }
            Ok(Err(error)) => {
                tracing::warn!(name, %error, "command failed");
                self.push_system(format!("command failed: {name}: {error}"));
            }
            Err(_) => {
                tracing::warn!(name, "command panicked");
                self.push_system(format!("command failed: {name}"));
            }
        }
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.transcript.push(Message::system(text));
    }

    /// Replace the input line with what the user typed.
    ///
    /// Browsing state is left alone, so Up/Down continue from the recalled
    /// entry after an edit.
    pub fn on_input_replace(&mut self, text: String) {
        self.input = text;
    }

    pub fn on_submit(&mut self, host: &mut dyn HostOps) {
        let submitted = std::mem::take(&mut self.input);
        self.history.reset_navigation();
        self.submit(&submitted);
        host.request_render();
    }

    pub fn on_input_history_previous(&mut self) {
        if let Some(previous) = self.history.recall_older() {
            self.input = previous;
        }
    }

    pub fn on_input_history_next(&mut self) {
        if let Some(next) = self.history.recall_newer() {
            self.input = next;
        }
    }

    /// Run a command delivered through the trigger channel. An empty command
    /// leaves the input line and history browsing untouched.
    pub fn on_trigger(&mut self, cmd: &str, host: &mut dyn HostOps) {
        if cmd.is_empty() {
            return;
        }
        tracing::debug!(cmd, "trigger received");
        self.input.clear();
        self.history.reset_navigation();
        self.submit(cmd);
        host.request_render();
        host.request_focus();
    }

    /// Ctrl+C: clear a non-empty input line, otherwise quit.
    pub fn on_control_c(&mut self, host: &mut dyn HostOps) {
        if !self.input.is_empty() {
            self.input.clear();
            self.history.reset_navigation();
            host.request_render();
            return;
        }

        self.on_quit(host);
    }

    pub fn on_quit(&mut self, host: &mut dyn HostOps) {
        self.should_exit = true;
        host.request_stop();
        host.request_render();
    }
}
