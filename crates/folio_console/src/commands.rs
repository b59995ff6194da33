use std::collections::BTreeMap;
use std::fmt;

use crate::clock::{format_date, Clock};
use crate::error::{CommandError, ConsoleError};
use crate::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Appended to the transcript as one system message.
    Text(String),
    /// Empties the transcript.
    Clear,
    /// The registry listing, rendered when the command runs.
    Help,
}

pub type CommandResult = Result<CommandOutput, CommandError>;
pub type CommandHandler = Box<dyn Fn(&[String]) -> CommandResult>;

struct CommandEntry {
    usage: String,
    summary: String,
    handler: CommandHandler,
}

/// Command name to handler table. Built once, then only read.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandEntry>,
    order: Vec<String>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.order)
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. `usage` is shown in `help` and defaults to the name.
    pub fn register<F>(
        &mut self,
        name: &str,
        usage: Option<&str>,
        summary: &str,
        handler: F,
    ) -> Result<(), ConsoleError>
    where
        F: Fn(&[String]) -> CommandResult + 'static,
    {
        if name.is_empty()
            || name
                .chars()
                .any(|ch| ch.is_whitespace() || ch.is_uppercase())
        {
            return Err(ConsoleError::InvalidCommandName {
                name: name.to_string(),
            });
        }
        if self.commands.contains_key(name) {
            return Err(ConsoleError::DuplicateCommand {
                name: name.to_string(),
            });
        }

        self.commands.insert(
            name.to_string(),
            CommandEntry {
                usage: usage.unwrap_or(name).to_string(),
                summary: summary.to_string(),
                handler: Box::new(handler),
            },
        );
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Look up `name` exactly as typed.
    pub fn get(&self, name: &str) -> Option<&CommandHandler> {
        self.commands.get(name).map(|entry| &entry.handler)
    }

    pub fn help_text(&self) -> String {
        let mut text = String::from("available commands:");
        for name in &self.order {
            if let Some(entry) = self.commands.get(name) {
                text.push_str(&format!("\n  {:<15} {}", entry.usage, entry.summary));
            }
        }
        text
    }

    /// The portfolio commands: help, about, work, contact, echo, date, clear.
    pub fn builtin(profile: &Profile, clock: Box<dyn Clock>) -> Result<Self, ConsoleError> {
        let mut registry = Self::new();

        registry.register("help", None, "show this help", |_| Ok(CommandOutput::Help))?;

        let about = format!("  {} — {}", profile.name, profile.bio);
        registry.register("about", None, "short bio", move |_| {
            Ok(CommandOutput::Text(about.clone()))
        })?;

        let work = profile
            .work
            .iter()
            .map(|entry| format!("  {:<16} {} | {}", entry.employer, entry.role, entry.period))
            .collect::<Vec<_>>()
            .join("\n");
        registry.register("work", None, "work experience", move |_| {
            Ok(CommandOutput::Text(work.clone()))
        })?;

        let contact = format!(
            "  email: {}\n  github: {}\n  linkedin: {}",
            profile.contact.email, profile.contact.github, profile.contact.linkedin
        );
        registry.register("contact", None, "contact info", move |_| {
            Ok(CommandOutput::Text(contact.clone()))
        })?;

        registry.register("echo", Some("echo <text>"), "print text", |args| {
            Ok(CommandOutput::Text(args.join(" ")))
        })?;

        registry.register("date", None, "current date/time", move |_| {
            Ok(CommandOutput::Text(format_date(clock.now())?))
        })?;

        registry.register("clear", None, "clear the terminal", |_| {
            Ok(CommandOutput::Clear)
        })?;

        Ok(registry)
    }
}
