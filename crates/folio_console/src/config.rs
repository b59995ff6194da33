use std::path::PathBuf;

use folio_tui::config::env_string_opt;

pub const PROFILE_PATH_ENV_VAR: &str = "FOLIO_PROFILE_PATH";
pub const STARTUP_COMMAND_ENV_VAR: &str = "FOLIO_STARTUP_COMMAND";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// JSON profile replacing the built-in content.
    pub profile_path: Option<PathBuf>,
    /// Command sent through the trigger channel once the console is mounted.
    pub startup_command: Option<String>,
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self {
            profile_path: env_string_opt(PROFILE_PATH_ENV_VAR).map(PathBuf::from),
            startup_command: env_string_opt(STARTUP_COMMAND_ENV_VAR)
                .map(|command| command.trim().to_string()),
        }
    }
}
