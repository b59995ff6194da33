//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const WRITE_LOG_ENV_VAR: &str = "FOLIO_WRITE_LOG";
pub const LOG_FILE_ENV_VAR: &str = "FOLIO_LOG";
pub const DEBUG_ENV_VAR: &str = "FOLIO_DEBUG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Append every raw terminal write to this file.
    pub write_log: Option<PathBuf>,
    /// Destination for `tracing` output; stdout belongs to the UI.
    pub log_file: Option<PathBuf>,
    /// Raise the default log level to `debug`.
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            write_log: env_string_opt(WRITE_LOG_ENV_VAR).map(PathBuf::from),
            log_file: env_string_opt(LOG_FILE_ENV_VAR).map(PathBuf::from),
            debug: env_flag(DEBUG_ENV_VAR),
        }
    }
}

pub fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

pub fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{EnvConfig, DEBUG_ENV_VAR, LOG_FILE_ENV_VAR, WRITE_LOG_ENV_VAR};
    use std::env;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard(WRITE_LOG_ENV_VAR, None);
        let _g2 = set_env_guard(LOG_FILE_ENV_VAR, None);
        let _g3 = set_env_guard(DEBUG_ENV_VAR, None);

        assert_eq!(EnvConfig::from_env(), EnvConfig::default());
    }

    #[test]
    fn env_values_are_read() {
        let _lock = env_lock();
        let _g1 = set_env_guard(WRITE_LOG_ENV_VAR, Some("/tmp/folio-writes.log"));
        let _g2 = set_env_guard(LOG_FILE_ENV_VAR, Some("/tmp/folio.log"));
        let _g3 = set_env_guard(DEBUG_ENV_VAR, Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(
            config.write_log,
            Some(PathBuf::from("/tmp/folio-writes.log"))
        );
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/folio.log")));
        assert!(config.debug);
    }

    #[test]
    fn blank_paths_and_non_one_flags_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard(WRITE_LOG_ENV_VAR, Some("  "));
        let _g2 = set_env_guard(LOG_FILE_ENV_VAR, Some(""));
        let _g3 = set_env_guard(DEBUG_ENV_VAR, Some("true"));

        assert_eq!(EnvConfig::from_env(), EnvConfig::default());
    }
}
