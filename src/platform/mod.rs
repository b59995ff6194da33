//! Platform-specific terminal backends.

#[cfg(unix)]
pub mod process_terminal;
