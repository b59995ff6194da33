//! Minimal full-screen terminal runtime for transcript-style consoles.
//!
//! Invariant: single output gate. Only `core::output::OutputGate::flush(..)` writes to the
//! terminal.
//!
//! # Public API Overview
//! - Build a root [`Component`] and drive it with [`TUI`].
//! - Feed work into a running runtime from other threads via [`RuntimeHandle`]
//!   (render requests, named notices, stop requests).
//! - Parse/inspect input with [`parse_input_events`] and [`InputEvent`].
//! - Use [`visible_width`] and [`wrap_preformatted`] for ANSI-safe layout.
//!
//! # Runtime Alias
//! [`TUI`] is a type alias for `runtime::tui::TuiRuntime<T>`.

pub mod config;
pub mod logging;

pub mod core;
pub mod platform;
pub mod runtime;
pub mod widgets;

/// Built-in UI components.
pub use crate::widgets::Input;

/// Keyboard input parsing helpers.
pub use crate::core::input::parse_key;
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::terminal::Terminal;
#[cfg(unix)]
pub use crate::platform::process_terminal::ProcessTerminal;

/// Runtime component traits and cursor metadata.
pub use crate::core::component::{Component, Focusable};
pub use crate::core::cursor::CursorPos;

/// Cross-thread runtime handle.
pub use crate::runtime::tui::RuntimeHandle;

/// Alias for the main runtime type.
pub type TUI<T> = crate::runtime::tui::TuiRuntime<T>;

/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::visible_width;
/// Hard-wrapping helper that preserves whitespace and embedded newlines.
pub use crate::core::text::wrap_preformatted;
