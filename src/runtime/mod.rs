//! Runtime orchestration.

pub mod tui;

pub use tui::{RuntimeHandle, TuiRuntime};
