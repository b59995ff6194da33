//! Built-in components.

pub mod input;

pub use input::Input;
