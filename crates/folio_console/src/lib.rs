//! Portfolio command console.
//!
//! A transcript-style terminal page: visitors type short commands (`help`,
//! `about`, `work`, `contact`, `echo`, `date`, `clear`) and read the replies in
//! a scrolling transcript.
//!
//! ## Configuration
//!
//! - `FOLIO_PROFILE_PATH`: JSON file replacing the built-in profile. The shape
//!   matches [`profile::Profile`]; unknown fields are rejected.
//! - `FOLIO_STARTUP_COMMAND`: command run through the trigger channel right
//!   after start.
//! - `FOLIO_LOG`, `FOLIO_DEBUG`, `FOLIO_WRITE_LOG`: logging and terminal write
//!   capture, see `folio_tui::config`.
//!
//! ## Triggers
//!
//! Other parts of the program ask the console to run a command through a
//! [`trigger::TriggerSender`]. The payload is `{"cmd": "<line>"}` under the
//! `terminal:run` notice name; the console clears its input, submits the line
//! and takes focus.

pub mod app;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod profile;
pub mod trigger;
pub mod tui;
