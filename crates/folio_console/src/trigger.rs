//! `terminal:run` trigger channel.
//!
//! Anything holding a [`TriggerSender`] (the navigation bar, the startup
//! command) can ask the mounted console to run a command. Triggers travel as
//! runtime notices, so they queue behind keyboard input already received and
//! run to completion one at a time on the event loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use folio_tui::RuntimeHandle;
use serde::{Deserialize, Serialize};

use crate::error::TriggerError;

pub const TRIGGER_EVENT: &str = "terminal:run";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPayload {
    #[serde(default)]
    pub cmd: String,
}

/// Destination for encoded triggers.
pub trait NoticeSink: Send + Sync {
    fn deliver(&self, name: &str, payload: String);
}

impl NoticeSink for RuntimeHandle {
    fn deliver(&self, name: &str, payload: String) {
        self.notify(name, payload);
    }
}

struct Shared {
    sink: Box<dyn NoticeSink>,
    listeners: AtomicUsize,
}

pub struct TriggerChannel {
    shared: Arc<Shared>,
}

impl TriggerChannel {
    pub fn new(sink: impl NoticeSink + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                sink: Box::new(sink),
                listeners: AtomicUsize::new(0),
            }),
        }
    }

    pub fn sender(&self) -> TriggerSender {
        TriggerSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Register a listener; it stays registered until the returned guard drops.
    pub fn listen(&self) -> TriggerListener {
        self.shared.listeners.fetch_add(1, Ordering::SeqCst);
        TriggerListener {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct TriggerSender {
    shared: Arc<Shared>,
}

impl TriggerSender {
    /// Ask the console to run `cmd` as if it had been typed and submitted.
    pub fn run(&self, cmd: impl Into<String>) -> Result<(), TriggerError> {
        let payload = serde_json::to_string(&TriggerPayload { cmd: cmd.into() })?;
        self.send_raw(payload)
    }

    /// Forward an already encoded payload. Decoding happens on receipt, so a
    /// malformed payload reaches the console and becomes a no-op there.
    pub fn send_raw(&self, payload: impl Into<String>) -> Result<(), TriggerError> {
        if self.shared.listeners.load(Ordering::SeqCst) == 0 {
            return Err(TriggerError::NoListener {
                event: TRIGGER_EVENT,
            });
        }

        let payload = payload.into();
        tracing::debug!(event = TRIGGER_EVENT, %payload, "trigger sent");
        self.shared.sink.deliver(TRIGGER_EVENT, payload);
        Ok(())
    }
}

/// Registration held by a mounted console.
pub struct TriggerListener {
    shared: Arc<Shared>,
}

impl Drop for TriggerListener {
    fn drop(&mut self) {
        self.shared.listeners.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Extract the command from a notice.
///
/// Returns `None` for other notice names. A payload that is not a JSON object
/// with a string `cmd` decodes to the empty command.
pub fn decode_trigger(name: &str, payload: &str) -> Option<String> {
    if name != TRIGGER_EVENT {
        return None;
    }

    match serde_json::from_str::<TriggerPayload>(payload) {
        Ok(decoded) => Some(decoded.cmd),
        Err(error) => {
            tracing::debug!(%error, "malformed trigger payload");
            Some(String::new())
        }
    }
}
