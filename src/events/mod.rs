//! Record lifecycle events, fired after the store accepted a write.
//!
//! Listeners receive the JSON string `{"engine_no":"<key>"}`. Delivery runs on
//! the emitter's own threads, so a listener never blocks or fails the
//! operation that triggered it.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{events, InMemoryStore, RecordStore};
//!
//! let records = RecordStore::new(InMemoryStore::new());
//! records.events().on(events::CAR_CREATED, |payload: String| {
//!     println!("created: {}", payload);
//! });
//! records.create(r#"{"engine_no":"E1"}"#)?;
//! ```

#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
#[cfg(feature = "emitter")]
use log::warn;
use serde::{Deserialize, Serialize};

pub const CAR_CREATED: &str = "car.created";
pub const CAR_UPDATED: &str = "car.updated";
pub const CAR_HARD_DELETED: &str = "car.hard_deleted";
pub const CAR_SOFT_DELETED: &str = "car.soft_deleted";

/// Payload carried by every lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEvent {
    pub engine_no: String,
}

impl RecordEvent {
    /// Parses a payload received by a listener.
    pub fn parse(payload: &str) -> Option<Self> {
        serde_json::from_str(payload).ok()
    }
}

/// Emitter shared by a [`RecordStore`](crate::RecordStore).
#[cfg(feature = "emitter")]
pub struct RecordEvents {
    emitter: Mutex<EventEmitter>,
}

#[cfg(feature = "emitter")]
impl Default for RecordEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "emitter")]
impl RecordEvents {
    pub fn new() -> Self {
        Self {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener for one of the `CAR_*` event names.
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        emitter.on(event, listener);
    }

    pub(crate) fn emit(&self, event: &str, engine_no: &str) {
        let payload = match serde_json::to_string(&RecordEvent {
            engine_no: engine_no.to_string(),
        }) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    "event=emit_skipped name={} engine_no={} error={}",
                    event, engine_no, e
                );
                return;
            }
        };

        let mut emitter = self
            .emitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        emitter.emit(event, payload);
    }
}
