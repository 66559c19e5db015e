//! dispatch - function-name entry point over a [`RecordStore`](crate::RecordStore).
//!
//! The host hands over a function name and a list of string arguments. The
//! name is resolved into a closed [`Operation`] and the first argument is
//! passed to the matching record operation as a JSON payload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use car_ledger::dispatch;
//!
//! let dispatcher = dispatch::in_memory();
//! let response = dispatcher.invoke("initCar", &[r#"{"engine_no":"E1"}"#.to_string()]);
//! assert!(response.is_ok());
//!
//! let response = dispatcher.invoke("readRecord", &[r#"{"engine_no":"E1"}"#.to_string()]);
//! let car: car_ledger::Car = serde_json::from_slice(&response.payload)?;
//! ```
//!
//! ## Operations
//!
//! | Function | Payload | Success payload |
//! |---|---|---|
//! | `initCar` | Car JSON | empty |
//! | `readRecord` | `{engine_no}` | stored Car JSON bytes |
//! | `updateCar` | partial Car JSON | empty |
//! | `hardDeleteCar` | `{engine_no, ...}` | empty |
//! | `softDeleteCar` | `{engine_no, ...}` | empty |

mod dispatcher;
mod operation;

pub use dispatcher::{Dispatcher, Invocation, Response};
pub use operation::Operation;

use crate::records::RecordStore;
use crate::store::InMemoryStore;

/// A dispatcher over a fresh [`InMemoryStore`].
pub fn in_memory() -> Dispatcher<InMemoryStore> {
    Dispatcher::new(RecordStore::new(InMemoryStore::new()))
}
