//! Car records held as ledger key-value state.
//!
//! A [`RecordStore`] runs create, read, update, hard delete and soft delete
//! over any [`KeyValueStore`]. A [`Dispatcher`] exposes the same operations
//! behind a function-name entry point (`initCar`, `readRecord`, `updateCar`,
//! `hardDeleteCar`, `softDeleteCar`).

pub mod car;
pub mod dispatch;
mod error;
pub mod events;
pub mod records;
pub mod store;

pub use car::{merge_update, Car, CarUpdate, LookupKey};
pub use dispatch::{Dispatcher, Invocation, Operation, Response};
pub use error::{ErrorEnvelope, RecordError};
#[cfg(feature = "emitter")]
pub use events::RecordEvents;
pub use records::{CreateMode, RecordStore, RecordStoreConfig};
pub use store::{InMemoryStore, KeyValueStore, StoreError};
