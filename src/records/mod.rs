//! Records - CRUD and lifecycle rules for Car records over a key-value store.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{InMemoryStore, RecordStore};
//!
//! let records = RecordStore::new(InMemoryStore::new());
//! records.create(r#"{"engine_no":"E1","name":"B"}"#)?;
//! records.update(r#"{"engine_no":"E1","name":"C"}"#)?;
//! records.soft_delete(r#"{"engine_no":"E1"}"#)?;
//! let bytes = records.read(r#"{"engine_no":"E1"}"#)?;
//! ```

mod config;
mod record_store;

pub use config::{CreateMode, RecordStoreConfig};
pub use record_store::RecordStore;
