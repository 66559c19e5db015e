//! RecordStore - the five record operations and their gating rules.
//!
//! # Invariants
//! - Every operation re-reads current state from the store; nothing is cached.
//! - A soft-deleted record stays readable but rejects update and soft delete.
//! - After a hard delete the key is absent and reads report not-found.

use log::{debug, info, warn};

use crate::car::{merge_update, validate_engine_no, Car, CarUpdate, LookupKey};
use crate::error::RecordError;
use crate::events;
#[cfg(feature = "emitter")]
use crate::events::RecordEvents;
use crate::store::KeyValueStore;

use super::config::{CreateMode, RecordStoreConfig};

/// Car record operations over an injected key-value store.
///
/// The string entry points take the JSON payload exactly as it arrives from a
/// caller. The typed entry points (`create_car`, `get_car`, ...) skip decoding.
pub struct RecordStore<S> {
    store: S,
    config: RecordStoreConfig,
    #[cfg(feature = "emitter")]
    events: RecordEvents,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Create a record store with default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: RecordStoreConfig::default(),
            #[cfg(feature = "emitter")]
            events: RecordEvents::new(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: RecordStoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RecordStoreConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lifecycle event listeners.
    #[cfg(feature = "emitter")]
    pub fn events(&self) -> &RecordEvents {
        &self.events
    }

    /// Create a record from a Car JSON payload.
    pub fn create(&self, input: &str) -> Result<(), RecordError> {
        Car::from_json(input)
            .and_then(|car| self.create_car(&car))
            .inspect_err(|e| log_failure("create", e))
    }

    /// Create (or, under `CreateMode::Upsert`, overwrite) a record.
    pub fn create_car(&self, car: &Car) -> Result<(), RecordError> {
        validate_engine_no(&car.engine_no)?;

        if self.config.create_mode == CreateMode::RejectExisting
            && self.lookup(&car.engine_no)?.is_some()
        {
            return Err(RecordError::AlreadyExists {
                engine_no: car.engine_no.clone(),
            });
        }

        self.write(&car.engine_no, car)?;
        info!("event=car_created engine_no={}", car.engine_no);
        self.emit(events::CAR_CREATED, &car.engine_no);
        Ok(())
    }

    /// Read the stored bytes for a `{engine_no}` payload, unchanged.
    pub fn read(&self, input: &str) -> Result<Vec<u8>, RecordError> {
        LookupKey::from_json(input)
            .and_then(|key| self.fetch(&key.engine_no))
            .inspect_err(|e| log_failure("read", e))
    }

    /// Read and decode the record stored under `engine_no`.
    ///
    /// The storage key wins over whatever `engine_no` the stored body carries.
    pub fn get_car(&self, engine_no: &str) -> Result<Car, RecordError> {
        validate_engine_no(engine_no)?;
        let bytes = self.fetch(engine_no)?;
        let mut car = Car::from_stored(engine_no, &bytes)?;
        car.engine_no = engine_no.to_string();
        Ok(car)
    }

    /// Merge a partial Car JSON payload into the existing record.
    pub fn update(&self, input: &str) -> Result<(), RecordError> {
        CarUpdate::from_json(input)
            .and_then(|update| self.apply_update(&update))
            .map(|_| ())
            .inspect_err(|e| log_failure("update", e))
    }

    /// Merge `update` into the existing record and return the stored result.
    pub fn apply_update(&self, update: &CarUpdate) -> Result<Car, RecordError> {
        let mut car = self.get_car(&update.engine_no)?;
        if car.deleted {
            return Err(RecordError::DeletedRecord {
                engine_no: update.engine_no.clone(),
            });
        }

        let changed = merge_update(&mut car, update);
        self.write(&update.engine_no, &car)?;
        debug!(
            "event=car_updated engine_no={} changed_fields={}",
            car.engine_no, changed
        );
        self.emit(events::CAR_UPDATED, &car.engine_no);
        Ok(car)
    }

    /// Remove a record entirely. Only `engine_no` of the payload is used.
    pub fn hard_delete(&self, input: &str) -> Result<(), RecordError> {
        Car::from_json(input)
            .and_then(|car| self.hard_delete_key(&car.engine_no))
            .inspect_err(|e| log_failure("hard_delete", e))
    }

    pub fn hard_delete_key(&self, engine_no: &str) -> Result<(), RecordError> {
        validate_engine_no(engine_no)?;
        self.fetch(engine_no)?;

        self.store
            .delete(engine_no)
            .map_err(|e| RecordError::store_access(engine_no, e))?;
        info!("event=car_hard_deleted engine_no={}", engine_no);
        self.emit(events::CAR_HARD_DELETED, engine_no);
        Ok(())
    }

    /// Mark a record deleted. Only `engine_no` of the payload is used.
    pub fn soft_delete(&self, input: &str) -> Result<(), RecordError> {
        Car::from_json(input)
            .and_then(|car| self.soft_delete_key(&car.engine_no))
            .inspect_err(|e| log_failure("soft_delete", e))
    }

    pub fn soft_delete_key(&self, engine_no: &str) -> Result<(), RecordError> {
        let mut car = self.get_car(engine_no)?;
        if car.deleted {
            return Err(RecordError::AlreadyDeleted {
                engine_no: engine_no.to_string(),
            });
        }

        car.soft_delete();
        self.write(engine_no, &car)?;
        info!("event=car_soft_deleted engine_no={}", engine_no);
        self.emit(events::CAR_SOFT_DELETED, engine_no);
        Ok(())
    }

    /// Present-and-non-empty bytes for `engine_no`, or `None`.
    fn lookup(&self, engine_no: &str) -> Result<Option<Vec<u8>>, RecordError> {
        let bytes = self
            .store
            .get(engine_no)
            .map_err(|e| RecordError::store_access(engine_no, e))?;
        Ok(bytes.filter(|b| !b.is_empty()))
    }

    fn fetch(&self, engine_no: &str) -> Result<Vec<u8>, RecordError> {
        self.lookup(engine_no)?.ok_or_else(|| RecordError::NotFound {
            engine_no: engine_no.to_string(),
        })
    }

    fn write(&self, engine_no: &str, car: &Car) -> Result<(), RecordError> {
        let bytes = car.to_bytes()?;
        debug!(
            "event=state_put engine_no={} bytes={}",
            engine_no,
            bytes.len()
        );
        self.store
            .put(engine_no, bytes)
            .map_err(|e| RecordError::store_access(engine_no, e))
    }

    #[cfg(feature = "emitter")]
    fn emit(&self, event: &str, engine_no: &str) {
        self.events.emit(event, engine_no);
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&self, _event: &str, _engine_no: &str) {}
}

fn log_failure(operation: &str, err: &RecordError) {
    warn!(
        "event=operation_failed operation={} kind={} engine_no={}",
        operation,
        err.kind(),
        err.engine_no().unwrap_or("-")
    );
}
