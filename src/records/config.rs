//! RecordStore configuration.

/// How create treats a key that already holds a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateMode {
    /// Overwrite silently, including soft-deleted records.
    #[default]
    Upsert,
    /// Fail with `AlreadyExists` when the key is present.
    RejectExisting,
}

/// Options applied with [`RecordStore::with_config`](super::RecordStore::with_config).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStoreConfig {
    pub create_mode: CreateMode,
}

impl RecordStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_mode(mut self, mode: CreateMode) -> Self {
        self.create_mode = mode;
        self
    }
}
