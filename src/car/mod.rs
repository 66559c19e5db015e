//! Car record model.
//!
//! # Invariants
//! - `engine_no` is the storage key; it is never rewritten by a merge.
//! - `deleted` is a one-way tombstone: once `true`, updates are rejected.
//! - Every input field defaults to its empty value when absent or `null`, so
//!   partial payloads decode the same way full ones do.

mod merge;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecordError;

pub use merge::merge_update;

/// The persisted record.
///
/// Field order is the serialized order: `chassis_no, name, type, engine_no,
/// year, deleted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    #[serde(deserialize_with = "null_as_default")]
    pub chassis_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Serialized as `type` to match the external schema.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub engine_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
}

impl Car {
    /// Creates an active record with only its key set.
    pub fn new(engine_no: impl Into<String>) -> Self {
        Self {
            engine_no: engine_no.into(),
            ..Self::default()
        }
    }

    pub fn with_chassis_no(mut self, chassis_no: impl Into<String>) -> Self {
        self.chassis_no = chassis_no.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Returns whether the record still accepts updates.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Marks the record as soft-deleted.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    /// Decodes a record from a JSON payload.
    pub fn from_json(input: &str) -> Result<Self, RecordError> {
        let car: Car = serde_json::from_str(input)?;
        validate_engine_no(&car.engine_no)?;
        Ok(car)
    }

    /// Decodes a record previously written to the store.
    pub(crate) fn from_stored(engine_no: &str, bytes: &[u8]) -> Result<Self, RecordError> {
        serde_json::from_slice(bytes).map_err(|e| RecordError::Decode {
            engine_no: Some(engine_no.to_string()),
            detail: format!("stored record is not a valid car: {}", e),
        })
    }

    /// Serializes the record for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(self).map_err(|e| RecordError::Decode {
            engine_no: Some(self.engine_no.clone()),
            detail: format!("failed to encode record: {}", e),
        })
    }
}

/// Lookup payload for reads: only the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupKey {
    #[serde(deserialize_with = "null_as_default")]
    pub engine_no: String,
}

impl LookupKey {
    pub fn new(engine_no: impl Into<String>) -> Self {
        Self {
            engine_no: engine_no.into(),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, RecordError> {
        let key: LookupKey = serde_json::from_str(input)?;
        validate_engine_no(&key.engine_no)?;
        Ok(key)
    }
}

/// Decoded update payload.
///
/// A field counts as provided only when it is present, non-null and
/// non-empty. `deleted` is accepted on input and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub engine_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing)]
    pub deleted: Option<bool>,
}

impl CarUpdate {
    pub fn new(engine_no: impl Into<String>) -> Self {
        Self {
            engine_no: engine_no.into(),
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self, RecordError> {
        let update: CarUpdate = serde_json::from_str(input)?;
        validate_engine_no(&update.engine_no)?;
        Ok(update)
    }

    /// True when no mergeable field carries a value.
    pub fn is_empty(&self) -> bool {
        [&self.chassis_no, &self.name, &self.kind, &self.year]
            .iter()
            .all(|field| field.as_deref().map_or(true, str::is_empty))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn validate_engine_no(engine_no: &str) -> Result<(), RecordError> {
    if engine_no.is_empty() {
        return Err(RecordError::Decode {
            engine_no: None,
            detail: "engine_no must not be empty".into(),
        });
    }
    Ok(())
}
