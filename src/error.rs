//! Error taxonomy for record operations.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error type for every record operation and for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Input or stored bytes could not be decoded, or the key is empty.
    Decode {
        engine_no: Option<String>,
        detail: String,
    },
    /// The underlying key-value store call failed.
    StoreAccess {
        engine_no: String,
        source: StoreError,
    },
    /// No record exists under the key.
    NotFound { engine_no: String },
    /// Update attempted on a soft-deleted record.
    DeletedRecord { engine_no: String },
    /// Soft delete attempted on a record that is already soft-deleted.
    AlreadyDeleted { engine_no: String },
    /// Strict create attempted on a key that is already present.
    AlreadyExists { engine_no: String },
    /// No operation registered under this function name.
    UnknownOperation(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Decode {
                engine_no: Some(engine_no),
                detail,
            } => write!(f, "failed to decode record {}: {}", engine_no, detail),
            RecordError::Decode {
                engine_no: None,
                detail,
            } => write!(f, "failed to decode input: {}", detail),
            RecordError::StoreAccess { engine_no, source } => {
                write!(f, "failed to access state for {}: {}", engine_no, source)
            }
            RecordError::NotFound { engine_no } => {
                write!(f, "record does not exist: {}", engine_no)
            }
            RecordError::DeletedRecord { engine_no } => write!(
                f,
                "record for {} has been marked as deleted; cannot update",
                engine_no
            ),
            RecordError::AlreadyDeleted { engine_no } => {
                write!(f, "record for {} is already marked as deleted", engine_no)
            }
            RecordError::AlreadyExists { engine_no } => {
                write!(f, "record already exists: {}", engine_no)
            }
            RecordError::UnknownOperation(name) => {
                write!(f, "received unknown function invocation: {}", name)
            }
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecordError::StoreAccess { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Decode {
            engine_no: None,
            detail: err.to_string(),
        }
    }
}

impl RecordError {
    /// Builds a store access error for `engine_no`.
    pub fn store_access(engine_no: &str, source: StoreError) -> Self {
        RecordError::StoreAccess {
            engine_no: engine_no.to_string(),
            source,
        }
    }

    /// Stable taxonomy name used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Decode { .. } => "DecodeError",
            RecordError::StoreAccess { .. } => "StoreAccessError",
            RecordError::NotFound { .. } => "NotFoundError",
            RecordError::DeletedRecord { .. } => "DeletedRecordError",
            RecordError::AlreadyDeleted { .. } => "AlreadyDeletedError",
            RecordError::AlreadyExists { .. } => "AlreadyExistsError",
            RecordError::UnknownOperation(_) => "UnknownOperationError",
        }
    }

    /// The engine number the error refers to, when known.
    pub fn engine_no(&self) -> Option<&str> {
        match self {
            RecordError::Decode { engine_no, .. } => engine_no.as_deref(),
            RecordError::StoreAccess { engine_no, .. }
            | RecordError::NotFound { engine_no }
            | RecordError::DeletedRecord { engine_no }
            | RecordError::AlreadyDeleted { engine_no }
            | RecordError::AlreadyExists { engine_no } => Some(engine_no),
            RecordError::UnknownOperation(_) => None,
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            RecordError::Decode { .. } => 400,
            RecordError::StoreAccess { .. } => 500,
            RecordError::NotFound { .. } => 404,
            RecordError::DeletedRecord { .. } => 409,
            RecordError::AlreadyDeleted { .. } => 409,
            RecordError::AlreadyExists { .. } => 409,
            RecordError::UnknownOperation(_) => 404,
        }
    }

    /// Structured form returned to callers.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            kind: self.kind().to_string(),
            engine_no: self.engine_no().map(str::to_string),
            detail: self.to_string(),
        }
    }
}

/// Structured error message: `{kind, engine_no, detail}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub kind: String,
    pub engine_no: Option<String>,
    pub detail: String,
}

impl ErrorEnvelope {
    /// JSON text of the envelope.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"kind":"{}","engine_no":null,"detail":""}}"#, self.kind)
        })
    }
}
