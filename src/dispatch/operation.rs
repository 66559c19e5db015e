//! Closed set of invocable operations.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// An operation the dispatcher can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InitCar,
    ReadRecord,
    UpdateCar,
    HardDeleteCar,
    SoftDeleteCar,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::InitCar,
        Operation::ReadRecord,
        Operation::UpdateCar,
        Operation::HardDeleteCar,
        Operation::SoftDeleteCar,
    ];

    /// Function name as it arrives in an invocation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::InitCar => "initCar",
            Operation::ReadRecord => "readRecord",
            Operation::UpdateCar => "updateCar",
            Operation::HardDeleteCar => "hardDeleteCar",
            Operation::SoftDeleteCar => "softDeleteCar",
        }
    }

    /// Exact, case-sensitive lookup by function name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "initCar" => Some(Operation::InitCar),
            "readRecord" => Some(Operation::ReadRecord),
            "updateCar" => Some(Operation::UpdateCar),
            "hardDeleteCar" => Some(Operation::HardDeleteCar),
            "softDeleteCar" => Some(Operation::SoftDeleteCar),
            _ => None,
        }
    }

    /// Whether a successful run writes to the store.
    pub fn mutates(self) -> bool {
        !matches!(self, Operation::ReadRecord)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_name(s).ok_or_else(|| RecordError::UnknownOperation(s.to_string()))
    }
}
