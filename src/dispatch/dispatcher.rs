//! Dispatcher - routes a function name and string arguments to a record operation.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorEnvelope, RecordError};
use crate::records::RecordStore;
use crate::store::KeyValueStore;

use super::operation::Operation;

/// A function invocation as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }
}

/// Result of an invocation.
///
/// `status` is 200 on success with the operation's `payload`. On failure
/// `payload` is empty and `message` holds the JSON error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub const OK: u16 = 200;

    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(err: &RecordError) -> Self {
        Self {
            status: err.status_code(),
            message: err.envelope().to_json(),
            payload: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }

    /// Parses the error envelope out of `message`. `None` on success.
    pub fn error_envelope(&self) -> Option<ErrorEnvelope> {
        if self.is_ok() {
            return None;
        }
        serde_json::from_str(&self.message).ok()
    }
}

/// Routes invocations to a [`RecordStore`].
pub struct Dispatcher<S> {
    records: RecordStore<S>,
}

impl<S: KeyValueStore> Dispatcher<S> {
    pub fn new(records: RecordStore<S>) -> Self {
        Self { records }
    }

    /// Get a reference to the record store.
    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// Instantiate hook. Succeeds without touching state.
    pub fn init(&self, _args: &[String]) -> Response {
        debug!("event=init status=ok");
        Response::success(Vec::new())
    }

    /// Dispatch by function name.
    ///
    /// The name is resolved before any argument is looked at, so an unknown
    /// name never reaches the store.
    pub fn dispatch(&self, function: &str, args: &[String]) -> Result<Vec<u8>, RecordError> {
        debug!("event=invoke function={}", function);
        let operation = Operation::from_name(function).ok_or_else(|| {
            warn!("event=unknown_function function={}", function);
            RecordError::UnknownOperation(function.to_string())
        })?;
        self.dispatch_operation(operation, args)
    }

    /// Run an already resolved operation against the first argument.
    pub fn dispatch_operation(
        &self,
        operation: Operation,
        args: &[String],
    ) -> Result<Vec<u8>, RecordError> {
        let input = payload_arg(operation, args)?;
        debug!(
            "event=route function={} mutates={}",
            operation,
            operation.mutates()
        );

        match operation {
            Operation::InitCar => self.records.create(input).map(|()| Vec::new()),
            Operation::ReadRecord => self.records.read(input),
            Operation::UpdateCar => self.records.update(input).map(|()| Vec::new()),
            Operation::HardDeleteCar => self.records.hard_delete(input).map(|()| Vec::new()),
            Operation::SoftDeleteCar => self.records.soft_delete(input).map(|()| Vec::new()),
        }
    }

    /// Dispatch and fold the result into a `Response`.
    pub fn invoke(&self, function: &str, args: &[String]) -> Response {
        match self.dispatch(function, args) {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(&e),
        }
    }

    /// Dispatch an `Invocation`, returning a `Response`.
    pub fn invoke_request(&self, request: &Invocation) -> Response {
        self.invoke(&request.function, &request.args)
    }

    /// List the function names this dispatcher accepts.
    pub fn operations(&self) -> Vec<&'static str> {
        Operation::ALL.iter().map(|op| op.name()).collect()
    }
}

fn payload_arg(operation: Operation, args: &[String]) -> Result<&str, RecordError> {
    let input = args.first().ok_or_else(|| RecordError::Decode {
        engine_no: None,
        detail: format!(
            "incorrect number of arguments for {}: expecting 1, got 0",
            operation
        ),
    })?;

    if args.len() > 1 {
        warn!(
            "event=extra_arguments function={} ignored={}",
            operation,
            args.len() - 1
        );
    }

    Ok(input.as_str())
}
