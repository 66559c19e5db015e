use car_ledger::dispatch;
use car_ledger::{Car, Dispatcher, Invocation, Operation, RecordError, RecordStore, Response};
use car_ledger::{InMemoryStore, KeyValueStore};

fn arg(payload: &str) -> Vec<String> {
    vec![payload.to_string()]
}

fn read(dispatcher: &Dispatcher<InMemoryStore>, engine_no: &str) -> Response {
    dispatcher.invoke(
        "readRecord",
        &arg(&format!(r#"{{"engine_no":"{}"}}"#, engine_no)),
    )
}

#[test]
fn full_lifecycle() {
    let dispatcher = dispatch::in_memory();

    let response = dispatcher.invoke(
        "initCar",
        &arg(r#"{"chassis_no":"A","name":"B","type":"sedan","engine_no":"E1","year":"2020"}"#),
    );
    assert!(response.is_ok());

    let response = dispatcher.invoke("updateCar", &arg(r#"{"engine_no":"E1","name":"C"}"#));
    assert!(response.is_ok());

    let car: Car = serde_json::from_slice(&read(&dispatcher, "E1").payload).unwrap();
    assert_eq!(car.name, "C");
    assert_eq!(car.chassis_no, "A");

    let response = dispatcher.invoke("softDeleteCar", &arg(r#"{"engine_no":"E1"}"#));
    assert!(response.is_ok());

    let response = dispatcher.invoke("updateCar", &arg(r#"{"engine_no":"E1","name":"D"}"#));
    assert_eq!(response.status, 409);
    assert_eq!(response.error_envelope().unwrap().kind, "DeletedRecordError");

    let response = dispatcher.invoke("softDeleteCar", &arg(r#"{"engine_no":"E1"}"#));
    assert_eq!(response.error_envelope().unwrap().kind, "AlreadyDeletedError");

    assert!(read(&dispatcher, "E1").is_ok());

    let response = dispatcher.invoke("hardDeleteCar", &arg(r#"{"engine_no":"E1"}"#));
    assert!(response.is_ok());

    let response = read(&dispatcher, "E1");
    assert_eq!(response.status, 404);
    assert_eq!(response.error_envelope().unwrap().kind, "NotFoundError");
}

#[test]
fn read_payload_is_the_stored_bytes() {
    let dispatcher = dispatch::in_memory();
    dispatcher.invoke("initCar", &arg(r#"{"engine_no":"E1","name":"B"}"#));

    let stored = dispatcher.records().store().get("E1").unwrap().unwrap();
    assert_eq!(read(&dispatcher, "E1").payload, stored);
}

#[test]
fn unknown_function_mutates_nothing() {
    let dispatcher = dispatch::in_memory();
    dispatcher.invoke("initCar", &arg(r#"{"engine_no":"E1","name":"B"}"#));
    let before = dispatcher.records().store().get("E1").unwrap();

    let response = dispatcher.invoke("deleteEverything", &arg(r#"{"engine_no":"E1"}"#));
    let envelope = response.error_envelope().unwrap();
    assert_eq!(envelope.kind, "UnknownOperationError");
    assert!(envelope.engine_no.is_none());
    assert!(response.payload.is_empty());

    assert_eq!(dispatcher.records().store().keys(), vec!["E1".to_string()]);
    assert_eq!(dispatcher.records().store().get("E1").unwrap(), before);
}

#[test]
fn dispatch_operation_skips_name_lookup() {
    let dispatcher = Dispatcher::new(RecordStore::new(InMemoryStore::new()));
    dispatcher
        .dispatch_operation(Operation::InitCar, &arg(r#"{"engine_no":"E5"}"#))
        .unwrap();

    let bytes = dispatcher
        .dispatch_operation(Operation::ReadRecord, &arg(r#"{"engine_no":"E5"}"#))
        .unwrap();
    let car: Car = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(car, Car::new("E5"));
}

#[test]
fn decode_errors_use_flat_detail() {
    let dispatcher = dispatch::in_memory();

    let response = dispatcher.invoke("initCar", &arg("not json"));
    assert_eq!(response.status, 400);
    let envelope = response.error_envelope().unwrap();
    assert_eq!(envelope.kind, "DecodeError");
    assert!(envelope.engine_no.is_none());
    assert!(!envelope.detail.is_empty());
}

#[test]
fn missing_argument_is_rejected_before_store_access() {
    let dispatcher = dispatch::in_memory();

    let err = dispatcher.dispatch("initCar", &[]).unwrap_err();
    assert!(matches!(err, RecordError::Decode { .. }));
    assert!(dispatcher.records().store().is_empty());
}

#[test]
fn invocation_serde_round_trip() {
    let request = Invocation::new("softDeleteCar", arg(r#"{"engine_no":"E1"}"#));
    let json = serde_json::to_string(&request).unwrap();
    let parsed: Invocation = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);

    let dispatcher = dispatch::in_memory();
    let response = dispatcher.invoke_request(&parsed);
    assert_eq!(response.error_envelope().unwrap().kind, "NotFoundError");
}
