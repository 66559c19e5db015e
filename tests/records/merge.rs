//! Update merge through the public record API.

use car_ledger::{Car, CarUpdate, InMemoryStore, RecordError, RecordStore};

use crate::support::{sample_car, seeded_records};

#[test]
fn update_changes_only_provided_field() {
    let records = RecordStore::new(InMemoryStore::new());
    records
        .create(r#"{"chassis_no":"A","name":"B","engine_no":"E1","year":"2020","deleted":false}"#)
        .unwrap();

    records.update(r#"{"engine_no":"E1","name":"C"}"#).unwrap();

    let car = records.get_car("E1").unwrap();
    assert_eq!(
        car,
        Car::new("E1")
            .with_chassis_no("A")
            .with_name("C")
            .with_year("2020")
    );
}

#[test]
fn update_with_only_key_is_noop() {
    let records = seeded_records();
    records
        .update(r#"{"chassis_no":"","name":"","type":"","engine_no":"E1","year":""}"#)
        .unwrap();

    assert_eq!(records.get_car("E1").unwrap(), sample_car());
}

#[test]
fn update_cannot_soft_delete() {
    let records = seeded_records();
    records
        .update(r#"{"engine_no":"E1","deleted":true}"#)
        .unwrap();

    assert!(!records.get_car("E1").unwrap().deleted);
}

#[test]
fn update_all_fields() {
    let records = seeded_records();
    records
        .update(r#"{"engine_no":"E1","chassis_no":"Z","name":"Y","type":"truck","year":"1999"}"#)
        .unwrap();

    assert_eq!(
        records.get_car("E1").unwrap(),
        Car::new("E1")
            .with_chassis_no("Z")
            .with_name("Y")
            .with_kind("truck")
            .with_year("1999")
    );
}

#[test]
fn apply_update_returns_merged_record() {
    let records = seeded_records();
    let mut update = CarUpdate::new("E1");
    update.year = Some("2024".into());

    let merged = records.apply_update(&update).unwrap();
    assert_eq!(merged.year, "2024");
    assert_eq!(merged, records.get_car("E1").unwrap());
}

#[test]
fn update_with_wrong_field_type_is_decode_error() {
    let records = seeded_records();
    let err = records
        .update(r#"{"engine_no":"E1","name":42}"#)
        .unwrap_err();

    assert!(matches!(err, RecordError::Decode { .. }));
    assert_eq!(records.get_car("E1").unwrap(), sample_car());
}
