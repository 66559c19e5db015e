//! Selective field merge for updates.

use super::{Car, CarUpdate};

/// Applies every provided field of `update` onto `existing`.
///
/// A field is provided when it is `Some` and non-empty; anything else leaves
/// the existing value untouched. `engine_no` and `deleted` are never merged.
/// Returns the number of fields whose value actually changed.
pub fn merge_update(existing: &mut Car, update: &CarUpdate) -> usize {
    let mut changed = 0;
    changed += merge_field(&mut existing.chassis_no, &update.chassis_no);
    changed += merge_field(&mut existing.name, &update.name);
    changed += merge_field(&mut existing.kind, &update.kind);
    changed += merge_field(&mut existing.year, &update.year);
    changed
}

fn merge_field(target: &mut String, incoming: &Option<String>) -> usize {
    match incoming.as_deref() {
        Some(value) if !value.is_empty() && value != target.as_str() => {
            *target = value.to_string();
            1
        }
        _ => 0,
    }
}
