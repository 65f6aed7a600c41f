// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Tolerant extraction of `status.conditions` from a resource document

use crate::error::{Result, WaitError};
use crate::types::condition::{Condition, StatusSnapshot};
use serde::Deserialize;
use serde_json::Value;

/// Extract the conditions of a resource document.
///
/// Returns `Ok(None)` while `status` or `status.conditions` is absent, which
/// callers treat as "not yet populated". A `status` that is not an object or a
/// `conditions` field that is not a list is an error. Entries that do not
/// deserialize as a [`Condition`] (not an object, no string `type`) are skipped.
pub fn extract_conditions(doc: &Value) -> Result<Option<StatusSnapshot>> {
    let status = match doc.get("status") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(status)) => status,
        Some(other) => {
            return Err(WaitError::MalformedStatus(format!(
                "status is {}, expected an object",
                kind_of(other)
            )))
        }
    };

    let entries = match status.get("conditions") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(WaitError::MalformedStatus(format!(
                "status.conditions is {}, expected a list",
                kind_of(other)
            )))
        }
    };

    Ok(Some(StatusSnapshot::new(
        entries.iter().filter_map(parse_condition),
    )))
}

fn parse_condition(entry: &Value) -> Option<Condition> {
    Condition::deserialize(entry).ok()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::condition::ConditionStatus;
    use serde_json::json;

    #[test]
    fn test_extract_conditions() {
        let doc = json!({
            "metadata": {"name": "cluster"},
            "status": {
                "conditions": [
                    {"type": "Ready", "status": "True", "reason": "Reconciled", "message": "all good"},
                    {"type": "Degraded", "status": "False"}
                ]
            }
        });

        let snapshot = extract_conditions(&doc).unwrap().unwrap();
        let ready = snapshot.get("Ready").unwrap();
        assert_eq!(ready.status, ConditionStatus::True);
        assert_eq!(ready.reason, "Reconciled");
        assert_eq!(ready.message, "all good");

        let degraded = snapshot.get("Degraded").unwrap();
        assert_eq!(degraded.status, ConditionStatus::False);
        assert_eq!(degraded.reason, "");
    }

    #[test]
    fn test_extract_without_status() {
        let doc = json!({"metadata": {"name": "cluster"}});
        assert!(extract_conditions(&doc).unwrap().is_none());
    }

    #[test]
    fn test_extract_without_conditions() {
        let doc = json!({"status": {"observedGeneration": 3}});
        assert!(extract_conditions(&doc).unwrap().is_none());

        let doc = json!({"status": {"conditions": null}});
        assert!(extract_conditions(&doc).unwrap().is_none());
    }

    #[test]
    fn test_extract_skips_malformed_entries() {
        let doc = json!({
            "status": {
                "conditions": [
                    "Ready",
                    {"status": "True"},
                    {"type": 42, "status": "True"},
                    {"type": "Degraded", "status": "True", "message": 7},
                    {"type": "Ready", "status": "yes"}
                ]
            }
        });

        let snapshot = extract_conditions(&doc).unwrap().unwrap();
        assert_eq!(snapshot.conditions().len(), 1);
        assert_eq!(
            snapshot.get("Ready").unwrap().status,
            ConditionStatus::Unknown
        );
    }

    #[test]
    fn test_extract_duplicate_type_last_wins() {
        let doc = json!({
            "status": {
                "conditions": [
                    {"type": "Degraded", "status": "True", "message": "stale"},
                    {"type": "Degraded", "status": "False", "message": "recovered"}
                ]
            }
        });

        let snapshot = extract_conditions(&doc).unwrap().unwrap();
        let degraded = snapshot.get("Degraded").unwrap();
        assert_eq!(degraded.status, ConditionStatus::False);
        assert_eq!(degraded.message, "recovered");
    }

    #[test]
    fn test_extract_rejects_conditions_that_are_not_a_list() {
        let doc = json!({"status": {"conditions": {"type": "Ready"}}});
        let err = extract_conditions(&doc).unwrap_err();
        assert!(matches!(err, WaitError::MalformedStatus(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_extract_rejects_status_that_is_not_an_object() {
        let doc = json!({"status": "Ready"});
        assert!(matches!(
            extract_conditions(&doc),
            Err(WaitError::MalformedStatus(_))
        ));
    }
}
