//! Removal of empty fields from a finished record.

use congreso_shared::{CongresoError, DetailRecord, Result};
use serde_json::{Map, Value};

/// Whether a field carries nothing: `null` or an empty array.
fn is_empty_field(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Drop every top-level key whose value is `null` or `[]`.
///
/// `0`, `false`, empty strings and objects are kept. Nested values are not
/// touched. Pruning twice is the same as pruning once.
pub fn prune(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| !is_empty_field(value))
        .collect()
}

/// Serialize a detail record and prune it.
pub fn prune_record(record: &DetailRecord) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(prune(fields)),
        other => Err(CongresoError::validation(format!(
            "detail record serialized to a non-object: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congreso_shared::{AuthorRef, TramitationEvent};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn drops_null_and_empty_arrays_only() {
        let pruned = prune(object(json!({
            "a": null,
            "b": [],
            "c": 0,
            "d": false,
            "e": [null],
            "f": {},
            "g": "",
        })));
        assert_eq!(
            Value::Object(pruned),
            json!({"c": 0, "d": false, "e": [null], "f": {}, "g": ""})
        );
    }

    #[test]
    fn pruning_is_idempotent() {
        let samples = [
            json!({}),
            json!({"a": null}),
            json!({"a": [], "b": [1], "c": {"d": null}}),
            json!({"term": 0, "status": null, "author": [{"type": "other", "name": "Gobierno"}]}),
        ];
        for sample in samples {
            let once = prune(object(sample));
            let twice = prune(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn record_keeps_only_filled_fields() {
        let record = DetailRecord {
            term: Some(0),
            author: vec![AuthorRef::Other {
                name: "Gobierno".into(),
            }],
            initiative_tramitation: vec![TramitationEvent {
                name: "Pleno".into(),
                start_date: None,
                end_date: None,
            }],
            ..Default::default()
        };
        let pruned = prune_record(&record).unwrap();

        let keys: Vec<&str> = pruned.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"term"));
        assert!(keys.contains(&"author"));
        assert!(keys.contains(&"initiativeTramitation"));
        // Nested nulls survive.
        assert_eq!(pruned["initiativeTramitation"][0]["startDate"], Value::Null);
    }

    #[test]
    fn empty_record_prunes_to_nothing() {
        assert!(prune_record(&DetailRecord::default()).unwrap().is_empty());
    }
}
