//! Conversion between [`Delta`] and the jsondiffpatch wire format.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::{ArrayDelta, Delta};
use crate::error::PatchError;

pub const OP_DELETED: u64 = 0;
pub const OP_TEXT_DIFF: u64 = 2;
pub const OP_ARRAY_MOVE: u64 = 3;

/// Reserved member marking an object-shaped delta as an array delta.
const ARRAY_MARKER_KEY: &str = "_t";
const ARRAY_MARKER_VALUE: &str = "a";

impl Delta {
    /// Encode into the wire shape.
    pub fn to_value(&self) -> Value {
        match self {
            Delta::Added(new) => json!([new]),
            Delta::Replaced { old, new } => json!([old, new]),
            Delta::Deleted(old) => json!([old, 0, 0]),
            Delta::Text(patch_text) => json!([patch_text, 0, OP_TEXT_DIFF]),
            Delta::Moved { value, to } => {
                let slot = value.clone().unwrap_or_else(|| Value::String(String::new()));
                json!([slot, to, OP_ARRAY_MOVE])
            }
            Delta::Object(entries) => {
                let mut map = Map::new();
                for (key, child) in entries {
                    map.insert(key.clone(), child.to_value());
                }
                Value::Object(map)
            }
            Delta::Array(array_delta) => {
                let mut map = Map::new();
                map.insert(
                    ARRAY_MARKER_KEY.to_string(),
                    Value::String(ARRAY_MARKER_VALUE.to_string()),
                );
                for (index, child) in &array_delta.removed {
                    map.insert(format!("_{index}"), child.to_value());
                }
                for (index, child) in &array_delta.updated {
                    map.insert(index.to_string(), child.to_value());
                }
                Value::Object(map)
            }
        }
    }

    /// Decode from the wire shape. `Ok(None)` means "no change" (JSON
    /// `null`, or an object delta with no effective members).
    pub fn from_value(value: &Value) -> Result<Option<Delta>, PatchError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => from_wire_array(items).map(Some),
            Value::Object(map) => from_wire_object(map),
            other => Err(PatchError::InvalidDelta(format!(
                "a delta is null, an array, or an object, got: {other}"
            ))),
        }
    }
}

fn from_wire_array(items: &[Value]) -> Result<Delta, PatchError> {
    match items {
        [new] => Ok(Delta::Added(new.clone())),
        [old, new] => Ok(Delta::Replaced {
            old: old.clone(),
            new: new.clone(),
        }),
        [first, second, op] => {
            let op = op
                .as_u64()
                .ok_or_else(|| PatchError::InvalidDelta(format!("non-integer op code: {op}")))?;
            match op {
                OP_DELETED => Ok(Delta::Deleted(first.clone())),
                OP_TEXT_DIFF => {
                    let patch_text = first.as_str().ok_or_else(|| {
                        PatchError::InvalidDelta("text delta slot 0 must be a string".to_string())
                    })?;
                    Ok(Delta::Text(patch_text.to_string()))
                }
                OP_ARRAY_MOVE => {
                    let to = second.as_u64().ok_or_else(|| {
                        PatchError::InvalidDelta(format!("bad move target index: {second}"))
                    })? as usize;
                    let value = match first {
                        Value::String(s) if s.is_empty() => None,
                        carried => Some(carried.clone()),
                    };
                    Ok(Delta::Moved { value, to })
                }
                unknown => Err(PatchError::InvalidDelta(format!(
                    "unknown op code: {unknown}"
                ))),
            }
        }
        _ => Err(PatchError::InvalidDelta(format!(
            "delta array of length {}",
            items.len()
        ))),
    }
}

fn from_wire_object(map: &Map<String, Value>) -> Result<Option<Delta>, PatchError> {
    // `_t: "a"` switches to the array reading. Any other `_t` member is an
    // ordinary object-delta member (its value is a delta, never the bare
    // string "a", so the shapes stay disjoint).
    if map.get(ARRAY_MARKER_KEY).and_then(Value::as_str) == Some(ARRAY_MARKER_VALUE) {
        return from_wire_array_delta(map).map(|delta| Some(Delta::Array(delta)));
    }

    let mut entries = BTreeMap::new();
    for (key, member) in map {
        // A null member is the same as no member at all.
        if let Some(child) = Delta::from_value(member)? {
            entries.insert(key.clone(), child);
        }
    }
    if entries.is_empty() {
        // Empty object delta ≡ null delta.
        return Ok(None);
    }
    Ok(Some(Delta::Object(entries)))
}

fn from_wire_array_delta(map: &Map<String, Value>) -> Result<ArrayDelta, PatchError> {
    let mut delta = ArrayDelta::default();
    for (key, member) in map {
        if key == ARRAY_MARKER_KEY {
            continue;
        }
        if let Some(old_key) = key.strip_prefix('_') {
            let index = parse_index(old_key).ok_or_else(|| bad_key(key))?;
            match Delta::from_value(member)? {
                None => {}
                Some(child @ (Delta::Deleted(_) | Delta::Moved { .. })) => {
                    delta.removed.insert(index, child);
                }
                Some(_) => {
                    return Err(PatchError::InvalidDelta(format!(
                        "member {key:?} must hold a deletion or a move"
                    )))
                }
            }
        } else {
            let index = parse_index(key).ok_or_else(|| bad_key(key))?;
            match Delta::from_value(member)? {
                None => {}
                Some(Delta::Deleted(_)) => {
                    return Err(PatchError::InvalidDelta(format!(
                        "deletion under new-index member {key:?}"
                    )))
                }
                Some(child) => {
                    delta.updated.insert(index, child);
                }
            }
        }
    }
    Ok(delta)
}

fn bad_key(key: &str) -> PatchError {
    PatchError::InvalidDelta(format!("bad array delta member key: {key:?}"))
}

/// Strict decimal index parse: digits only, no sign, no leading zero.
fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

// ── Serde via the wire shape ──────────────────────────────────────────────

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match Delta::from_value(&value) {
            Ok(Some(delta)) => Ok(delta),
            Ok(None) => Err(D::Error::custom("null delta has no in-memory form")),
            Err(err) => Err(D::Error::custom(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(delta: Delta) {
        let wire = delta.to_value();
        assert_eq!(Delta::from_value(&wire).unwrap(), Some(delta));
    }

    #[test]
    fn scalar_shapes_round_trip() {
        round_trip(Delta::Added(json!({"a": 1})));
        round_trip(Delta::Replaced {
            old: json!(1),
            new: json!([2, 3]),
        });
        round_trip(Delta::Deleted(json!("gone")));
        round_trip(Delta::Text("@@ -1,3 +1,3 @@\n x\n-y\n+z\n".to_string()));
        round_trip(Delta::Moved {
            value: None,
            to: 4,
        });
        round_trip(Delta::Moved {
            value: Some(json!({"id": 9})),
            to: 0,
        });
    }

    #[test]
    fn nested_shapes_round_trip() {
        let mut entries = BTreeMap::new();
        entries.insert("y".to_string(), Delta::Replaced { old: json!(2), new: json!(3) });
        round_trip(Delta::Object(entries));

        let mut array_delta = ArrayDelta::default();
        array_delta.removed.insert(2, Delta::Deleted(json!(3)));
        array_delta.updated.insert(0, Delta::Added(json!(0)));
        round_trip(Delta::Array(array_delta));
    }

    #[test]
    fn wire_shapes_are_exact() {
        assert_eq!(Delta::Added(json!(2)).to_value(), json!([2]));
        assert_eq!(Delta::Deleted(json!(2)).to_value(), json!([2, 0, 0]));
        assert_eq!(
            Delta::Moved { value: None, to: 3 }.to_value(),
            json!(["", 3, 3])
        );

        let mut array_delta = ArrayDelta::default();
        array_delta.updated.insert(2, Delta::Added(json!(3)));
        assert_eq!(
            Delta::Array(array_delta).to_value(),
            json!({"_t": "a", "2": [3]})
        );
    }

    #[test]
    fn null_is_no_change() {
        assert_eq!(Delta::from_value(&Value::Null).unwrap(), None);
    }

    #[test]
    fn empty_object_delta_is_no_change() {
        assert_eq!(Delta::from_value(&json!({})).unwrap(), None);
        // Null members are dropped, possibly leaving nothing.
        assert_eq!(Delta::from_value(&json!({"x": null})).unwrap(), None);
    }

    #[test]
    fn scalar_deltas_are_invalid() {
        for wire in [json!(5), json!("x"), json!(true)] {
            assert!(matches!(
                Delta::from_value(&wire),
                Err(PatchError::InvalidDelta(_))
            ));
        }
    }

    #[test]
    fn bad_arities_are_invalid() {
        assert!(Delta::from_value(&json!([])).is_err());
        assert!(Delta::from_value(&json!([1, 2, 0, 0])).is_err());
    }

    #[test]
    fn unknown_op_codes_are_invalid() {
        assert!(Delta::from_value(&json!(["x", 0, 1])).is_err());
        assert!(Delta::from_value(&json!(["x", 0, 4])).is_err());
        assert!(Delta::from_value(&json!(["x", 0, "0"])).is_err());
    }

    #[test]
    fn strict_index_keys() {
        for key in ["05", "-1", "1x", "", "_"] {
            let mut map = Map::new();
            map.insert("_t".to_string(), json!("a"));
            map.insert(key.to_string(), json!([1]));
            let wire = Value::Object(map);
            assert!(
                matches!(Delta::from_value(&wire), Err(PatchError::InvalidDelta(_))),
                "key {key:?} should be rejected"
            );
        }
        assert!(Delta::from_value(&json!({"_t": "a", "0": [1]})).is_ok());
        assert!(Delta::from_value(&json!({"_t": "a", "10": [1]})).is_ok());
    }

    #[test]
    fn underscored_members_must_remove_or_move() {
        let wire = json!({"_t": "a", "_0": [5]});
        assert!(Delta::from_value(&wire).is_err());
        let wire = json!({"_t": "a", "_0": [5, 0, 0]});
        assert!(Delta::from_value(&wire).is_ok());
        let wire = json!({"_t": "a", "_0": ["", 2, 3]});
        assert!(Delta::from_value(&wire).is_ok());
    }

    #[test]
    fn deletion_under_new_index_is_invalid() {
        let wire = json!({"_t": "a", "0": [5, 0, 0]});
        assert!(Delta::from_value(&wire).is_err());
    }

    #[test]
    fn non_marker_underscore_t_member_is_an_object_delta() {
        // Objects whose data happens to contain a "_t" key still diff: the
        // member value is a delta shape, never the bare marker string.
        let wire = json!({"_t": ["x", "y"]});
        let delta = Delta::from_value(&wire).unwrap().unwrap();
        match delta {
            Delta::Object(entries) => {
                assert_eq!(
                    entries.get("_t"),
                    Some(&Delta::Replaced { old: json!("x"), new: json!("y") })
                );
            }
            other => panic!("expected object delta, got {other:?}"),
        }
    }

    #[test]
    fn serde_round_trip() {
        let delta = Delta::Replaced { old: json!(1), new: json!(2) };
        let text = serde_json::to_string(&delta).unwrap();
        assert_eq!(text, "[1,2]");
        let back: Delta = serde_json::from_str(&text).unwrap();
        assert_eq!(back, delta);
    }
}
