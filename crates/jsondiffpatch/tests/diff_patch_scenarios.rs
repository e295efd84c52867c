//! End-to-end scenarios over the wire format: exact delta shapes plus both
//! directions of application.

use std::sync::Arc;

use jsondiffpatch::{diff, patch, unpatch, DiffPatcher, Options};
use serde_json::{json, Value};

/// Diff, then check the delta shape and both round trips.
fn check(left: Value, right: Value, expected_delta: Value) {
    let delta = diff(&left, &right);
    assert_eq!(delta, expected_delta, "delta for {left} -> {right}");
    assert_eq!(patch(&left, &delta).unwrap(), right, "patch of {delta}");
    assert_eq!(unpatch(&right, &delta).unwrap(), left, "unpatch of {delta}");
}

fn round_trip(left: Value, right: Value) {
    let delta = diff(&left, &right);
    assert_eq!(patch(&left, &delta).unwrap(), right, "patch of {delta}");
    assert_eq!(unpatch(&right, &delta).unwrap(), left, "unpatch of {delta}");
}

#[test]
fn object_value_change() {
    check(
        json!({"x": 1, "y": 2}),
        json!({"x": 1, "y": 3}),
        json!({"y": [2, 3]}),
    );
}

#[test]
fn object_addition() {
    check(json!({"x": 1}), json!({"x": 1, "y": 2}), json!({"y": [2]}));
}

#[test]
fn object_deletion() {
    check(
        json!({"x": 1, "y": 2}),
        json!({"x": 1}),
        json!({"y": [2, 0, 0]}),
    );
}

#[test]
fn array_append() {
    check(
        json!([1, 2]),
        json!([1, 2, 3]),
        json!({"_t": "a", "2": [3]}),
    );
}

#[test]
fn array_remove_tail() {
    check(
        json!([1, 2, 3]),
        json!([1, 2]),
        json!({"_t": "a", "_2": [3, 0, 0]}),
    );
}

#[test]
fn array_middle_modification() {
    check(
        json!([1, 2, 3]),
        json!([1, 2, 4]),
        json!({"_t": "a", "_2": [3, 0, 0], "2": [4]}),
    );
}

#[test]
fn long_string_text_diff() {
    let left_str = format!("{} brown fox", "padding ".repeat(8));
    let right_str = format!("{} red fox", "padding ".repeat(8));
    let left = json!(left_str);
    let right = json!(right_str);

    let delta = diff(&left, &right);
    let items = delta.as_array().expect("text delta is a 3-array");
    assert_eq!(items.len(), 3);
    assert!(items[0].as_str().unwrap().starts_with("@@"));
    assert_eq!(items[1], json!(0));
    assert_eq!(items[2], json!(2));

    assert_eq!(patch(&left, &delta).unwrap(), right);
    assert_eq!(unpatch(&right, &delta).unwrap(), left);
}

#[test]
fn reflexivity() {
    for value in [
        json!(null),
        json!([]),
        json!({}),
        json!({"deep": {"a": [1, {"b": 2}]}}),
        json!("s".repeat(200)),
    ] {
        assert_eq!(diff(&value, &value), Value::Null);
    }
}

#[test]
fn null_delta_identity() {
    let value = json!({"k": [1, 2, {"x": null}]});
    assert_eq!(patch(&value, &Value::Null).unwrap(), value);
    assert_eq!(unpatch(&value, &Value::Null).unwrap(), value);
}

#[test]
fn empty_containers() {
    round_trip(json!({}), json!({"a": 1}));
    round_trip(json!({"a": 1}), json!({}));
    round_trip(json!([]), json!([1, 2, 3]));
    round_trip(json!([1, 2, 3]), json!([]));
    round_trip(json!({}), json!([]));
}

#[test]
fn single_element_arrays() {
    check(json!([]), json!([1]), json!({"_t": "a", "0": [1]}));
    check(json!([1]), json!([]), json!({"_t": "a", "_0": [1, 0, 0]}));
    check(
        json!([1]),
        json!([2]),
        json!({"_t": "a", "_0": [1, 0, 0], "0": [2]}),
    );
    round_trip(json!([{"a": 1}]), json!([{"a": 2}]));
}

#[test]
fn pure_insertion_fast_path() {
    // Head and tail trimming consume the whole left side.
    check(
        json!([1, 4]),
        json!([1, 2, 3, 4]),
        json!({"_t": "a", "1": [2], "2": [3]}),
    );
}

#[test]
fn pure_removal_fast_path() {
    check(
        json!([1, 2, 3, 4]),
        json!([1, 4]),
        json!({"_t": "a", "_1": [2, 0, 0], "_2": [3, 0, 0]}),
    );
}

#[test]
fn kind_changes_are_replacements() {
    check(json!({"a": 1}), json!([1, 2]), json!([{"a": 1}, [1, 2]]));
    check(json!(null), json!(0), json!([null, 0]));
    check(json!("x"), json!(1), json!(["x", 1]));
}

#[test]
fn threshold_boundary_does_not_trigger_text_diff() {
    // Both sides exactly 50 chars: replacement, not text diff.
    let left_str = "a".repeat(50);
    let right_str = format!("{}b", "a".repeat(49));
    let delta = diff(&json!(left_str), &json!(right_str));
    assert_eq!(delta, json!([left_str, right_str]));

    // 51 chars on one side: text diff.
    let left_str = "a".repeat(51);
    let delta = diff(&json!(left_str), &json!(right_str));
    assert_eq!(delta.get(2), Some(&json!(2)));
}

#[test]
fn nested_structures_round_trip() {
    round_trip(
        json!({
            "user": {"name": "John", "age": 30, "address": {"street": "123 Main St", "city": "NYC"}},
            "tags": ["a", "b", "c"],
        }),
        json!({
            "user": {"name": "John", "age": 31, "address": {"street": "456 Oak Ave", "city": "NYC"}},
            "tags": ["a", "c", "d"],
        }),
    );
}

#[test]
fn arrays_of_objects_round_trip() {
    round_trip(
        json!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]),
        json!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Robert"}]),
    );
}

#[test]
fn insertion_before_modified_tail_element() {
    // Length change plus a nested tail modification: the nested delta is
    // addressed at the final new index, behind two insertions.
    let differ = DiffPatcher::with_options(Options {
        object_hash: Some(Arc::new(|value: &Value| {
            value.get("id").map(|id| id.to_string()).unwrap_or_default()
        })),
        ..Options::default()
    });
    let left = json!(["x", {"id": 1, "v": 1}]);
    let right = json!(["y1", "y2", {"id": 1, "v": 2}]);

    let delta = differ.diff(&left, &right).expect("values differ");
    assert_eq!(differ.patch(&left, &delta).unwrap(), right);
    assert_eq!(differ.unpatch(&right, &delta).unwrap(), left);
}

#[test]
fn move_detection_round_trips() {
    let differ = DiffPatcher::with_options(Options {
        detect_move: true,
        object_hash: Some(Arc::new(|value: &Value| {
            value.get("id").map(|id| id.to_string()).unwrap_or_default()
        })),
        ..Options::default()
    });
    let left = json!([{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]);
    let right = json!([{"id": 3}, {"id": 1}, {"id": 4}, {"id": 2}]);

    let delta = differ.diff(&left, &right).expect("values differ");
    let wire = delta.to_value();
    let has_move = wire
        .as_object()
        .unwrap()
        .values()
        .any(|member| member.get(2) == Some(&json!(3)));
    assert!(has_move, "expected at least one move in {wire}");

    assert_eq!(differ.patch(&left, &delta).unwrap(), right);
    assert_eq!(differ.unpatch(&right, &delta).unwrap(), left);
}

#[test]
fn moves_mixed_with_edits_round_trip() {
    let differ = DiffPatcher::with_options(Options {
        detect_move: true,
        object_hash: Some(Arc::new(|value: &Value| {
            value.get("id").map(|id| id.to_string()).unwrap_or_default()
        })),
        ..Options::default()
    });
    let left = json!([{"id": 1, "v": "a"}, {"id": 2}, {"id": 3}]);
    let right = json!([{"id": 9}, {"id": 3}, {"id": 1, "v": "b"}]);

    let delta = differ.diff(&left, &right).expect("values differ");
    assert_eq!(differ.patch(&left, &delta).unwrap(), right);
    assert_eq!(differ.unpatch(&right, &delta).unwrap(), left);
}

#[test]
fn wire_deltas_survive_serialization() {
    let left = json!({"a": [1, 2, 3], "b": "x"});
    let right = json!({"a": [1, 3, 4], "b": "y"});
    let delta = diff(&left, &right);
    let text = serde_json::to_string(&delta).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(patch(&left, &reparsed).unwrap(), right);
    assert_eq!(unpatch(&right, &reparsed).unwrap(), left);
}
