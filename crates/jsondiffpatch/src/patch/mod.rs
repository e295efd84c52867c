//! Delta application: reconstruct the right-hand value from the left.

mod array;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::delta::Delta;
use crate::error::PatchError;

/// Apply `delta` to `left`, producing a freshly built value.
pub(crate) fn apply(left: &Value, delta: &Delta) -> Result<Value, PatchError> {
    match delta {
        Delta::Added(new) => Ok(new.clone()),
        Delta::Replaced { new, .. } => Ok(new.clone()),
        Delta::Deleted(_) => Ok(Value::Null),
        Delta::Text(patch_text) => apply_text(left, patch_text),
        Delta::Moved { .. } => Err(PatchError::InvalidDelta(
            "array move outside an array delta".to_string(),
        )),
        Delta::Object(entries) => apply_object(left, entries),
        Delta::Array(array_delta) => match left {
            Value::Array(items) => array::apply(items, array_delta).map(Value::Array),
            other => Err(PatchError::TypeMismatch(format!(
                "array delta applied to {}",
                kind(other)
            ))),
        },
    }
}

fn apply_object(left: &Value, entries: &BTreeMap<String, Delta>) -> Result<Value, PatchError> {
    let mut target = match left {
        Value::Object(map) => map.clone(),
        // Descending into a key that is being created.
        Value::Null => Map::new(),
        other => {
            return Err(PatchError::TypeMismatch(format!(
                "object delta applied to {}",
                kind(other)
            )))
        }
    };
    for (key, child) in entries {
        match child {
            Delta::Deleted(_) => {
                target.remove(key);
            }
            _ => {
                let base = target.get(key).cloned().unwrap_or(Value::Null);
                target.insert(key.clone(), apply(&base, child)?);
            }
        }
    }
    Ok(Value::Object(target))
}

fn apply_text(left: &Value, patch_text: &str) -> Result<Value, PatchError> {
    let Value::String(base) = left else {
        return Err(PatchError::TypeMismatch(format!(
            "text delta applied to {}",
            kind(left)
        )));
    };
    let patches = jsondiffpatch_text::patches_from_text(patch_text)?;
    if patches.is_empty() {
        return Err(PatchError::MalformedTextPatch(
            "patch text contains no hunks".to_string(),
        ));
    }
    let (result, flags) = jsondiffpatch_text::apply_patches(&patches, base);
    if flags.iter().any(|applied| !applied) {
        return Err(PatchError::MalformedTextPatch(
            "patch source does not match the base text".to_string(),
        ));
    }
    Ok(Value::String(result))
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
