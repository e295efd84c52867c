//! Reverse delta application: reconstruct the left-hand value from the
//! right. Every delta shape carries enough of the old state to run backward.

mod array;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::delta::Delta;
use crate::error::PatchError;
use crate::patch::kind;

/// Reverse `delta` against `right`, producing a freshly built value.
pub(crate) fn revert(right: &Value, delta: &Delta) -> Result<Value, PatchError> {
    match delta {
        Delta::Added(_) => Ok(Value::Null),
        Delta::Replaced { old, .. } => Ok(old.clone()),
        Delta::Deleted(old) => Ok(old.clone()),
        Delta::Text(patch_text) => revert_text(right, patch_text),
        Delta::Moved { .. } => Err(PatchError::InvalidDelta(
            "array move outside an array delta".to_string(),
        )),
        Delta::Object(entries) => revert_object(right, entries),
        Delta::Array(array_delta) => match right {
            Value::Array(items) => array::revert(items, array_delta).map(Value::Array),
            other => Err(PatchError::TypeMismatch(format!(
                "array delta reversed against {}",
                kind(other)
            ))),
        },
    }
}

fn revert_object(right: &Value, entries: &BTreeMap<String, Delta>) -> Result<Value, PatchError> {
    let mut target = match right {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(PatchError::TypeMismatch(format!(
                "object delta reversed against {}",
                kind(other)
            )))
        }
    };
    for (key, child) in entries {
        match child {
            // Reversing an addition removes the key.
            Delta::Added(_) => {
                target.remove(key);
            }
            _ => {
                let base = target.get(key).cloned().unwrap_or(Value::Null);
                target.insert(key.clone(), revert(&base, child)?);
            }
        }
    }
    Ok(Value::Object(target))
}

fn revert_text(right: &Value, patch_text: &str) -> Result<Value, PatchError> {
    let Value::String(base) = right else {
        return Err(PatchError::TypeMismatch(format!(
            "text delta reversed against {}",
            kind(right)
        )));
    };
    let patches = jsondiffpatch_text::patches_from_text(patch_text)?;
    if patches.is_empty() {
        return Err(PatchError::MalformedTextPatch(
            "patch text contains no hunks".to_string(),
        ));
    }
    let inverted = jsondiffpatch_text::invert(&patches);
    let (result, flags) = jsondiffpatch_text::apply_patches(&inverted, base);
    if flags.iter().any(|applied| !applied) {
        return Err(PatchError::MalformedTextPatch(
            "patch target does not match the base text".to_string(),
        ));
    }
    Ok(Value::String(result))
}
