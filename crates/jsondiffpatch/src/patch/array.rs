//! Array delta application.
//!
//! Index discipline: old-index operations run against the shrinking old
//! array, so they go first, largest index first. Insertions and move
//! re-insertions are addressed in new-array coordinates and land in one
//! ascending pass, each insert making the next one's index valid. Nested
//! modifications also carry new-array indices, so they run last, once the
//! array has its final shape.

use serde_json::Value;

use crate::delta::{ArrayDelta, Delta};
use crate::error::PatchError;

pub(super) fn apply(base: &[Value], delta: &ArrayDelta) -> Result<Vec<Value>, PatchError> {
    let mut working: Vec<Value> = base.to_vec();

    // Removals and move extractions, descending old index. Out-of-range
    // indices clamp to the last element, best effort.
    let mut moved: Vec<(usize, Value)> = Vec::new();
    for (&old_index, entry) in delta.removed.iter().rev() {
        if working.is_empty() {
            continue;
        }
        let index = old_index.min(working.len() - 1);
        let taken = working.remove(index);
        if let Delta::Moved { to, .. } = entry {
            moved.push((*to, taken));
        }
    }

    // Move re-insertions and plain insertions, one ascending pass over the
    // target new index. `moved` entries sort before same-index insertions.
    let mut insertions = moved;
    for (&new_index, entry) in &delta.updated {
        match entry {
            Delta::Added(value) => insertions.push((new_index, value.clone())),
            // Rare destination form of a move: the carried value (or its
            // empty-string placeholder) lands at the target index.
            Delta::Moved { value, to } => insertions.push((
                *to,
                value.clone().unwrap_or_else(|| Value::String(String::new())),
            )),
            _ => {}
        }
    }
    insertions.sort_by_key(|&(index, _)| index);
    for (index, value) in insertions {
        let index = index.min(working.len());
        working.insert(index, value);
    }

    // Nested modifications, ascending new index, now in final coordinates.
    for (&new_index, entry) in &delta.updated {
        match entry {
            Delta::Added(_) | Delta::Moved { .. } => {}
            _ => {
                if new_index < working.len() {
                    working[new_index] = super::apply(&working[new_index], entry)?;
                }
            }
        }
    }

    Ok(working)
}
