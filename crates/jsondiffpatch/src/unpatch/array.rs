//! Array delta reversal, mirroring the forward index discipline in reverse:
//! undo nested modifications while new indices are still valid, then pull
//! out insertions and move destinations from the largest new index down,
//! then re-insert deleted and moved-back values in ascending old index.

use serde_json::Value;

use crate::delta::{ArrayDelta, Delta};
use crate::error::PatchError;

pub(super) fn revert(base: &[Value], delta: &ArrayDelta) -> Result<Vec<Value>, PatchError> {
    let mut working: Vec<Value> = base.to_vec();

    // Undo nested modifications in place.
    for (&new_index, entry) in &delta.updated {
        match entry {
            Delta::Added(_) => {}
            Delta::Moved { .. } => {
                return Err(PatchError::InvalidDelta(
                    "array move under a new-index key cannot be reversed".to_string(),
                ))
            }
            _ => {
                if new_index < working.len() {
                    working[new_index] = super::revert(&working[new_index], entry)?;
                }
            }
        }
    }

    // Extract insertions and move destinations, descending new index. A
    // move's element is held aside for re-insertion at its old position.
    let mut extractions: Vec<(usize, Option<usize>)> = Vec::new();
    for (&new_index, entry) in &delta.updated {
        if matches!(entry, Delta::Added(_)) {
            extractions.push((new_index, None));
        }
    }
    for (&old_index, entry) in &delta.removed {
        if let Delta::Moved { to, .. } = entry {
            extractions.push((*to, Some(old_index)));
        }
    }
    extractions.sort_by(|a, b| b.0.cmp(&a.0));

    let mut restored: Vec<(usize, Value)> = Vec::new();
    for (new_index, old_index) in extractions {
        if working.is_empty() {
            continue;
        }
        let index = new_index.min(working.len() - 1);
        let taken = working.remove(index);
        if let Some(old_index) = old_index {
            restored.push((old_index, taken));
        }
    }

    // Re-insert deleted values (from the delta) and moved-back values (held
    // above), ascending old index.
    for (&old_index, entry) in &delta.removed {
        if let Delta::Deleted(old) = entry {
            restored.push((old_index, old.clone()));
        }
    }
    restored.sort_by_key(|&(index, _)| index);
    for (old_index, value) in restored {
        let index = old_index.min(working.len());
        working.insert(index, value);
    }

    Ok(working)
}
