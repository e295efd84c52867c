//! In-memory delta model.
//!
//! Deltas live in memory as a sum type and only take on the jsondiffpatch
//! wire shapes (nested arrays with op codes, `_t`-marked objects) at the
//! serialization boundary in [`wire`].

use std::collections::BTreeMap;

use serde_json::Value;

mod wire;

pub use wire::{OP_ARRAY_MOVE, OP_DELETED, OP_TEXT_DIFF};

/// A change at one position of a value tree.
///
/// "No change" is not a variant; APIs use `Option<Delta>` for it, and the
/// wire codec maps `None` to JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    /// The value did not exist; add it. Wire: `[new]`.
    Added(Value),
    /// The value changed wholesale. Wire: `[old, new]`.
    Replaced { old: Value, new: Value },
    /// The value existed and was removed. Wire: `[old, 0, 0]`.
    Deleted(Value),
    /// Both sides are strings; the carried text patch transforms one into
    /// the other. Wire: `[patch_text, 0, 2]`.
    Text(String),
    /// An array element moved to new index `to`. The moved value is carried
    /// only under `IncludeValueOnMove`. Wire: `[value-or-"", to, 3]`.
    Moved { value: Option<Value>, to: usize },
    /// Recursive per-key object delta.
    Object(BTreeMap<String, Delta>),
    /// Recursive positional array delta.
    Array(ArrayDelta),
}

/// Positional changes of an array.
///
/// `removed` is keyed by index into the old array (wire keys `_i`) and holds
/// only [`Delta::Deleted`] and [`Delta::Moved`] entries. `updated` is keyed
/// by index into the new array (wire keys `i`) and holds additions and
/// nested modifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayDelta {
    pub removed: BTreeMap<usize, Delta>,
    pub updated: BTreeMap<usize, Delta>,
}

impl ArrayDelta {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}
