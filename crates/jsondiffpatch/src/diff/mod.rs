//! Structural diff: walk two values and emit the delta between them.

mod array;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::delta::Delta;
use crate::item_match::ItemMatch;
use crate::options::{ArrayDiffMode, Options, TextDiffMode};

/// One diff invocation. Borrows the options for its lifetime; all state is
/// per-call, so a differ is freely shareable across threads.
pub(crate) struct Differ<'a> {
    options: &'a Options,
    matcher: ItemMatch<'a>,
}

impl<'a> Differ<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            matcher: ItemMatch::new(options),
        }
    }

    /// Diff two values. `None` means "no change".
    pub fn diff(&self, left: &Value, right: &Value) -> Option<Delta> {
        if let (Value::Object(left), Value::Object(right)) = (left, right) {
            return self.diff_object(left, right);
        }
        if self.options.array_diff == ArrayDiffMode::Efficient {
            if let (Value::Array(left), Value::Array(right)) = (left, right) {
                return self.diff_array(left, right);
            }
        }
        self.diff_leaf(left, right)
    }

    /// Mismatched kinds and scalars: no change, a text delta for long
    /// strings, or a wholesale replacement.
    fn diff_leaf(&self, left: &Value, right: &Value) -> Option<Delta> {
        if self.matcher.match_value(left, right) {
            return None;
        }
        if let (Value::String(left_str), Value::String(right_str)) = (left, right) {
            if self.options.text_diff == TextDiffMode::Efficient
                && (left_str.len() > self.options.min_efficient_text_diff_length
                    || right_str.len() > self.options.min_efficient_text_diff_length)
            {
                let patches = jsondiffpatch_text::create_patches(left_str, right_str);
                if !patches.is_empty() {
                    return Some(Delta::Text(jsondiffpatch_text::patches_to_text(&patches)));
                }
            }
        }
        Some(Delta::Replaced {
            old: left.clone(),
            new: right.clone(),
        })
    }

    fn diff_object(
        &self,
        left: &Map<String, Value>,
        right: &Map<String, Value>,
    ) -> Option<Delta> {
        let mut entries = BTreeMap::new();
        for (key, left_value) in left {
            match right.get(key) {
                Some(right_value) => {
                    if let Some(child) = self.diff(left_value, right_value) {
                        entries.insert(key.clone(), child);
                    }
                }
                None => {
                    entries.insert(key.clone(), Delta::Deleted(left_value.clone()));
                }
            }
        }
        for (key, right_value) in right {
            if !left.contains_key(key) {
                entries.insert(key.clone(), Delta::Added(right_value.clone()));
            }
        }
        if entries.is_empty() {
            None
        } else {
            Some(Delta::Object(entries))
        }
    }
}
