//! Compact, reversible deltas between JSON values.
//!
//! Computes a structural diff between two [`serde_json::Value`] trees in the
//! `jsondiffpatch` wire format, applies a delta to reproduce the right-hand
//! side and reverses one to reproduce the left-hand side:
//!
//! ```text
//! patch(left, diff(left, right))    == right
//! unpatch(right, diff(left, right)) == left
//! ```
//!
//! Arrays are aligned by common-prefix/suffix trimming plus an LCS pass with
//! pluggable element identity (see [`Options::object_hash`]); long string
//! pairs become text deltas via the `jsondiffpatch-text` engine.
//!
//! ```
//! use serde_json::json;
//!
//! let left = json!({"x": 1, "y": 2});
//! let right = json!({"x": 1, "y": 3});
//!
//! let delta = jsondiffpatch::diff(&left, &right);
//! assert_eq!(delta, json!({"y": [2, 3]}));
//! assert_eq!(jsondiffpatch::patch(&left, &delta).unwrap(), right);
//! assert_eq!(jsondiffpatch::unpatch(&right, &delta).unwrap(), left);
//! ```
//!
//! The free functions speak the wire format directly. [`DiffPatcher`] holds
//! a configured [`Options`] and works with the typed [`Delta`] model.

pub mod delta;
mod diff;
mod error;
mod item_match;
mod lcs;
mod options;
mod patch;
mod str_api;
mod unpatch;

use serde_json::Value;

pub use delta::{ArrayDelta, Delta};
pub use error::PatchError;
pub use options::{
    ArrayDiffMode, ObjectHash, Options, TextDiffMode, DEFAULT_MIN_EFFICIENT_TEXT_DIFF_LENGTH,
};
pub use str_api::{diff_str, patch_str, unpatch_str};

/// A diff/patch handle with fixed options.
///
/// Construction captures the options; the handle itself is immutable and
/// cheap to clone, and every method is safe to call concurrently.
#[derive(Clone, Debug, Default)]
pub struct DiffPatcher {
    options: Options,
}

impl DiffPatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Diff two values into a typed delta; `None` means "no change".
    pub fn diff(&self, left: &Value, right: &Value) -> Option<Delta> {
        diff::Differ::new(&self.options).diff(left, right)
    }

    /// Apply a typed delta, reconstructing the right-hand value.
    pub fn patch(&self, left: &Value, delta: &Delta) -> Result<Value, PatchError> {
        patch::apply(left, delta)
    }

    /// Reverse a typed delta, reconstructing the left-hand value.
    pub fn unpatch(&self, right: &Value, delta: &Delta) -> Result<Value, PatchError> {
        unpatch::revert(right, delta)
    }
}

/// Diff two values with default options into the wire format. `Null` means
/// "no change". Never fails.
pub fn diff(left: &Value, right: &Value) -> Value {
    DiffPatcher::new()
        .diff(left, right)
        .map_or(Value::Null, |delta| delta.to_value())
}

/// Apply a wire-format delta to `left`, reconstructing the right-hand value.
pub fn patch(left: &Value, delta: &Value) -> Result<Value, PatchError> {
    match Delta::from_value(delta)? {
        Some(delta) => patch::apply(left, &delta),
        None => Ok(left.clone()),
    }
}

/// Reverse a wire-format delta against `right`, reconstructing the left-hand
/// value.
pub fn unpatch(right: &Value, delta: &Value) -> Result<Value, PatchError> {
    match Delta::from_value(delta)? {
        Some(delta) => unpatch::revert(right, &delta),
        None => Ok(right.clone()),
    }
}
